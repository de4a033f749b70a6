use charter::constitution::rules::PRIVACY_RULE_ID;
use charter::constitution::writer::{self, Format};
use charter::constitution::Constitution;
use charter::core::config::{CharterConfig, TriggersConfig};
use charter::generator::{GenerateOptions, Generator, compile_str};
use charter::vision::constraints::{Category, TriggerTable};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

const E2E_VISION: &str = "## Guiding Principles
1. **Learner First**: Every decision prioritizes learner experience
2. **Privacy**: Learner data is protected

## Constraints
- Must work on low-spec devices (2GB RAM, Android 8+)
- Offline-capable
";

fn fixture() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/vision.md");
    fs::read_to_string(path).expect("read fixture vision")
}

fn compile(content: &str) -> Constitution {
    compile_str(content, "docs/product/vision.md", &TriggerTable::default(), "1700000000Z")
        .constitution
}

#[test]
fn end_to_end_example() {
    let c = compile(E2E_VISION);

    let names: Vec<_> = c.core_principles.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Learner First", "Privacy"]);
    assert_eq!(
        c.core_principles[0].description,
        "Every decision prioritizes learner experience"
    );

    let categories: Vec<_> = c.technical_requirements.iter().map(|r| r.category).collect();
    assert_eq!(categories, [Category::Device, Category::Storage, Category::Other]);
    let device = &c.technical_requirements[0];
    assert!(device.matched_keywords.contains(&"android".to_string()));
    assert!(device.matched_keywords.contains(&"device".to_string()));
    let other = &c.technical_requirements[2];
    assert_eq!(other.trigger_keyword, "offline");
    assert!(other.derived_rule.to_lowercase().contains("offline"));

    assert!(c.has_security_rule(PRIVACY_RULE_ID));
    assert_eq!(c.metadata.source_vision_path, "docs/product/vision.md");
}

#[test]
fn determinism_modulo_timestamp() {
    let vision = fixture();
    let table = TriggerTable::default();
    let a = compile_str(&vision, "v.md", &table, "1Z").constitution;
    let b = compile_str(&vision, "v.md", &table, "2Z").constitution;

    let mut b_aligned = b.clone();
    b_aligned.metadata.generated_at = a.metadata.generated_at.clone();
    assert_eq!(
        writer::render(&a, Format::Yaml).unwrap(),
        writer::render(&b_aligned, Format::Yaml).unwrap()
    );
    assert_eq!(
        writer::render(&a, Format::Json).unwrap(),
        writer::render(&b_aligned, Format::Json).unwrap()
    );
}

#[test]
fn missing_principles_heading_yields_empty_list() {
    let c = compile("# Vision\n\n## Constraints\n- fast startup\n");
    assert!(c.core_principles.is_empty());
    assert_eq!(c.technical_requirements.len(), 1);
    assert!(!c.has_security_rule(PRIVACY_RULE_ID));
}

#[test]
fn principle_order_is_preserved() {
    let c = compile(
        "## Principles\n1. Learner First: a\n2. Simplicity: b\n3. Privacy: c\n",
    );
    let names: Vec<_> = c.core_principles.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Learner First", "Simplicity", "Privacy"]);
    let orders: Vec<_> = c.core_principles.iter().map(|p| p.order).collect();
    assert_eq!(orders, [1, 2, 3]);
}

#[test]
fn privacy_trigger_toggles_rule() {
    let with = compile("## Principles\n- **Trust**: we respect Privacy\n");
    assert!(with.has_security_rule(PRIVACY_RULE_ID));
    let without = compile("## Principles\n- **Trust**: we respect users\n");
    assert!(!without.has_security_rule(PRIVACY_RULE_ID));
    assert_eq!(without.security_requirements.len(), 1);
}

#[test]
fn mobile_and_android_give_one_device_requirement() {
    let c = compile("## Constraints\n- mobile app\n- Android only\n");
    let devices = c
        .technical_requirements
        .iter()
        .filter(|r| r.category == Category::Device)
        .count();
    assert_eq!(devices, 1);
}

#[test]
fn fixture_vision_compiles() {
    let c = compile(&fixture());
    assert_eq!(c.core_principles.len(), 3);
    assert_eq!(c.metadata.domain, "education");
    let categories: Vec<_> = c.technical_requirements.iter().map(|r| r.category).collect();
    assert_eq!(categories, [Category::Device, Category::Storage, Category::Other]);
    assert!(c.has_security_rule(PRIVACY_RULE_ID));
}

#[test]
fn dry_run_leaves_existing_output_untouched() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("VISION.md"), E2E_VISION).unwrap();
    let generator = Generator::new(tmp.path(), CharterConfig::default());
    let target = generator.output_path(None);
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(&target, "hand edited\n").unwrap();

    let report = generator
        .run(&GenerateOptions {
            dry_run: true,
            ..GenerateOptions::default()
        })
        .unwrap();
    assert!(matches!(report.emitted, charter::constitution::Emitted::Rendered(_)));
    assert_eq!(fs::read_to_string(&target).unwrap(), "hand edited\n");
}

#[test]
fn regeneration_replaces_output_and_parses_back() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("VISION.md"), E2E_VISION).unwrap();
    let generator = Generator::new(tmp.path(), CharterConfig::default());
    let target = generator.output_path(None);
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(&target, "stale: true\n").unwrap();

    generator.run(&GenerateOptions::default()).unwrap();
    let written = fs::read_to_string(&target).unwrap();
    assert!(!written.contains("stale"));
    let parsed: Constitution = serde_yaml::from_str(&written).unwrap();
    assert_eq!(parsed.core_principles.len(), 2);
}

#[test]
fn config_triggers_reach_the_classifier() {
    let tmp = tempdir().unwrap();
    fs::write(
        tmp.path().join("VISION.md"),
        "## Constraints\n- runs on school chromebooks\n",
    )
    .unwrap();

    let plain = Generator::new(tmp.path(), CharterConfig::default());
    let doc = plain.load_vision(None).unwrap();
    assert!(plain.compile(&doc, "1Z").constitution.technical_requirements.is_empty());

    let config = CharterConfig {
        triggers: TriggersConfig {
            device: vec!["chromebook".to_string()],
            ..TriggersConfig::default()
        },
        ..CharterConfig::default()
    };
    let extended = Generator::new(tmp.path(), config);
    let reqs = extended.compile(&doc, "1Z").constitution.technical_requirements;
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].category, Category::Device);
    assert_eq!(reqs[0].trigger_keyword, "chromebook");
}

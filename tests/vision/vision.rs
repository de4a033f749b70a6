use charter::vision::constraints::{Category, TriggerTable, classify};
use charter::vision::principles::parse_principles;
use charter::vision::sections::{SectionKind, extract_section};
use charter::vision::{analyze, mentions_privacy};

#[test]
fn nested_subheadings_stay_inside_the_section() {
    let doc = "\
## Core Principles
- **Reach**: everyone
### Rationale
- **Depth**: nested lists still count
#### Deeper
text
## Constraints
- offline
";
    let section = extract_section(doc, SectionKind::Principles).expect("principles section");
    assert!(section.body.contains("### Rationale"));
    assert!(section.body.contains("#### Deeper"));
    assert!(!section.body.contains("offline"));

    let list = parse_principles(Some(&section.body));
    let names: Vec<_> = list.principles.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Reach", "Depth"]);
}

#[test]
fn higher_level_heading_closes_a_deep_section() {
    let doc = "# Product\n### Limitations\n- 10MB cap\n## Roadmap\n- faster sync\n";
    let section = extract_section(doc, SectionKind::Constraints).unwrap();
    assert_eq!(section.level, 3);
    assert_eq!(section.body, "- 10MB cap");

    let reqs = classify(Some(&section.body), &TriggerTable::default());
    let cats: Vec<_> = reqs.iter().map(|r| r.category).collect();
    assert_eq!(cats, [Category::Storage]);
}

#[test]
fn synonyms_are_substring_matches_in_headings() {
    for heading in [
        "## Our Guiding Principles",
        "## Core principles (v2)",
        "### PRINCIPLES",
    ] {
        let doc = format!("{}\n- **X**: y\n", heading);
        assert!(
            extract_section(&doc, SectionKind::Principles).is_some(),
            "heading should match: {}",
            heading
        );
    }
    for heading in ["## Technical Requirements", "## Known limitations", "## Constraints"] {
        let doc = format!("{}\n- offline\n", heading);
        assert!(
            extract_section(&doc, SectionKind::Constraints).is_some(),
            "heading should match: {}",
            heading
        );
    }
}

#[test]
fn only_the_first_matching_heading_is_used() {
    let doc = "\
## Principles
- **First**: kept
## Appendix
## Principles (archived)
- **Second**: ignored
";
    let findings = analyze(doc, &TriggerTable::default());
    let section = findings.principles_section.expect("section");
    assert_eq!(section.line, 1);
    assert_eq!(section.ignored_matches, vec![4]);
    let names: Vec<_> = findings
        .principles
        .principles
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, ["First"]);
}

#[test]
fn unnamed_items_are_kept_verbatim() {
    let list = parse_principles(Some("- Respect the learner's time\n- **Clarity**\n"));
    assert_eq!(list.principles.len(), 2);
    assert_eq!(list.principles[0].name, "Respect the learner's time");
    assert_eq!(list.principles[0].description, list.principles[0].name);
    assert_eq!(list.principles[1].name, "Clarity");
    assert_eq!(list.principles[1].description, "Clarity");
}

#[test]
fn privacy_detection_ignores_case() {
    assert!(mentions_privacy(Some("3. **PRIVACY**: sacred")));
    assert!(mentions_privacy(Some("- privacy by default")));
    assert!(!mentions_privacy(Some("- secure by default")));
}

#[test]
fn classification_depends_on_categories_not_occurrences() {
    let table = TriggerTable::default();
    let once = classify(Some("- mobile"), &table);
    let many = classify(Some("- mobile mobile phone Android device RAM"), &table);
    assert_eq!(once.len(), 1);
    assert_eq!(many.len(), 1);
    assert_eq!(once[0].category, many[0].category);
    assert_eq!(many[0].matched_keywords.len(), 5);
}

#[test]
fn emphasis_without_colon_stays_part_of_the_name() {
    let list = parse_principles(Some(
        "1. **Offline** by default: lessons work without network\n2. **Reach**: everyone\n",
    ));
    let names: Vec<_> = list.principles.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Offline by default", "Reach"]);
    assert_eq!(list.principles[0].description, "lessons work without network");
}

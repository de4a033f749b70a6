//! Fixed rule catalog.
//!
//! Everything here is identical across generated constitutions except the
//! per-principle checks, which are picked from a keyword table by the
//! principle's own text.

use super::model::{
    AlignmentRule, BreakingChangesPolicy, EnforcementAgent, EnforcementLevel, ExceptionPolicy,
    HumanReview, MetricsPolicy, QualityStandard, ReviewProcess, SecurityRule,
};

pub const PRIVACY_RULE_ID: &str = "privacy";
pub const MANDATORY: &str = "mandatory";
pub const MAX_PRINCIPLE_CHECKS: usize = 4;
const MAX_ID_LEN: usize = 40;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Principle keyword groups. The first group with a hit supplies the checks.
const PRINCIPLE_CHECKS: &[(&[&str], &[&str])] = &[
    (
        &["offline", "connectivity", "network"],
        &[
            "Feature works without network connectivity",
            "Graceful handling of network failures",
        ],
    ),
    (
        &["mobile", "phone", "device"],
        &["Mobile-friendly implementation", "Works on target mobile devices"],
    ),
    (
        &["simple", "simplicity", "easy"],
        &["Solution is as simple as possible", "No unnecessary complexity"],
    ),
    (
        &["secure", "security", "privacy", "protected"],
        &["Security best practices followed", "No known vulnerabilities"],
    ),
    (
        &["performance", "fast", "speed", "quick"],
        &["Performance targets met", "No performance regressions"],
    ),
    (
        &["reliable", "reliability", "consistent", "resilient"],
        &["Error handling implemented", "Graceful degradation in edge cases"],
    ),
    (
        &["accessible", "accessibility", "anyone", "anywhere"],
        &["Works in target environments", "No unnecessary barriers"],
    ),
    (
        &["open", "transparent", "interoperable"],
        &["Uses open standards where applicable", "Documented interfaces"],
    ),
];

const DEFAULT_PRINCIPLE_CHECKS: &[&str] =
    &["Principle considered in design", "No violations of principle"];

/// Checks for one principle, derived from its name and description.
pub fn principle_checks(name: &str, description: &str) -> Vec<String> {
    let text = format!("{} {}", name, description).to_lowercase();
    let specific = PRINCIPLE_CHECKS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, checks)| *checks)
        .unwrap_or(DEFAULT_PRINCIPLE_CHECKS);

    let mut checks = vec!["Implementation aligns with principle".to_string()];
    checks.extend(strings(specific));
    checks.truncate(MAX_PRINCIPLE_CHECKS);
    checks
}

/// Stable identifier: lowercase, spaces/hyphens to `_`, other symbols dropped.
pub fn principle_id(name: &str) -> String {
    let mut id = String::new();
    for c in name.to_lowercase().chars() {
        let c = if c.is_whitespace() || c == '-' { '_' } else { c };
        if c == '_' && (id.is_empty() || id.ends_with('_')) {
            continue;
        }
        if c.is_alphanumeric() || c == '_' {
            id.push(c);
        }
    }
    let id: String = id.trim_end_matches('_').chars().take(MAX_ID_LEN).collect();
    let id = id.trim_end_matches('_').to_string();
    if id.is_empty() {
        "principle".to_string()
    } else {
        id
    }
}

pub fn code_quality_standards() -> Vec<QualityStandard> {
    vec![
        QualityStandard {
            id: "testing".to_string(),
            requirements: strings(&[
                "Unit tests required for new code",
                "Integration tests required for key workflows",
                "Coverage maintained or improved",
            ]),
            checks: strings(&[
                "Tests written and passing",
                "Coverage requirements met",
                "Key scenarios tested",
                "Tests are maintainable",
            ]),
        },
        QualityStandard {
            id: "documentation".to_string(),
            requirements: strings(&[
                "Code comments for complex logic",
                "API documentation for public interfaces",
                "README updates if needed",
                "ADR for architectural decisions",
            ]),
            checks: strings(&[
                "Documentation updated",
                "Changes explained in PR",
                "Examples provided where helpful",
                "Breaking changes documented",
            ]),
        },
        QualityStandard {
            id: "code_style".to_string(),
            requirements: strings(&[
                "Follows project conventions",
                "Linter passes",
                "Consistent formatting",
                "Meaningful names",
            ]),
            checks: strings(&[
                "Linter passes",
                "Style guide followed",
                "No warnings introduced",
                "Code review approved",
            ]),
        },
    ]
}

/// Security block; the privacy rule is appended only when the vision asks for it.
pub fn security_requirements(privacy_emphasized: bool) -> Vec<SecurityRule> {
    let mut rules = vec![SecurityRule {
        id: "data_protection".to_string(),
        requirements: strings(&[
            "Sensitive data encrypted at rest",
            "Secure communication (HTTPS)",
            "Input validation present",
            "No hardcoded secrets",
        ]),
        checks: strings(&[
            "Security scan passes",
            "No known vulnerabilities",
            "Secrets properly managed",
            "Input sanitized",
        ]),
    }];
    if privacy_emphasized {
        rules.push(SecurityRule {
            id: PRIVACY_RULE_ID.to_string(),
            requirements: strings(&[
                "Minimal data collection",
                "User consent obtained",
                "Data anonymized where possible",
                "Privacy policy compliance",
            ]),
            checks: strings(&[
                "Privacy review done",
                "PII handled correctly",
                "Consent flow appropriate",
                "Audit trail in place",
            ]),
        });
    }
    rules
}

pub fn architecture_alignment() -> Vec<AlignmentRule> {
    vec![
        AlignmentRule {
            id: "vision_compliance".to_string(),
            description: "Changes must align with project vision".to_string(),
            checks: strings(&[
                "Aligns with stated mission",
                "Follows vision principles",
                "Supports vision goals",
                "No conflicts with vision constraints",
            ]),
        },
        AlignmentRule {
            id: "pattern_consistency".to_string(),
            description: "Follow established code patterns".to_string(),
            checks: strings(&[
                "Uses existing patterns where applicable",
                "New patterns justified and documented",
                "Consistent with architecture",
                "No architectural violations",
            ]),
        },
    ]
}

pub fn breaking_changes() -> BreakingChangesPolicy {
    BreakingChangesPolicy {
        allowed: true,
        conditions: strings(&[
            "Clearly documented",
            "Migration path provided",
            "Justified by significant benefit",
            "Approved by maintainers",
        ]),
        required_docs: strings(&[
            "BREAKING CHANGE tag in commit",
            "Migration guide",
            "Deprecation timeline",
            "Backward compatibility plan if possible",
        ]),
    }
}

pub fn enforcement_levels() -> Vec<EnforcementLevel> {
    vec![
        EnforcementLevel {
            level: "critical".to_string(),
            description: "Must pass, no exceptions".to_string(),
            applies_to: strings(&["core_principles", "security_requirements"]),
            action: "Block merge".to_string(),
        },
        EnforcementLevel {
            level: "required".to_string(),
            description: "Must pass or have approved exception".to_string(),
            applies_to: strings(&[
                "technical_requirements",
                "code_quality_standards (testing, documentation)",
                "architecture_alignment",
            ]),
            action: "Block merge or require approval".to_string(),
        },
        EnforcementLevel {
            level: "recommended".to_string(),
            description: "Should pass, exceptions allowed with justification".to_string(),
            applies_to: strings(&[
                "code_quality_standards (code_style)",
                "technical_requirements (performance)",
            ]),
            action: "Warning, require justification".to_string(),
        },
    ]
}

pub fn review_process() -> ReviewProcess {
    let agent = |name: &str, checks: &str, authority: &str| EnforcementAgent {
        name: name.to_string(),
        checks: checks.to_string(),
        authority: authority.to_string(),
    };
    ReviewProcess {
        automated_checks: strings(&[
            "Linter",
            "Unit tests",
            "Security scan",
            "Coverage check",
            "Build verification",
        ]),
        enforcement_agents: vec![
            agent("constitutional_judge", "core_principles", "Block merge"),
            agent("security_enforcement", "security_requirements", "Block merge"),
            agent("quality_enforcement", "code_quality_standards", "Request changes"),
        ],
        human_review: HumanReview {
            required_for: strings(&[
                "Architectural changes",
                "Breaking changes",
                "Security-sensitive changes",
                "New dependencies",
            ]),
            reviewers: "Maintainers".to_string(),
            approval_count: 1,
        },
    }
}

pub fn exceptions() -> ExceptionPolicy {
    ExceptionPolicy {
        allowed: true,
        process: strings(&[
            "Document reason for exception",
            "Propose alternative compliance",
            "Get approval from maintainer",
            "Create issue to address properly",
        ]),
        documentation: strings(&[
            "Exception noted in PR",
            "Follow-up issue created",
            "Timeline for proper fix",
            "Risk assessment",
        ]),
    }
}

pub fn metrics() -> MetricsPolicy {
    MetricsPolicy {
        tracked: strings(&[
            "First-time approval rate",
            "Common failure reasons",
            "Time to merge",
            "Rework frequency",
        ]),
        reporting: strings(&["Weekly summary", "Trend analysis", "Process improvements"]),
    }
}

//! Output schema of the PR constitution.
//!
//! Field order here is the key order of the rendered document. Downstream
//! validators depend on these names and types; treat changes as breaking.

use crate::vision::constraints::TechnicalRequirement;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constitution {
    pub version: String,
    pub core_principles: Vec<PrincipleRule>,
    pub technical_requirements: Vec<TechnicalRequirement>,
    pub code_quality_standards: Vec<QualityStandard>,
    pub security_requirements: Vec<SecurityRule>,
    pub architecture_alignment: Vec<AlignmentRule>,
    pub breaking_changes: BreakingChangesPolicy,
    pub enforcement_levels: Vec<EnforcementLevel>,
    pub review_process: ReviewProcess,
    pub exceptions: ExceptionPolicy,
    pub metrics: MetricsPolicy,
    pub metadata: Metadata,
}

/// A principle as a mandatory merge rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipleRule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub order: usize,
    pub enforcement: String,
    pub checks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityStandard {
    pub id: String,
    pub requirements: Vec<String>,
    pub checks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityRule {
    pub id: String,
    pub requirements: Vec<String>,
    pub checks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentRule {
    pub id: String,
    pub description: String,
    pub checks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakingChangesPolicy {
    pub allowed: bool,
    pub conditions: Vec<String>,
    pub required_docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementLevel {
    pub level: String,
    pub description: String,
    pub applies_to: Vec<String>,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewProcess {
    pub automated_checks: Vec<String>,
    pub enforcement_agents: Vec<EnforcementAgent>,
    pub human_review: HumanReview,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementAgent {
    pub name: String,
    pub checks: String,
    pub authority: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanReview {
    pub required_for: Vec<String>,
    pub reviewers: String,
    pub approval_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionPolicy {
    pub allowed: bool,
    pub process: Vec<String>,
    pub documentation: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsPolicy {
    pub tracked: Vec<String>,
    pub reporting: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Only field allowed to differ between runs over the same vision.
    pub generated_at: String,
    pub source_vision_path: String,
    pub source_sha256: String,
    pub domain: String,
    pub generator: String,
}

impl Constitution {
    /// Copy with `generated_at` cleared, for comparing runs.
    pub fn without_timestamp(&self) -> Constitution {
        let mut c = self.clone();
        c.metadata.generated_at = String::new();
        c
    }

    pub fn has_security_rule(&self, id: &str) -> bool {
        self.security_requirements.iter().any(|r| r.id == id)
    }
}

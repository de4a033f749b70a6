//! Constitution assembly.
//!
//! Pure: the result depends only on the findings, the source identity and the
//! timestamp handed in. Assembly cannot fail; empty findings give a valid
//! constitution with empty principle and requirement lists.

use super::model::{Constitution, Metadata, PrincipleRule, SCHEMA_VERSION};
use super::rules;
use crate::vision::VisionFindings;
use rustc_hash::FxHashSet;
use sha2::{Digest, Sha256};

/// Identity of the vision a constitution was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    /// Repo-relative path as recorded in metadata.
    pub path: String,
    pub sha256: String,
}

impl SourceInfo {
    pub fn from_content(path: impl Into<String>, content: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        SourceInfo {
            path: path.into(),
            sha256: format!("{:x}", hasher.finalize()),
        }
    }
}

pub fn generator_tag() -> String {
    format!("charter {}", env!("CARGO_PKG_VERSION"))
}

/// Claim `base`, or the first free `base_2`, `base_3`, ... in list order.
fn claim_id(taken: &mut FxHashSet<String>, base: String) -> String {
    if taken.insert(base.clone()) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", base, n);
        if taken.insert(candidate.clone()) {
            tracing::debug!(id = %candidate, "principle id collision suffixed");
            return candidate;
        }
        n += 1;
    }
}

fn principle_rules(findings: &VisionFindings) -> Vec<PrincipleRule> {
    let mut taken = FxHashSet::default();
    findings
        .principles
        .principles
        .iter()
        .map(|p| PrincipleRule {
            id: claim_id(&mut taken, rules::principle_id(&p.name)),
            name: p.name.clone(),
            description: p.description.clone(),
            order: p.order,
            enforcement: rules::MANDATORY.to_string(),
            checks: rules::principle_checks(&p.name, &p.description),
        })
        .collect()
}

/// Build the constitution. `generated_at` is the only run-dependent input.
pub fn assemble(findings: &VisionFindings, source: &SourceInfo, generated_at: &str) -> Constitution {
    Constitution {
        version: SCHEMA_VERSION.to_string(),
        core_principles: principle_rules(findings),
        technical_requirements: findings.requirements.clone(),
        code_quality_standards: rules::code_quality_standards(),
        security_requirements: rules::security_requirements(findings.privacy_emphasized),
        architecture_alignment: rules::architecture_alignment(),
        breaking_changes: rules::breaking_changes(),
        enforcement_levels: rules::enforcement_levels(),
        review_process: rules::review_process(),
        exceptions: rules::exceptions(),
        metrics: rules::metrics(),
        metadata: Metadata {
            generated_at: generated_at.to_string(),
            source_vision_path: source.path.clone(),
            source_sha256: source.sha256.clone(),
            domain: findings.domain.to_string(),
            generator: generator_tag(),
        },
    }
}

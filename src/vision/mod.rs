//! Reading side of the compiler: everything that turns vision Markdown into
//! plain data (sections, principles, technical requirements, domain).

pub mod constraints;
pub mod discover;
pub mod domain;
pub mod principles;
pub mod sections;

use constraints::{TechnicalRequirement, TriggerTable};
use principles::PrincipleList;
use sections::{Section, SectionKind};
use serde::Serialize;

/// Everything extracted from one vision document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisionFindings {
    pub principles_section: Option<Section>,
    pub constraints_section: Option<Section>,
    pub principles: PrincipleList,
    pub requirements: Vec<TechnicalRequirement>,
    /// "privacy" appears in the principles section body.
    pub privacy_emphasized: bool,
    pub domain: &'static str,
}

/// Case-insensitive check for the privacy trigger in a principles body.
pub fn mentions_privacy(principles_body: Option<&str>) -> bool {
    principles_body
        .map(|b| b.to_lowercase().contains("privacy"))
        .unwrap_or(false)
}

/// Run every extractor over `content`. Never fails: missing sections are empty data.
pub fn analyze(content: &str, table: &TriggerTable) -> VisionFindings {
    let principles_section = sections::extract_section(content, SectionKind::Principles);
    let constraints_section = sections::extract_section(content, SectionKind::Constraints);

    let principles_body = principles_section.as_ref().map(|s| s.body.as_str());
    let constraints_body = constraints_section.as_ref().map(|s| s.body.as_str());

    VisionFindings {
        principles: principles::parse_principles(principles_body),
        requirements: constraints::classify(constraints_body, table),
        privacy_emphasized: mentions_privacy(principles_body),
        domain: domain::infer_domain(content),
        principles_section,
        constraints_section,
    }
}

//! Constraint classification.
//!
//! A constraints section is scanned against an explicit trigger table. Every
//! category with at least one hit yields exactly one requirement, emitted in
//! table order regardless of where the triggers appear in the text. Matching
//! is plain case-insensitive substring search so a reviewer can predict the
//! result from the table alone.

use crate::core::config::TriggersConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Device,
    Performance,
    Storage,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Device,
        Category::Performance,
        Category::Storage,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Device => "device",
            Category::Performance => "performance",
            Category::Storage => "storage",
            Category::Other => "other",
        }
    }
}

/// One row of the trigger table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerGroup {
    pub category: Category,
    pub triggers: Vec<String>,
    pub derived_rule: &'static str,
    pub checks: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerTable {
    groups: Vec<TriggerGroup>,
}

fn group(
    category: Category,
    triggers: &[&str],
    derived_rule: &'static str,
    checks: &'static [&'static str],
) -> TriggerGroup {
    TriggerGroup {
        category,
        triggers: triggers.iter().map(|t| t.to_string()).collect(),
        derived_rule,
        checks,
    }
}

impl Default for TriggerTable {
    fn default() -> Self {
        TriggerTable {
            groups: vec![
                group(
                    Category::Device,
                    &["mobile", "android", "phone", "device", "RAM"],
                    "Ensure compatibility with target devices",
                    &[
                        "Tested on target devices or emulators",
                        "Performance within acceptable range",
                        "No crashes on target platforms",
                        "Resource usage acceptable",
                    ],
                ),
                group(
                    Category::Performance,
                    &["performance", "latency", "speed", "fast"],
                    "Meet performance requirements",
                    &[
                        "Performance benchmarks run",
                        "No performance regressions",
                        "Response times acceptable",
                        "Resource usage optimized",
                    ],
                ),
                group(
                    Category::Storage,
                    &["storage", "disk", "MB", "GB", "size"],
                    "Respect storage and resource constraints",
                    &[
                        "Storage impact documented",
                        "Memory usage acceptable",
                        "Resource cleanup implemented",
                        "Efficient data structures used",
                    ],
                ),
                group(
                    Category::Other,
                    &["offline", "connectivity", "bandwidth"],
                    "Validate offline capability: features must work without network connectivity",
                    &[
                        "Feature works without network connectivity",
                        "Graceful handling of network failures",
                        "Sync resumes after reconnect",
                        "Bandwidth use minimized",
                    ],
                ),
            ],
        }
    }
}

impl TriggerTable {
    /// Built-in table with config extras appended to their groups.
    pub fn with_extras(extras: &TriggersConfig) -> Self {
        let mut table = TriggerTable::default();
        for g in &mut table.groups {
            let extra = match g.category {
                Category::Device => &extras.device,
                Category::Performance => &extras.performance,
                Category::Storage => &extras.storage,
                Category::Other => &extras.other,
            };
            for t in extra {
                let t = t.trim();
                if t.is_empty() || g.triggers.iter().any(|known| known.eq_ignore_ascii_case(t)) {
                    continue;
                }
                g.triggers.push(t.to_string());
            }
        }
        table
    }

    pub fn groups(&self) -> &[TriggerGroup] {
        &self.groups
    }

    pub fn group(&self, category: Category) -> Option<&TriggerGroup> {
        self.groups.iter().find(|g| g.category == category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalRequirement {
    pub category: Category,
    /// Trigger with the earliest occurrence in the text.
    pub trigger_keyword: String,
    pub derived_rule: String,
    /// Every trigger of the group that hit, in table order.
    pub matched_keywords: Vec<String>,
    pub checks: Vec<String>,
}

/// Classify a constraints section body. `None` (no section) yields nothing.
pub fn classify(body: Option<&str>, table: &TriggerTable) -> Vec<TechnicalRequirement> {
    let Some(body) = body else {
        tracing::debug!("no constraints section; no technical requirements");
        return Vec::new();
    };
    let haystack = body.to_lowercase();

    let mut out = Vec::new();
    for g in table.groups() {
        let hits: Vec<(usize, &String)> = g
            .triggers
            .iter()
            .filter_map(|t| haystack.find(&t.to_lowercase()).map(|pos| (pos, t)))
            .collect();
        // min_by_key keeps the first minimum, so ties fall back to table order.
        let Some(&(_, earliest)) = hits.iter().min_by_key(|(pos, _)| *pos) else {
            continue;
        };
        tracing::debug!(
            category = g.category.as_str(),
            trigger = %earliest,
            hits = hits.len(),
            "constraint category matched"
        );
        out.push(TechnicalRequirement {
            category: g.category,
            trigger_keyword: earliest.clone(),
            derived_rule: g.derived_rule.to_string(),
            matched_keywords: hits.iter().map(|(_, t)| (*t).clone()).collect(),
            checks: g.checks.iter().map(|c| c.to_string()).collect(),
        });
    }
    out
}

//! Principle parsing.
//!
//! Turns the body of a principles section into an ordered list. Order is
//! priority: the first listed principle outranks the rest.

use regex::Regex;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::borrow::Cow;
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principle {
    pub name: String,
    pub description: String,
    /// 1-based position of the item in the source list.
    pub order: usize,
}

/// Principles plus what was dropped along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrincipleList {
    pub principles: Vec<Principle>,
    /// Names of items dropped because an earlier item had the same name.
    pub duplicates: Vec<String>,
}

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*+]|\d+[.)])\s+(.*)$").unwrap());

static STRONG_LEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\*\*(.+?)\*\*|__(.+?)__)(.*)$").unwrap());

/// Spaced dashes that separate a name from its description.
const DASH_BREAKS: &[&str] = &[" - ", " – ", " — "];

/// Strip the list marker; `None` for lines that are not list items.
fn list_item_text(line: &str) -> Option<&str> {
    let caps = LIST_ITEM.captures(line.trim())?;
    let text = caps.get(1)?.as_str().trim();
    if text.is_empty() { None } else { Some(text) }
}

/// First punctuation break: a colon or a spaced dash, whichever comes first.
fn split_at_break(text: &str) -> Option<(&str, &str)> {
    let colon = text.find(':').map(|i| (i, 1));
    let dash = DASH_BREAKS
        .iter()
        .filter_map(|d| text.find(d).map(|i| (i, d.len())))
        .min_by_key(|(i, _)| *i);
    let (at, len) = match (colon, dash) {
        (Some(c), Some(d)) => {
            if c.0 <= d.0 {
                c
            } else {
                d
            }
        }
        (Some(c), None) => c,
        (None, Some(d)) => d,
        (None, None) => return None,
    };
    let name = text[..at].trim();
    let description = text[at + len..].trim();
    if name.is_empty() || description.is_empty() {
        return None;
    }
    Some((name, description))
}

/// Split one item into `(name, description)`.
///
/// A leading strong token names the item only when a colon closes it
/// (`**Name**: ...` or `**Name:** ...`). Any other strong lead is unwrapped and
/// the item splits at its first punctuation break like plain text.
pub fn split_item(text: &str) -> (String, String) {
    let mut plain = Cow::Borrowed(text);
    if let Some(caps) = STRONG_LEAD.captures(text) {
        let inner = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        let rest = caps.get(3).map(|m| m.as_str()).unwrap_or_default().trim_start();
        let name = inner.trim().trim_end_matches(':').trim();
        let colon_closed = inner.trim_end().ends_with(':') || rest.starts_with(':');
        if colon_closed && !name.is_empty() {
            let description = rest.strip_prefix(':').unwrap_or(rest).trim();
            let description = if description.is_empty() {
                name
            } else {
                description
            };
            return (name.to_string(), description.to_string());
        }
        plain = Cow::Owned(format!("{}{}", inner, caps.get(3).map_or("", |m| m.as_str())));
    }

    let plain = plain.trim();
    match split_at_break(plain) {
        Some((name, description)) => (name.to_string(), description.to_string()),
        None => (plain.to_string(), plain.to_string()),
    }
}

fn name_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Parse a principles section body. `None` (no section) yields an empty list.
pub fn parse_principles(body: Option<&str>) -> PrincipleList {
    let Some(body) = body else {
        tracing::debug!("no principles section; continuing with empty list");
        return PrincipleList::default();
    };

    let mut list = PrincipleList::default();
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let items = body.lines().filter_map(list_item_text);

    for (idx, text) in items.enumerate() {
        let (name, description) = split_item(text);
        if !seen.insert(name_key(&name)) {
            tracing::warn!(name = %name, position = idx + 1, "duplicate principle dropped");
            list.duplicates.push(name);
            continue;
        }
        list.principles.push(Principle {
            name,
            description,
            order: idx + 1,
        });
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_name_with_colon_outside() {
        let (name, desc) = split_item("**Learner First**: Every decision prioritizes learners");
        assert_eq!(name, "Learner First");
        assert_eq!(desc, "Every decision prioritizes learners");
    }

    #[test]
    fn bold_name_with_colon_inside() {
        let (name, desc) = split_item("**Simplicity:** Fewer moving parts");
        assert_eq!(name, "Simplicity");
        assert_eq!(desc, "Fewer moving parts");
    }

    #[test]
    fn underscore_strong_and_bold_only_item() {
        assert_eq!(
            split_item("__Open__ - standards first"),
            ("Open".to_string(), "standards first".to_string())
        );
        assert_eq!(
            split_item("**Privacy**"),
            ("Privacy".to_string(), "Privacy".to_string())
        );
    }

    #[test]
    fn strong_lead_without_colon_is_not_the_name() {
        assert_eq!(
            split_item("**Offline** by default: lessons work without network"),
            (
                "Offline by default".to_string(),
                "lessons work without network".to_string()
            )
        );
        assert_eq!(
            split_item("__Calm__ interfaces everywhere"),
            (
                "Calm interfaces everywhere".to_string(),
                "Calm interfaces everywhere".to_string()
            )
        );
        // colon inside the strong token still names the item
        assert_eq!(
            split_item("**Privacy:**"),
            ("Privacy".to_string(), "Privacy".to_string())
        );
    }

    #[test]
    fn plain_item_splits_at_first_break() {
        assert_eq!(
            split_item("Offline first: works without a network"),
            ("Offline first".to_string(), "works without a network".to_string())
        );
        assert_eq!(
            split_item("Fast — sub-second responses: always"),
            ("Fast".to_string(), "sub-second responses: always".to_string())
        );
    }

    #[test]
    fn item_without_name_uses_full_text_for_both() {
        let (name, desc) = split_item("Keep the learner in control");
        assert_eq!(name, "Keep the learner in control");
        assert_eq!(desc, name);
    }

    #[test]
    fn list_markers_are_recognized() {
        assert_eq!(list_item_text("1. one"), Some("one"));
        assert_eq!(list_item_text("  2) two"), Some("two"));
        assert_eq!(list_item_text("- three"), Some("three"));
        assert_eq!(list_item_text("* four"), Some("four"));
        assert_eq!(list_item_text("+ five"), Some("five"));
        assert_eq!(list_item_text("**Bold** paragraph"), None);
        assert_eq!(list_item_text("---"), None);
        assert_eq!(list_item_text("-"), None);
        assert_eq!(list_item_text("plain text"), None);
    }

    #[test]
    fn order_is_preserved() {
        let body = "Intro line\n1. **Learner First**: a\n2. **Simplicity**: b\n\n3. **Privacy**: c\n";
        let list = parse_principles(Some(body));
        let names: Vec<_> = list.principles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Learner First", "Simplicity", "Privacy"]);
        let orders: Vec<_> = list.principles.iter().map(|p| p.order).collect();
        assert_eq!(orders, [1, 2, 3]);
    }

    #[test]
    fn duplicates_keep_first_and_are_reported() {
        let body = "- **Speed**: first\n- **Reach**: r\n- **speed**: second\n";
        let list = parse_principles(Some(body));
        assert_eq!(list.principles.len(), 2);
        assert_eq!(list.principles[0].description, "first");
        assert_eq!(list.principles[1].order, 2);
        assert_eq!(list.duplicates, vec!["speed".to_string()]);
    }

    #[test]
    fn absent_section_is_empty() {
        assert_eq!(parse_principles(None), PrincipleList::default());
        assert!(parse_principles(Some("no list here")).principles.is_empty());
    }
}

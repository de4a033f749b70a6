//! Section extraction for vision documents.
//!
//! Headings are ATX lines (`#` .. `######`). A section opens at the first
//! heading whose text contains one of the target's synonyms and runs until the
//! next heading of equal or higher level. Absence is returned as `None`.

use serde::Serialize;

/// Sections the compiler knows how to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Principles,
    Constraints,
}

impl SectionKind {
    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Principles => "principles",
            SectionKind::Constraints => "constraints",
        }
    }

    /// Lowercase heading synonyms, most specific first.
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            SectionKind::Principles => &["guiding principles", "core principles", "principles"],
            SectionKind::Constraints => &["technical requirements", "constraints", "limitations"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    /// Synonym that matched the heading.
    pub heading_synonyms_matched: String,
    pub heading: String,
    pub level: usize,
    /// 1-based line of the heading.
    pub line: usize,
    pub body: String,
    /// 1-based lines of later headings that also matched and were ignored.
    pub ignored_matches: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Heading<'a> {
    level: usize,
    text: &'a str,
}

/// Parse an ATX heading. Up to three leading spaces are allowed.
fn parse_heading(line: &str) -> Option<Heading<'_>> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];
    let level = rest.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let after = &rest[level..];
    if !after.is_empty() && !after.starts_with([' ', '\t']) {
        return None;
    }
    let text = after.trim().trim_end_matches('#').trim();
    Some(Heading { level, text })
}

fn fence_marker(line: &str) -> Option<&'static str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("```") {
        Some("```")
    } else if trimmed.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

/// Headings of a document with their 0-based line index, skipping fenced code.
fn headings(lines: &[&str]) -> Vec<(usize, usize, String)> {
    let mut out = Vec::new();
    let mut open_fence: Option<&'static str> = None;
    for (idx, line) in lines.iter().enumerate() {
        if let Some(marker) = fence_marker(line) {
            match open_fence {
                Some(open) if open == marker => open_fence = None,
                Some(_) => {}
                None => open_fence = Some(marker),
            }
            continue;
        }
        if open_fence.is_some() {
            continue;
        }
        if let Some(h) = parse_heading(line) {
            out.push((idx, h.level, h.text.to_string()));
        }
    }
    out
}

fn matching_synonym(heading: &str, kind: SectionKind) -> Option<&'static str> {
    let lower = heading.to_lowercase();
    kind.synonyms().iter().copied().find(|s| lower.contains(s))
}

/// Locate `kind` in `content`. First matching heading wins.
pub fn extract_section(content: &str, kind: SectionKind) -> Option<Section> {
    let lines: Vec<&str> = content.lines().collect();
    let all_headings = headings(&lines);

    let mut found: Option<(usize, usize, String, &'static str)> = None;
    let mut ignored = Vec::new();
    for (idx, level, text) in &all_headings {
        if let Some(synonym) = matching_synonym(text, kind) {
            if found.is_none() {
                found = Some((*idx, *level, text.clone(), synonym));
            } else {
                ignored.push(idx + 1);
            }
        }
    }

    let (start, level, heading, synonym) = found?;
    let end = all_headings
        .iter()
        .find(|(idx, l, _)| *idx > start && *l <= level)
        .map(|(idx, _, _)| *idx)
        .unwrap_or(lines.len());

    let body = lines[start + 1..end].join("\n").trim_end().to_string();

    if !ignored.is_empty() {
        tracing::warn!(
            section = kind.name(),
            used_line = start + 1,
            ignored_lines = ?ignored,
            "multiple headings match; using the first"
        );
    }
    tracing::debug!(
        section = kind.name(),
        heading = %heading,
        line = start + 1,
        body_lines = end - start - 1,
        "section extracted"
    );

    Some(Section {
        name: kind.name().to_string(),
        heading_synonyms_matched: synonym.to_string(),
        heading,
        level,
        line: start + 1,
        body,
        ignored_matches: ignored,
    })
}

//! Domain inference by keyword counting over the whole vision document.

const DOMAIN_KEYWORDS: &[(&str, &[&str])] = &[
    ("education", &["learn", "student", "course", "teach", "education"]),
    ("healthcare", &["health", "medical", "patient", "clinical", "hospital"]),
    ("finance", &["financial", "banking", "payment", "transaction", "trading"]),
    ("ecommerce", &["shop", "product", "cart", "checkout", "order"]),
    ("social", &["social", "community", "connect", "share", "network"]),
    ("iot", &["device", "sensor", "embedded", "hardware", "iot"]),
    ("enterprise", &["business", "enterprise", "organization", "workflow"]),
    ("gaming", &["game", "player", "level", "score", "gameplay"]),
    ("media", &["content", "video", "stream", "media", "publish"]),
];

pub const GENERAL_DOMAIN: &str = "general";

/// Highest-scoring domain; ties go to the earlier table row, zero hits to `general`.
pub fn infer_domain(content: &str) -> &'static str {
    let lower = content.to_lowercase();
    let mut best: (&'static str, usize) = (GENERAL_DOMAIN, 0);
    for (domain, keywords) in DOMAIN_KEYWORDS {
        let score: usize = keywords.iter().map(|k| lower.matches(k).count()).sum();
        if score > best.1 {
            best = (domain, score);
        }
    }
    tracing::debug!(domain = best.0, score = best.1, "domain inferred");
    best.0
}

//! Repository-level configuration for charter.
//!
//! Configuration lives in an optional `charter.toml` at the repository root.
//! A missing file means built-in defaults; an unparsable one is a hard error
//! so a typo never silently changes the generated constitution.
//!
//! ```toml
//! [paths]
//! vision = "docs/product/vision.md"
//! output = ".github/agents/pr-merge-constitution.yaml"
//!
//! [triggers]
//! device = ["tablet"]
//! other = ["airplane mode"]
//! ```

use crate::core::error::CharterError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "charter.toml";

/// Where the constitution lands when neither the CLI nor config says otherwise.
pub const DEFAULT_OUTPUT: &str = ".github/agents/pr-merge-constitution.yaml";

/// Vision lookup order, relative to the repository root. First existing file wins.
pub const VISION_CANDIDATES: &[&str] = &[
    "docs/product/vision.md",
    "docs/vision.md",
    "VISION.md",
    "README.md",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharterConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub triggers: TriggersConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Vision document path; skips candidate discovery when set.
    pub vision: Option<PathBuf>,
    /// Constitution output path.
    pub output: Option<PathBuf>,
}

/// Extra trigger strings appended to the built-in keyword groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggersConfig {
    #[serde(default)]
    pub device: Vec<String>,
    #[serde(default)]
    pub performance: Vec<String>,
    #[serde(default)]
    pub storage: Vec<String>,
    #[serde(default)]
    pub other: Vec<String>,
}

/// Load `charter.toml` from the repository root.
pub fn load_config(repo_root: &Path) -> Result<CharterConfig, CharterError> {
    let config_path = repo_root.join(CONFIG_FILE);
    if !config_path.exists() {
        // No config = defaults (not an error)
        return Ok(CharterConfig::default());
    }

    let content = fs::read_to_string(&config_path).map_err(|e| CharterError::Config {
        path: config_path.clone(),
        message: e.to_string(),
    })?;
    let config: CharterConfig = toml::from_str(&content).map_err(|e| CharterError::Config {
        path: config_path.clone(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Anchor a relative path at the repository root.
pub fn resolve_in_repo(repo_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    }
}

impl CharterConfig {
    /// Output path with CLI > config > default precedence.
    pub fn output_path(&self, repo_root: &Path, cli_override: Option<&Path>) -> PathBuf {
        let chosen = cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.paths.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        resolve_in_repo(repo_root, &chosen)
    }

    /// Explicit vision path with CLI > config precedence; `None` means discover.
    pub fn vision_override(&self, repo_root: &Path, cli_override: Option<&Path>) -> Option<PathBuf> {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.paths.vision.clone())
            .map(|p| resolve_in_repo(repo_root, &p))
    }
}

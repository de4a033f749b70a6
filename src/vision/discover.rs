//! Vision document lookup and loading.

use crate::core::config::VISION_CANDIDATES;
use crate::core::error::CharterError;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw vision text. Owned by the documentation store; never written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisionDocument {
    pub path: PathBuf,
    pub content: String,
}

/// Resolve which vision document to read.
///
/// An explicit path is taken as-is (it may not exist; loading reports that).
/// Otherwise the first existing candidate under `repo_root` wins.
pub fn locate_vision(repo_root: &Path, explicit: Option<&Path>) -> Result<PathBuf, CharterError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let tried: Vec<PathBuf> = VISION_CANDIDATES.iter().map(|c| repo_root.join(c)).collect();
    for candidate in &tried {
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "vision discovered");
            return Ok(candidate.clone());
        }
    }
    Err(CharterError::no_vision_found(repo_root, &tried))
}

/// Read the vision as UTF-8. Any failure is a missing-input error naming the path.
pub fn load_vision(path: &Path) -> Result<VisionDocument, CharterError> {
    let content = fs::read_to_string(path).map_err(|source| CharterError::MissingInput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(VisionDocument {
        path: path.to_path_buf(),
        content,
    })
}

/// Path as recorded in metadata: relative to the repo root when inside it.
pub fn display_path(repo_root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(repo_root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

//! Constitution serialization and persistence.
//!
//! Writes are whole-file replacements: content is staged in a sibling temp
//! file, flushed, then renamed over the target. A failed write leaves any
//! previous constitution byte-for-byte intact. Nothing is merged with a prior
//! (possibly hand-edited) file.

use super::model::Constitution;
use crate::core::error::CharterError;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }
}

/// What the writer should do with a rendered constitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace the file at this path.
    Write(PathBuf),
    /// Render only; persistent storage is not touched.
    DryRun,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub bytes: usize,
    /// A previous file existed and was replaced.
    pub replaced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    Written(WriteOutcome),
    Rendered(String),
}

fn yaml_header(source: &str) -> String {
    format!(
        "# PR Merge Constitution\n\
         # This document was automatically generated from the project vision.\n\
         # Source: {source}\n\
         # Regeneration replaces this file entirely; edit the vision, not this file.\n\n"
    )
}

/// Serialize in the requested format. Same input, same bytes.
pub fn render(constitution: &Constitution, format: Format) -> Result<String, CharterError> {
    match format {
        Format::Yaml => {
            let body = serde_yaml::to_string(constitution)
                .map_err(|e| CharterError::Render(e.to_string()))?;
            Ok(format!(
                "{}{}",
                yaml_header(&constitution.metadata.source_vision_path),
                body
            ))
        }
        Format::Json => {
            let body = serde_json::to_string_pretty(constitution)
                .map_err(|e| CharterError::Render(e.to_string()))?;
            Ok(format!("{}\n", body))
        }
    }
}

/// Removes the staged temp file unless the rename went through.
struct StagedFile {
    path: PathBuf,
    committed: bool,
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "constitution".to_string());
    target.with_file_name(format!(".{}.tmp", name))
}

/// Atomically replace `path` with `content`, creating parent directories.
pub fn write_atomic(path: &Path, content: &str) -> Result<WriteOutcome, CharterError> {
    let fail = |source: std::io::Error| CharterError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(fail)?;
    }

    let replaced = path.exists();
    let mut staged = StagedFile {
        path: staging_path(path),
        committed: false,
    };

    {
        let mut file = File::create(&staged.path).map_err(fail)?;
        file.write_all(content.as_bytes()).map_err(fail)?;
        file.sync_all().map_err(fail)?;
    }
    fs::rename(&staged.path, path).map_err(fail)?;
    staged.committed = true;

    tracing::debug!(path = %path.display(), bytes = content.len(), replaced, "constitution written");
    Ok(WriteOutcome {
        path: path.to_path_buf(),
        bytes: content.len(),
        replaced,
    })
}

/// Render and either persist or hand back the text.
pub fn emit(
    constitution: &Constitution,
    format: Format,
    mode: &WriteMode,
) -> Result<Emitted, CharterError> {
    let rendered = render(constitution, format)?;
    match mode {
        WriteMode::DryRun => Ok(Emitted::Rendered(rendered)),
        WriteMode::Write(path) => write_atomic(path, &rendered).map(Emitted::Written),
    }
}

//! The vision-to-constitution pipeline.
//!
//! locate → read → extract → parse/classify → assemble → write or render.
//! Only the two I/O edges can fail: reading the vision and writing the output.

use crate::constitution::{self, Constitution, Emitted, Format, SourceInfo, WriteMode};
use crate::core::config::{self, CharterConfig};
use crate::core::error::CharterError;
use crate::core::time;
use crate::vision::constraints::TriggerTable;
use crate::vision::discover::{self, VisionDocument};
use crate::vision::{self, VisionFindings};
use std::path::{Path, PathBuf};

/// Findings and the constitution assembled from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub findings: VisionFindings,
    pub constitution: Constitution,
}

/// Compile vision text into a constitution without touching the filesystem.
pub fn compile_str(
    content: &str,
    source_path: &str,
    table: &TriggerTable,
    generated_at: &str,
) -> Generation {
    let findings = vision::analyze(content, table);
    let source = SourceInfo::from_content(source_path, content);
    let constitution = constitution::assemble(&findings, &source, generated_at);
    Generation {
        findings,
        constitution,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub vision: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: Format,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub vision_path: PathBuf,
    /// Target path; in dry-run mode this is where a real run would write.
    pub output_path: PathBuf,
    pub generation: Generation,
    pub emitted: Emitted,
}

#[derive(Debug, Clone)]
pub struct Generator {
    repo_root: PathBuf,
    config: CharterConfig,
    table: TriggerTable,
}

impl Generator {
    pub fn new(repo_root: impl Into<PathBuf>, config: CharterConfig) -> Self {
        let table = TriggerTable::with_extras(&config.triggers);
        Generator {
            repo_root: repo_root.into(),
            config,
            table,
        }
    }

    /// Generator for `repo_root` with its `charter.toml` applied.
    pub fn from_repo(repo_root: impl Into<PathBuf>) -> Result<Self, CharterError> {
        let repo_root = repo_root.into();
        let config = config::load_config(&repo_root)?;
        Ok(Generator::new(repo_root, config))
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn trigger_table(&self) -> &TriggerTable {
        &self.table
    }

    pub fn output_path(&self, cli_override: Option<&Path>) -> PathBuf {
        self.config.output_path(&self.repo_root, cli_override)
    }

    /// Locate and read the vision document.
    pub fn load_vision(&self, cli_override: Option<&Path>) -> Result<VisionDocument, CharterError> {
        let explicit = self.config.vision_override(&self.repo_root, cli_override);
        let path = discover::locate_vision(&self.repo_root, explicit.as_deref())?;
        discover::load_vision(&path)
    }

    pub fn compile(&self, doc: &VisionDocument, generated_at: &str) -> Generation {
        let source_path = discover::display_path(&self.repo_root, &doc.path);
        compile_str(&doc.content, &source_path, &self.table, generated_at)
    }

    /// Full run. Nothing is written when the vision cannot be read.
    pub fn run(&self, opts: &GenerateOptions) -> Result<GenerateReport, CharterError> {
        let doc = self.load_vision(opts.vision.as_deref())?;
        tracing::info!(path = %doc.path.display(), bytes = doc.content.len(), "vision loaded");

        let generation = self.compile(&doc, &time::now_epoch_z());
        let output_path = self.output_path(opts.output.as_deref());
        let mode = if opts.dry_run {
            WriteMode::DryRun
        } else {
            WriteMode::Write(output_path.clone())
        };
        let emitted = constitution::writer::emit(&generation.constitution, opts.format, &mode)?;

        Ok(GenerateReport {
            vision_path: doc.path,
            output_path,
            generation,
            emitted,
        })
    }
}

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CharterError {
    #[error("vision document not found or unreadable: {path}: {source}")]
    MissingInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write constitution to {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },
    #[error("render error: {0}")]
    Render(String),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl CharterError {
    /// Error for a vision lookup that found no candidate at all.
    pub fn no_vision_found(repo_root: &std::path::Path, tried: &[PathBuf]) -> Self {
        let listed = tried
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        CharterError::MissingInput {
            path: repo_root.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::NotFound,
                format!("no vision document found (tried: {listed}); pass --vision <PATH>"),
            ),
        }
    }
}

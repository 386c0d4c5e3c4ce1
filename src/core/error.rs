use std::path::PathBuf;
use thiserror::Error;

pub type GenResult<T> = Result<T, GenError>;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WalkDir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// A checksum sidecar exists on disk but its contents are not valid
    /// base64. The manifest cannot be trusted if any hash is unreadable,
    /// so this aborts the whole run.
    #[error("Malformed checksum sidecar {}: {}", .path.display(), .detail)]
    Sidecar { path: PathBuf, detail: String },

    /// A sidecar file is not nested as `<name>/<version>/<file>` under the
    /// package cache, so its package identity cannot be derived.
    #[error("Unexpected package cache layout at {}", .0.display())]
    Layout(PathBuf),

    #[error("Sandbox error: {0}")]
    Sandbox(String),
}

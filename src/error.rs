use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum CanopyError {
    #[error("cannot access '{path}': no such file or directory")]
    DirectoryNotFound { path: PathBuf },
    #[error("cannot open directory '{path}': permission denied")]
    PermissionDenied { path: PathBuf },
    #[error("cannot list '{path}': not a directory")]
    NotADirectory { path: PathBuf },
    #[error("cannot classify '{path}': no such file or directory")]
    NotFound { path: PathBuf },
    #[error("metadata unavailable for {path}: {source}")]
    MetadataUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
impl CanopyError {
    /// Maps a failure to read a directory listing onto the typed variants.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            ErrorKind::NotFound => CanopyError::DirectoryNotFound { path },
            ErrorKind::PermissionDenied => CanopyError::PermissionDenied { path },
            _ => CanopyError::Io { path, source },
        }
    }
    /// Maps a failed `lstat` of a single entry.
    pub(crate) fn metadata(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            ErrorKind::NotFound => CanopyError::NotFound { path },
            _ => CanopyError::MetadataUnavailable { path, source },
        }
    }
    /// Process exit code for this error when it reaches the CLI boundary.
    pub fn exit_code(&self) -> i32 {
        match self {
            CanopyError::DirectoryNotFound { .. } | CanopyError::NotFound { .. } => 2,
            _ => 1,
        }
    }
}

use fileshare_core::domain::DomainError;
use thiserror::Error;

/// Errors raised by the share root, the index store and the folder services.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("share root is not a readable directory: {0}")]
    InvalidRoot(String),

    #[error("path escapes the share root: {0}")]
    PathOutsideRoot(String),

    #[error("folder not found: {0}")]
    FolderNotFound(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("corrupt index file {path}: {source}")]
    CorruptIndex {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DomainError> for ShareError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::PathOutsideRoot(path) => Self::PathOutsideRoot(path),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShareError>;

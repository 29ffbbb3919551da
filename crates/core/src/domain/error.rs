use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("path escapes the share root: {0}")]
    PathOutsideRoot(String),
}

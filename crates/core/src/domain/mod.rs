mod entry_kind;
mod error;
mod relative_path;

pub use entry_kind::{EntryKind, looks_like_file};
pub use error::DomainError;
pub use relative_path::RelativePath;

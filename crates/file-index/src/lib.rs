//! Index, search and navigation over a shared directory tree.
//!
//! [`ShareRoot`] owns the containment checks and hosts the per-request folder
//! services ([`ShareRoot::navigate`], [`ShareRoot::list_folder`]); [`Index`] is
//! the process-wide path list used by [`Index::search`].

pub mod error;
pub mod index;
pub mod listing;
pub mod navigation;
pub mod root;
pub mod search;

pub use error::{Result, ShareError};
pub use fileshare_core::domain::{EntryKind, RelativePath, looks_like_file};
pub use index::{Index, LogProgress, NoProgress, ProgressObserver};
pub use navigation::{Navigation, OpenedFolders};
pub use root::ShareRoot;

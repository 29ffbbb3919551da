//! Shared application state.

use fileshare_index::{Index, ShareRoot};

/// Built once before the listener binds and shared read-only by every handler.
pub struct AppState {
    /// Directory being served.
    pub root: ShareRoot,
    /// Path index loaded or built at startup.
    pub index: Index,
}

impl AppState {
    pub fn new(root: ShareRoot, index: Index) -> Self {
        Self { root, index }
    }
}

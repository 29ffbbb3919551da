//! HTTP routes.

pub mod share;
pub mod state;

pub use share::create_share_router;
pub use state::AppState;

//! Substring search over the index.

use crate::index::Index;

impl Index {
    /// Entries whose path contains `query`, ignoring case, in index order.
    ///
    /// An empty query matches nothing; callers decide what an empty search means.
    pub fn search(&self, query: &str) -> Vec<&str> {
        if query.is_empty() {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        self.entries()
            .iter()
            .filter(|entry| entry.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }
}

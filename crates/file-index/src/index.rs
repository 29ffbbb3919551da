//! Flat path index of the shared tree and its on-disk cache.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::{Result, ShareError};
use crate::root::ShareRoot;

/// Receives indexing progress as a percentage in `0.0..=100.0`.
pub trait ProgressObserver {
    fn on_progress(&mut self, percent: f64);
}

/// Discards progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _percent: f64) {}
}

/// Logs one line each time another tenth of the tree has been indexed.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress {
    last_decile: u8,
}

impl ProgressObserver for LogProgress {
    fn on_progress(&mut self, percent: f64) {
        let decile = (percent / 10.0).floor().clamp(0.0, 10.0) as u8;
        if decile > self.last_decile {
            self.last_decile = decile;
            info!(percent = u32::from(decile) * 10, "indexing");
        }
    }
}

/// Every file and directory below the root, as `/`-separated relative paths.
///
/// Built once at startup and read-only afterwards. Entries keep walk order and
/// are never refreshed, so the index goes stale when the tree changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Index {
    entries: Vec<String>,
}

impl Index {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(root: &ShareRoot) -> Self {
        Self::build_with_progress(root, &mut NoProgress)
    }

    /// Walks the whole tree below `root`. Unreadable entries are logged and skipped.
    pub fn build_with_progress(root: &ShareRoot, observer: &mut dyn ProgressObserver) -> Self {
        let base = root.path();
        info!(root = %base.display(), "building index");

        let total = walker(base).into_iter().filter_map(|e| e.ok()).count();
        let mut entries = Vec::with_capacity(total);
        let mut processed = 0usize;

        for entry in walker(base) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry while indexing");
                    continue;
                }
            };

            if let Some(relative) = relative_entry(base, entry.path()) {
                entries.push(relative);
            }

            processed += 1;
            if total > 0 {
                let percent = (processed as f64 / total as f64 * 100.0).min(100.0);
                observer.on_progress(percent);
            }
        }

        info!(entries = entries.len(), "index built");
        Self { entries }
    }

    /// Writes the index as a JSON array, replacing any previous file.
    pub fn save(&self, destination: &Path) -> Result<()> {
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec(self).map_err(io::Error::other)?;
        let tmp_path = destination.with_extension("tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, destination)?;

        info!(path = %destination.display(), entries = self.len(), "index saved");
        Ok(())
    }

    pub fn load(source: &Path) -> Result<Self> {
        let bytes = fs::read(source)?;
        serde_json::from_slice(&bytes).map_err(|source_err| ShareError::CorruptIndex {
            path: source.display().to_string(),
            source: source_err,
        })
    }

    /// Loads `index_file` when present, otherwise builds from `root` and saves.
    ///
    /// The cached file is trusted as-is: nothing checks it against the tree.
    pub fn load_or_build(
        root: &ShareRoot,
        index_file: &Path,
        observer: &mut dyn ProgressObserver,
    ) -> Result<Self> {
        if index_file.exists() {
            info!(path = %index_file.display(), "index found, loading");
            let index = Self::load(index_file)?;
            info!(entries = index.len(), "index loaded");
            return Ok(index);
        }

        info!(path = %index_file.display(), "index not found, creating");
        let index = Self::build_with_progress(root, observer);
        index.save(index_file)?;
        Ok(index)
    }
}

impl FromIterator<String> for Index {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn walker(base: &Path) -> WalkDir {
    WalkDir::new(base).min_depth(1).sort_by_file_name()
}

fn relative_entry(base: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}

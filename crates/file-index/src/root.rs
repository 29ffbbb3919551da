//! The shared directory and path containment checks.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fileshare_core::domain::RelativePath;
use tracing::warn;

use crate::error::{Result, ShareError};

/// Canonical root of the shared tree.
///
/// Every filesystem access made on behalf of a request goes through
/// [`ShareRoot::resolve`], which refuses anything that lands outside the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRoot {
    path: PathBuf,
}

impl ShareRoot {
    /// Canonicalizes `dir`. Fails unless it is an existing directory.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let path = dir
            .canonicalize()
            .map_err(|_| ShareError::InvalidRoot(dir.display().to_string()))?;

        if !path.is_dir() {
            return Err(ShareError::InvalidRoot(dir.display().to_string()));
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Maps a validated relative path to an absolute one.
    ///
    /// Existing targets are canonicalized and must stay below the root, which
    /// catches symlinks pointing elsewhere. Missing targets are returned as joined
    /// so callers can decide whether absence is an error.
    pub fn resolve(&self, relative: &RelativePath) -> Result<PathBuf> {
        let joined = relative
            .segments()
            .iter()
            .fold(self.path.clone(), |acc, segment| acc.join(segment));

        match joined.canonicalize() {
            Ok(canonical) if canonical.starts_with(&self.path) => Ok(canonical),
            Ok(canonical) => {
                warn!(
                    requested = %relative,
                    target = %canonical.display(),
                    "rejected path resolving outside the share root"
                );
                Err(ShareError::PathOutsideRoot(relative.to_string()))
            }
            Err(_) => Ok(joined),
        }
    }

    /// Parses a raw request path and resolves it.
    pub fn resolve_str(&self, raw: &str) -> Result<(RelativePath, PathBuf)> {
        let relative = RelativePath::parse(raw)?;
        let absolute = self.resolve(&relative)?;
        Ok((relative, absolute))
    }

    /// Absolute path of a regular file to hand to the download transfer.
    pub fn download_target(&self, raw: &str) -> Result<PathBuf> {
        let (relative, absolute) = self.resolve_str(raw)?;
        if relative.is_root() || !absolute.is_file() {
            return Err(ShareError::FileNotFound(relative.to_string()));
        }
        Ok(absolute)
    }

    /// Sorted names of the root's immediate subdirectories.
    pub fn top_level_folders(&self) -> Result<Vec<String>> {
        Ok(subdirectories(&self.path)?)
    }
}

/// Sorted names of the immediate subdirectories of `dir`, following symlinks.
pub(crate) fn subdirectories(dir: &Path) -> io::Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    Ok(names)
}

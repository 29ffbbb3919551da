//! Sidebar state for a requested folder.

use fileshare_core::domain::RelativePath;
use tracing::{debug, warn};

use crate::error::Result;
use crate::root::{ShareRoot, subdirectories};

/// Ancestor folder name to its immediate subfolder names, in path order.
///
/// Keys are bare segment names. A name repeated along the path keeps its first
/// position and takes the deeper folder's children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenedFolders {
    entries: Vec<(String, Vec<String>)>,
}

impl OpenedFolders {
    pub fn insert(&mut self, name: String, subfolders: Vec<String>) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = subfolders,
            None => self.entries.push((name, subfolders)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, subfolders)| subfolders.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, subfolders)| (name.as_str(), subfolders.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything the sidebar needs to render a folder page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    pub root_folders: Vec<String>,
    pub opened_folders: OpenedFolders,
    /// Last segment of the requested path, empty for the root.
    pub current_folder: String,
}

impl ShareRoot {
    /// Builds the sidebar state for `requested`.
    ///
    /// Escaping paths fail before any disk access. Ancestors that are missing,
    /// not directories or unreadable are left out instead of failing, so a stale
    /// link still renders a page.
    pub fn navigate(&self, requested: &str) -> Result<Navigation> {
        let path = RelativePath::parse(requested)?;
        let opened_folders = self.opened_folders(&path)?;

        Ok(Navigation {
            root_folders: self.top_level_folders()?,
            opened_folders,
            current_folder: path.file_name().unwrap_or_default().to_string(),
        })
    }

    pub fn opened_folders(&self, path: &RelativePath) -> Result<OpenedFolders> {
        let mut opened = OpenedFolders::default();

        for prefix in path.prefixes() {
            let Some(name) = prefix.file_name().map(str::to_string) else {
                continue;
            };
            let dir = self.resolve(&prefix)?;
            if !dir.is_dir() {
                debug!(prefix = %prefix, "skipping missing ancestor");
                continue;
            }

            match subdirectories(&dir) {
                Ok(subfolders) => opened.insert(name, subfolders),
                Err(err) => warn!(prefix = %prefix, error = %err, "skipping unreadable ancestor"),
            }
        }

        Ok(opened)
    }
}

use std::fmt;

/// Presentation kind of a listed name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Folder,
}

impl EntryKind {
    /// Classifies `name` by its final path segment using [`looks_like_file`].
    pub fn of(name: &str) -> Self {
        let last = name.rsplit('/').next().unwrap_or(name);
        if looks_like_file(last) {
            Self::File
        } else {
            Self::Folder
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Folder => f.write_str("folder"),
        }
    }
}

/// Name-based file detection: anything containing a `.` is a file.
///
/// Extensionless files (`Makefile`, `LICENSE`) are reported as folders and dotted
/// directory names (`v1.2`) as files. Nothing is stored about entry types, so every
/// caller that needs the distinction goes through here and can be switched to a
/// `stat`-based check in one place.
pub fn looks_like_file(name: &str) -> bool {
    name.contains('.')
}

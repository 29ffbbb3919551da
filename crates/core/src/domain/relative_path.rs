use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// A `/`-separated path below the share root, normalized and checked without
/// touching the filesystem.
///
/// Empty and `.` segments are dropped and `..` pops the previous segment. A `..`
/// that would climb above the root, an absolute path or an embedded NUL byte is
/// rejected with [`DomainError::PathOutsideRoot`]. The empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RelativePath {
    segments: Vec<String>,
}

impl RelativePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let outside = || DomainError::PathOutsideRoot(raw.to_string());

        if raw.contains('\0') || raw.starts_with('/') {
            return Err(outside());
        }
        if cfg!(windows) && (raw.contains('\\') || raw.contains(':')) {
            return Err(outside());
        }

        let mut segments: Vec<String> = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        return Err(outside());
                    }
                }
                name => segments.push(name.to_string()),
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Cumulative ancestors from the first segment down to `self`, excluding the root.
    pub fn prefixes(&self) -> impl Iterator<Item = RelativePath> + '_ {
        (1..=self.segments.len()).map(|len| Self {
            segments: self.segments[..len].to_vec(),
        })
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl FromStr for RelativePath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

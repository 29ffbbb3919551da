//! Folder contents.

use std::fs;

use tracing::debug;

use crate::error::{Result, ShareError};
use crate::root::ShareRoot;

impl ShareRoot {
    /// Names of the immediate children of `folder`, sorted by byte order.
    ///
    /// Files and directories are not told apart here; presentation uses
    /// [`fileshare_core::domain::looks_like_file`].
    pub fn list_folder(&self, folder: &str) -> Result<Vec<String>> {
        let (relative, dir) = self.resolve_str(folder)?;
        if !dir.is_dir() {
            return Err(ShareError::FolderNotFound(relative.to_string()));
        }

        let mut names: Vec<String> = fs::read_dir(&dir)?
            .flatten()
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        debug!(folder = %relative, count = names.len(), "listed folder");
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::error::ShareError;
    use crate::root::ShareRoot;

    #[test]
    fn children_are_sorted_lexicographically() {
        let temp = TempDir::new().expect("tempdir");
        fs::create_dir_all(temp.path().join("f/a")).expect("create f/a");
        fs::write(temp.path().join("f/b.txt"), "b").expect("write b.txt");
        fs::write(temp.path().join("f/c.md"), "c").expect("write c.md");
        let root = ShareRoot::new(temp.path()).expect("root should open");

        assert_eq!(
            root.list_folder("f").expect("list"),
            vec!["a", "b.txt", "c.md"]
        );
    }

    #[test]
    fn uppercase_sorts_before_lowercase() {
        let temp = TempDir::new().expect("tempdir");
        fs::create_dir_all(temp.path().join("a")).expect("create a");
        fs::create_dir_all(temp.path().join("B")).expect("create B");
        let root = ShareRoot::new(temp.path()).expect("root should open");

        assert_eq!(root.list_folder("").expect("list root"), vec!["B", "a"]);
    }

    #[test]
    fn missing_folder_is_not_found() {
        let temp = TempDir::new().expect("tempdir");
        let root = ShareRoot::new(temp.path()).expect("root should open");

        let err = root.list_folder("nope").expect_err("missing folder");
        assert!(matches!(err, ShareError::FolderNotFound(name) if name == "nope"));
    }

    #[test]
    fn file_is_not_a_folder() {
        let temp = TempDir::new().expect("tempdir");
        fs::write(temp.path().join("a.txt"), "a").expect("write file");
        let root = ShareRoot::new(temp.path()).expect("root should open");

        assert!(matches!(
            root.list_folder("a.txt"),
            Err(ShareError::FolderNotFound(_))
        ));
    }

    #[test]
    fn escaping_path_is_rejected() {
        let temp = TempDir::new().expect("tempdir");
        let root = ShareRoot::new(temp.path()).expect("root should open");

        assert!(matches!(
            root.list_folder("../../etc"),
            Err(ShareError::PathOutsideRoot(_))
        ));
    }
}

//! Recursive directory traversal for model asset folders.
//!
//! This module provides [`DirectoryWalker`], which uses the `ignore` crate to
//! walk an asset folder and collect every file whose extension is accepted.
//!
//! # Features
//!
//! - Visits every entry: hidden files count and `.gitignore` is not honored
//! - Follows symbolic links, the way a plain `stat` would
//! - Matches extensions case-insensitively
//! - Returns paths relative to the walked folder
//! - Skips accepted files whose path is not UTF-8, with a warning
//!
//! Result order follows the directory listing. It is not sorted and differs
//! between platforms.
//!
//! # Examples
//!
//! ```ignore
//! use cc_core::ExtensionSet;
//! use cc_scanner::DirectoryWalker;
//! use camino::Utf8Path;
//!
//! let exts = ExtensionSet::from_iter([".safetensors", ".ckpt"]);
//! let walker = DirectoryWalker::new(Utf8Path::new("/models/checkpoints"), exts)?;
//!
//! for path in walker.walk()? {
//!     println!("Found: {path}");
//! }
//! ```

use std::ffi::OsStr;
use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use cc_core::ExtensionSet;
use ignore::WalkBuilder;
use tracing::warn;

use crate::error::ScanError;

/// A walker that lists accepted files below one root folder.
#[derive(Debug, Clone)]
pub struct DirectoryWalker {
    /// The root directory to walk.
    root: Utf8PathBuf,
    /// Extensions to keep.
    extensions: ExtensionSet,
    /// Whether to follow symbolic links.
    follow_links: bool,
}

impl DirectoryWalker {
    /// Creates a new walker for `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NotFound`] if `root` doesn't exist and
    /// [`ScanError::NotADirectory`] if it isn't a directory.
    pub fn new(root: &Utf8Path, extensions: ExtensionSet) -> Result<Self, ScanError> {
        if !root.exists() {
            return Err(ScanError::NotFound(root.to_owned()));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_owned()));
        }

        Ok(Self {
            root: root.to_owned(),
            extensions,
            follow_links: true,
        })
    }

    /// Configures whether to follow symbolic links.
    ///
    /// Links are followed by default.
    #[must_use]
    pub const fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Collects the relative paths of all accepted files.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Walk`] if any part of the tree cannot be read.
    pub fn walk(&self) -> Result<Vec<Utf8PathBuf>, ScanError> {
        let mut paths = Vec::new();

        for result in self.build_walker() {
            let entry = result?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if !self.accepts(path) {
                continue;
            }

            let Some(utf8_path) = Utf8Path::from_path(path) else {
                let err = ScanError::NonUtf8Path(path.to_owned());
                warn!(root = %self.root, error = %err, "Skipping file with a non-UTF-8 path");
                continue;
            };

            let relative = utf8_path.strip_prefix(&self.root).unwrap_or(utf8_path);
            paths.push(relative.to_owned());
        }

        Ok(paths)
    }

    /// Checks the extension before the path is converted to UTF-8.
    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.extensions.matches_extension(ext))
    }

    /// Builds the ignore walker with every filter disabled.
    fn build_walker(&self) -> ignore::Walk {
        WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(self.follow_links)
            .threads(1)
            .build()
    }

    /// Returns the root directory being walked.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// Walks `root` and returns accepted files relative to it.
///
/// Shorthand for [`DirectoryWalker::new`] followed by
/// [`DirectoryWalker::walk`].
///
/// # Errors
///
/// See [`DirectoryWalker::new`] and [`DirectoryWalker::walk`].
pub fn walk(root: &Utf8Path, extensions: &ExtensionSet) -> Result<Vec<Utf8PathBuf>, ScanError> {
    DirectoryWalker::new(root, extensions.clone())?.walk()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_owned()).expect("Invalid path");
        (dir, root)
    }

    fn touch(root: &Utf8Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent");
        }
        fs::write(path, b"").expect("Failed to write file");
    }

    fn as_set(paths: Vec<Utf8PathBuf>) -> BTreeSet<String> {
        paths.into_iter().map(Utf8PathBuf::into_string).collect()
    }

    #[test]
    fn test_walk_filters_extensions_case_insensitively() {
        let (_dir, root) = temp_root();
        touch(&root, "a.json");
        touch(&root, "b.JSON");
        touch(&root, "c.txt");

        let found = walk(&root, &ExtensionSet::from_iter([".json"])).expect("walk");
        let expected: BTreeSet<String> = ["a.json", "b.JSON"].map(str::to_owned).into();
        assert_eq!(as_set(found), expected);
    }

    #[test]
    fn test_walk_recurses_and_returns_relative_paths() {
        let (_dir, root) = temp_root();
        touch(&root, "base.safetensors");
        touch(&root, "sdxl/refiner.safetensors");
        touch(&root, "sdxl/anime/deep/model.ckpt");
        touch(&root, "sdxl/readme.md");

        let exts = ExtensionSet::from_iter([".safetensors", ".ckpt"]);
        let found = walk(&root, &exts).expect("walk");
        let expected: BTreeSet<String> = [
            "base.safetensors",
            "sdxl/refiner.safetensors",
            "sdxl/anime/deep/model.ckpt",
        ]
        .map(str::to_owned)
        .into();
        assert_eq!(as_set(found), expected);
    }

    #[test]
    fn test_walk_never_returns_directories() {
        let (_dir, root) = temp_root();
        fs::create_dir_all(root.join("looks_like.json")).expect("Failed to create dir");
        touch(&root, "looks_like.json/inner.json");

        let found = walk(&root, &ExtensionSet::from_iter([".json"])).expect("walk");
        assert_eq!(found, vec![Utf8PathBuf::from("looks_like.json/inner.json")]);
    }

    #[test]
    fn test_walk_includes_hidden_and_ignored_files() {
        let (_dir, root) = temp_root();
        fs::write(root.join(".gitignore"), "*.pt\n").expect("write");
        touch(&root, "ignored.pt");
        touch(&root, ".hidden/model.pt");

        let found = walk(&root, &ExtensionSet::from_iter([".pt"])).expect("walk");
        let expected: BTreeSet<String> =
            ["ignored.pt", ".hidden/model.pt"].map(str::to_owned).into();
        assert_eq!(as_set(found), expected);
    }

    #[test]
    fn test_walk_empty_folder() {
        let (_dir, root) = temp_root();
        let found = walk(&root, &ExtensionSet::from_iter([".pt"])).expect("walk");
        assert!(found.is_empty());
    }

    #[test]
    fn test_walk_missing_root_is_not_found() {
        let (_dir, root) = temp_root();
        let missing = root.join("does-not-exist");

        let result = walk(&missing, &ExtensionSet::from_iter([".pt"]));
        match result {
            Err(ScanError::NotFound(path)) => assert_eq!(path, missing),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_walk_file_root_is_not_a_directory() {
        let (_dir, root) = temp_root();
        touch(&root, "model.pt");

        let result = walk(&root.join("model.pt"), &ExtensionSet::from_iter([".pt"]));
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_walk_tolerates_non_utf8_names() {
        use std::os::unix::ffi::OsStrExt;

        let (dir, root) = temp_root();
        touch(&root, "good.safetensors");
        fs::write(dir.path().join(OsStr::from_bytes(b"notes-\xff.txt")), b"").expect("write");
        fs::write(dir.path().join(OsStr::from_bytes(b"model-\xff.safetensors")), b"")
            .expect("write");

        let found = walk(&root, &ExtensionSet::from_iter([".safetensors"])).expect("walk");
        assert_eq!(found, vec![Utf8PathBuf::from("good.safetensors")]);
    }

    #[test]
    fn test_with_follow_links() {
        let (_dir, root) = temp_root();
        let walker = DirectoryWalker::new(&root, ExtensionSet::default())
            .expect("walker")
            .with_follow_links(false);
        assert!(!walker.follow_links);
        assert_eq!(walker.root(), root.as_path());
    }
}

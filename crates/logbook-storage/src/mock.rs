//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::storage::{SourceRef, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores sources and raw text in memory, in insertion order. Use the
/// builder methods to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use logbook_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("guide.md", "---\ntitle: Guide\n---\n# Guide")
///     .with_unreadable("broken.md");
///
/// let sources = storage.scan().unwrap();
/// assert_eq!(sources.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    sources: RwLock<Vec<SourceRef>>,
    contents: RwLock<HashMap<PathBuf, String>>,
    unreadable: RwLock<HashSet<PathBuf>>,
    scan_fails: RwLock<bool>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source with raw text.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, rel_path: impl Into<PathBuf>, raw: impl Into<String>) -> Self {
        let rel_path: PathBuf = rel_path.into();
        self.sources
            .write()
            .unwrap()
            .push(SourceRef::from_rel_path(&rel_path));
        self.contents.write().unwrap().insert(rel_path, raw.into());
        self
    }

    /// Add a source that is listed by `scan()` but fails on `read()`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unreadable(self, rel_path: impl Into<PathBuf>) -> Self {
        let rel_path: PathBuf = rel_path.into();
        self.sources
            .write()
            .unwrap()
            .push(SourceRef::from_rel_path(&rel_path));
        self.unreadable.write().unwrap().insert(rel_path);
        self
    }

    /// Make `scan()` fail.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failing_scan(self) -> Self {
        *self.scan_fails.write().unwrap() = true;
        self
    }

    /// Replace the raw text of an existing source.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_content(&self, rel_path: impl Into<PathBuf>, raw: impl Into<String>) {
        self.contents
            .write()
            .unwrap()
            .insert(rel_path.into(), raw.into());
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<SourceRef>, StorageError> {
        if *self.scan_fails.read().unwrap() {
            return Err(StorageError::new(StorageErrorKind::Other).with_backend(BACKEND));
        }
        Ok(self.sources.read().unwrap().clone())
    }

    fn read(&self, source: &SourceRef) -> Result<String, StorageError> {
        if self.unreadable.read().unwrap().contains(&source.rel_path) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_backend(BACKEND)
                .with_path(&source.rel_path));
        }
        self.contents
            .read()
            .unwrap()
            .get(&source.rel_path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(&source.rel_path).with_backend(BACKEND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_returns_insertion_order() {
        let storage = MockStorage::new()
            .with_file("b.md", "B")
            .with_file("a/c.md", "C")
            .with_file("a.md", "A");

        let sources = storage.scan().unwrap();
        let paths: Vec<_> = sources.iter().map(|s| s.segments.join("/")).collect();

        assert_eq!(paths, vec!["b", "a/c", "a"]);
    }

    #[test]
    fn test_read_returns_content() {
        let storage = MockStorage::new().with_file("guide.md", "# Guide");
        let source = SourceRef::from_rel_path("guide.md");

        assert_eq!(storage.read(&source).unwrap(), "# Guide");
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let storage = MockStorage::new();
        let source = SourceRef::from_rel_path("missing.md");

        let err = storage.read(&source).unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_unreadable_is_listed_but_fails() {
        let storage = MockStorage::new().with_unreadable("broken.md");

        let sources = storage.scan().unwrap();
        assert_eq!(sources.len(), 1);

        let err = storage.read(&sources[0]).unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
    }

    #[test]
    fn test_failing_scan() {
        let storage = MockStorage::new().with_file("a.md", "A").with_failing_scan();

        assert!(storage.scan().is_err());
    }

    #[test]
    fn test_set_content_replaces_text() {
        let storage = MockStorage::new().with_file("a.md", "old");
        storage.set_content("a.md", "new");

        let source = SourceRef::from_rel_path("a.md");
        assert_eq!(storage.read(&source).unwrap(), "new");
    }
}

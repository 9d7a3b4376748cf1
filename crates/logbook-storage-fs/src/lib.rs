//! Filesystem storage implementation for the logbook journal engine.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](logbook_storage::Storage) trait. It enumerates every `*.md`
//! file below a content root and reads raw document text on demand.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use logbook_storage::Storage;
//! use logbook_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("content/posts"));
//! for source in storage.scan()? {
//!     println!("{}", source.segments.join("/"));
//! }
//! ```

mod scanner;

use std::fs;
use std::path::{Component, Path, PathBuf};

use logbook_storage::{SourceRef, Storage, StorageError, StorageErrorKind};
use scanner::Scanner;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Scans a content directory recursively for markdown files. Hidden files
/// and directories (leading `.`) are ignored. Nothing is cached: every
/// `scan()` and `read()` goes to the filesystem, so each resolution pass
/// sees the files as they are at that moment.
pub struct FsStorage {
    /// Root directory for document storage.
    source_dir: PathBuf,
    /// Scanner for document discovery.
    scanner: Scanner,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        let scanner = Scanner::new(source_dir.clone());
        Self {
            source_dir,
            scanner,
        }
    }

    /// Root directory this storage reads from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Validate that a relative path stays inside the content root.
    ///
    /// Rejects absolute paths and paths containing `..` components.
    fn validate_path(rel_path: &Path) -> Result<(), StorageError> {
        let escapes = rel_path.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(rel_path)
                .with_backend(BACKEND));
        }
        Ok(())
    }
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<SourceRef>, StorageError> {
        let paths = self.scanner.scan().map_err(|e| {
            StorageError::io(e, Some(self.source_dir.clone())).with_backend(BACKEND)
        })?;

        tracing::debug!(
            source_dir = %self.source_dir.display(),
            count = paths.len(),
            "Scanned content directory"
        );

        Ok(paths.iter().map(SourceRef::from_rel_path).collect())
    }

    fn read(&self, source: &SourceRef) -> Result<String, StorageError> {
        Self::validate_path(&source.rel_path)?;
        let full_path = self.source_dir.join(&source.rel_path);
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path)).with_backend(BACKEND))
    }
}

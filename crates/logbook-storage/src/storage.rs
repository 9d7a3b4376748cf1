//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for enumerating journal sources and
//! reading their raw text, along with [`StorageError`] for unified error
//! handling across backends.
//!
//! # Path Convention
//!
//! Sources are identified by their path relative to the content root, split
//! into raw segments with the `.md` extension removed from the last one:
//! - `"scheduler.md"` - `["scheduler"]`
//! - `"systems/scheduler notes.md"` - `["systems", "scheduler notes"]`
//!
//! Segments keep their original case and spacing. Deriving slugs from them is
//! the consumer's job.

use std::path::{Path, PathBuf};

/// Markdown file extension stripped from the last path segment.
const MARKDOWN_EXTENSION: &str = ".md";

/// Reference to one document source returned by [`Storage::scan`].
///
/// Contains only the location - no content is read at this stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceRef {
    /// Raw path segments, extension removed (e.g., `["systems", "scheduler notes"]`).
    pub segments: Vec<String>,
    /// Path relative to the content root (e.g., `systems/scheduler notes.md`).
    pub rel_path: PathBuf,
}

impl SourceRef {
    /// Build a source reference from a path relative to the content root.
    ///
    /// Both `/` and `\` are accepted as separators. Empty segments are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use logbook_storage::SourceRef;
    ///
    /// let source = SourceRef::from_rel_path("systems/scheduler notes.md");
    /// assert_eq!(source.segments, vec!["systems", "scheduler notes"]);
    /// ```
    #[must_use]
    pub fn from_rel_path(rel_path: impl AsRef<Path>) -> Self {
        let rel_path = rel_path.as_ref();
        let path_str = rel_path.to_string_lossy();

        let mut segments: Vec<String> = path_str
            .split(['/', '\\'])
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();

        if let Some(last) = segments.last_mut()
            && let Some(stem) = last.strip_suffix(MARKDOWN_EXTENSION)
        {
            *last = stem.to_owned();
        }

        Self {
            segments,
            rel_path: rel_path.to_path_buf(),
        }
    }
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Content is not valid UTF-8 or otherwise unreadable as text.
    InvalidData,
    /// Invalid path or identifier.
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => StorageErrorKind::InvalidData,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidData => "Invalid data",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Provider of journal sources.
///
/// Implementations enumerate every markdown document under the content root
/// and read its raw text on demand. Enumeration order is the discovery order
/// used for navigation tree children and sub-article listings, so backends
/// should return it deterministically.
pub trait Storage: Send + Sync {
    /// Enumerate all document sources.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the content root cannot be enumerated.
    fn scan(&self) -> Result<Vec<SourceRef>, StorageError>;

    /// Read the raw text (front matter included) of a source.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the source doesn't exist or can't be read.
    fn read(&self, source: &SourceRef) -> Result<String, StorageError>;
}

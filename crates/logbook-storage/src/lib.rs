//! Storage abstraction for the logbook journal engine.
//!
//! This crate provides a [`Storage`] trait that enumerates the markdown sources of
//! a journal and reads their raw text. The resolution engine only sees
//! `(segments, raw text)` pairs, so it can be tested without touching the
//! filesystem.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `scan()` and `read()` methods
//! - [`SourceRef`] identifying one document source by its path segments
//! - [`StorageError`] with a semantic [`StorageErrorKind`]
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! The filesystem backend lives in the `logbook-storage-fs` crate.
//!
//! # Example
//!
//! ```ignore
//! use logbook_storage::Storage;
//!
//! for source in storage.scan()? {
//!     let raw = storage.read(&source)?;
//!     println!("{}: {} bytes", source.rel_path.display(), raw.len());
//! }
//! ```

#[cfg(feature = "mock")]
mod mock;
mod storage;

#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{SourceRef, Storage, StorageError, StorageErrorKind};

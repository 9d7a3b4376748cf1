//! Document discovery by filesystem walking.
//!
//! The Scanner only identifies markdown files. Reading and parsing them is
//! left to the consumer of [`Storage`](logbook_storage::Storage).

use std::fs;
use std::path::{Path, PathBuf};

/// Discovers markdown sources by walking the filesystem.
///
/// Discovery order is the lexicographic order of the relative path using
/// `/` separators, so `a.md` comes before `a/b.md` and sibling order does not
/// depend on the platform's `read_dir` order.
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    /// Create a new Scanner rooted at `source_dir`.
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Scan the filesystem and return relative paths of markdown files.
    ///
    /// Returns an empty Vec if the source directory doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the source directory exists but can't be listed.
    pub fn scan(&self) -> std::io::Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        if !self.source_dir.exists() {
            return Ok(found);
        }

        let entries = fs::read_dir(&self.source_dir)?;
        self.collect_entries(entries, Path::new(""), &mut found);

        found.sort_by_cached_key(|p| rel_path_key(p));
        Ok(found)
    }

    /// Recurse into a subdirectory, logging and skipping it if unreadable.
    fn scan_directory(&self, rel_dir: &Path, found: &mut Vec<PathBuf>) {
        let dir_path = self.source_dir.join(rel_dir);
        match fs::read_dir(&dir_path) {
            Ok(entries) => self.collect_entries(entries, rel_dir, found),
            Err(e) => {
                tracing::warn!(path = %dir_path.display(), error = %e, "Skipping unreadable directory");
            }
        }
    }

    fn collect_entries(&self, entries: fs::ReadDir, rel_dir: &Path, found: &mut Vec<PathBuf>) {
        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            // Skip hidden files/dirs
            if name_str.starts_with('.') {
                continue;
            }

            let rel_path = rel_dir.join(&name);
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());

            if is_dir {
                self.scan_directory(&rel_path, found);
            } else if Path::new(&name).extension().is_some_and(|e| e == "md") {
                found.push(rel_path);
            }
        }
    }
}

/// Sort key for a relative path: components joined with `/`.
fn rel_path_key(rel_path: &Path) -> String {
    rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

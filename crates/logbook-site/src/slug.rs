//! Slug derivation and comparison.
//!
//! A slug is the `/`-joined path of a document or folder with every space
//! replaced by `-`. Case is preserved when deriving and ignored when
//! comparing.

/// Error returned for a requested slug that cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    /// Nothing left after trimming whitespace and `/`.
    #[error("requested slug is empty")]
    Empty,
    /// Two consecutive `/` separators.
    #[error("requested slug {0:?} contains an empty segment")]
    EmptySegment(String),
}

/// Derive the canonical slug for a sequence of path segments.
///
/// # Examples
///
/// ```
/// use logbook_site::derive_slug;
///
/// assert_eq!(derive_slug(&["systems", "Scheduler notes"]), "systems/Scheduler-notes");
/// ```
#[must_use]
pub fn derive_slug<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/")
        .replace(' ', "-")
}

/// Whether two slugs name the same document.
#[must_use]
pub fn same_slug(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Whether `candidate` lies strictly below `ancestor`.
///
/// The match is case-insensitive and must end on a `/` boundary, so
/// `foo-bar` is never below `foo`.
#[must_use]
pub fn is_descendant(candidate: &str, ancestor: &str) -> bool {
    remainder_below(candidate, ancestor).is_some()
}

/// Whether `candidate` lies exactly one segment below `parent`.
#[must_use]
pub fn is_immediate_child(candidate: &str, parent: &str) -> bool {
    remainder_below(candidate, parent).is_some_and(|rest| !rest.contains('/'))
}

/// Part of `candidate` after `ancestor/`, lowercased.
fn remainder_below(candidate: &str, ancestor: &str) -> Option<String> {
    let candidate = candidate.to_lowercase();
    let ancestor = ancestor.to_lowercase();
    let rest = candidate.strip_prefix(&ancestor)?.strip_prefix('/')?;
    (!rest.is_empty()).then(|| rest.to_owned())
}

/// Display title synthesized from the last segment of a slug.
///
/// Every `-` becomes a space and the first character is uppercased.
///
/// # Examples
///
/// ```
/// use logbook_site::last_segment_title;
///
/// assert_eq!(last_segment_title("systems/deep-dives"), "Deep dives");
/// ```
#[must_use]
pub fn last_segment_title(slug: &str) -> String {
    let segment = slug.rsplit('/').next().unwrap_or_default().replace('-', " ");
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalize a requested slug before resolution.
///
/// Surrounding whitespace and `/` are trimmed. The result must be non-empty
/// and must not contain an empty segment.
///
/// # Errors
///
/// Returns [`SlugError::Empty`] or [`SlugError::EmptySegment`].
pub fn validate_requested_slug(raw: &str) -> Result<&str, SlugError> {
    let slug = raw.trim().trim_matches('/');
    if slug.is_empty() {
        return Err(SlugError::Empty);
    }
    if slug.split('/').any(str::is_empty) {
        return Err(SlugError::EmptySegment(raw.to_owned()));
    }
    Ok(slug)
}

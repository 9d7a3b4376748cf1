//! Heading anchor ids.

/// Generate the anchor id for a heading.
///
/// Lowercases the text, collapses every maximal run of characters outside
/// `[a-z0-9]` into a single `-`, and trims leading and trailing `-`.
/// Non-ASCII letters are outside the allowed set and collapse like
/// punctuation. Identical text always yields the identical id; no
/// de-duplication is done.
///
/// # Examples
///
/// ```
/// use logbook_renderer::heading_id;
///
/// assert_eq!(heading_id("API & Design!"), "api-design");
/// assert_eq!(heading_id("Step 2: Build"), "step-2-build");
/// ```
#[must_use]
pub fn heading_id(text: &str) -> String {
    let mut id = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !id.is_empty() {
                id.push('-');
            }
            pending_dash = false;
            id.push(c);
        } else {
            pending_dash = true;
        }
    }

    id
}

/// Heading text as written in the source of an ATX or setext heading.
///
/// Takes the first line of the heading's source, drops indentation and the
/// opening `#` run, and trims. This matches what the line-based heading
/// scanner sees, so both derive ids from the same string.
#[must_use]
pub fn heading_source_text(source: &str) -> String {
    let first_line = source.lines().next().unwrap_or_default();
    first_line
        .trim_start()
        .trim_start_matches('#')
        .trim()
        .to_owned()
}

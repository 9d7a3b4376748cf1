//! Heading extraction for in-page navigation.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use logbook_renderer::heading_id;

/// ATX heading line: 1-6 `#`, whitespace, text.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})[ \t]+(.*)$").unwrap());

const FENCE: &str = "```";

/// A heading found in a document body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Number of `#` characters (1-6).
    pub level: u8,
    /// Trimmed heading text.
    pub text: String,
    /// Anchor id, identical to the one the renderer emits.
    pub id: String,
}

/// Extract headings from a markdown body in document order.
///
/// Fenced code blocks are skipped first so that `#` comments and shell
/// prompts inside them are never taken for headings. Repeated heading text
/// yields repeated ids.
///
/// # Examples
///
/// ```
/// use logbook_site::extract_headings;
///
/// let headings = extract_headings("# Title\n```\n# not a heading\n```\n## Real");
/// let texts: Vec<_> = headings.iter().map(|h| h.text.as_str()).collect();
/// assert_eq!(texts, ["Title", "Real"]);
/// ```
#[must_use]
pub fn extract_headings(body: &str) -> Vec<Heading> {
    outside_fences(body)
        .filter_map(|line| {
            let caps = HEADING_RE.captures(line)?;
            let text = caps[2].trim();
            if text.is_empty() {
                return None;
            }
            #[allow(clippy::cast_possible_truncation)]
            let level = caps[1].len() as u8;
            Some(Heading {
                level,
                text: text.to_owned(),
                id: heading_id(text),
            })
        })
        .collect()
}

/// Lines that are not inside a fenced code block.
///
/// A fence opens on a line made of a run of at least three backticks,
/// optionally followed by an info string that contains no backtick. It
/// closes on the next line holding only backticks, at least as many as the
/// opener (trailing whitespace allowed). An unclosed fence swallows the rest
/// of the body.
fn outside_fences(body: &str) -> impl Iterator<Item = &str> {
    let mut open: Option<usize> = None;
    body.lines().filter(move |line| {
        if let Some(width) = open {
            let line = line.trim_end();
            let run = backtick_run(line);
            if run >= width && run == line.len() {
                open = None;
            }
            false
        } else if let Some(width) = fence_opener(line) {
            open = Some(width);
            false
        } else {
            true
        }
    })
}

/// Width of the backtick run opening a fence on `line`, if it opens one.
fn fence_opener(line: &str) -> Option<usize> {
    let width = backtick_run(line);
    if width < FENCE.len() || line[width..].contains('`') {
        return None;
    }
    Some(width)
}

fn backtick_run(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b'`').count()
}

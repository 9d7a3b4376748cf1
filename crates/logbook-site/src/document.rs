//! Parsed journal documents.

use chrono::NaiveDate;
use serde::Serialize;

use crate::front_matter::{FrontMatter, parse_front_matter};
use crate::slug::derive_slug;

/// ISO date format used for document dates.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Values used when front matter omits a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataDefaults {
    pub title: String,
    pub read_time: String,
}

impl Default for MetadataDefaults {
    fn default() -> Self {
        Self {
            title: "Untitled".to_owned(),
            read_time: "5 min read".to_owned(),
        }
    }
}

/// Document metadata with every default applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    pub title: String,
    /// ISO date; the resolution date when front matter has none.
    pub date: String,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub read_time: String,
    #[serde(skip)]
    date_explicit: bool,
}

impl PostMetadata {
    /// Apply `defaults` to the fields `front_matter` leaves unset.
    #[must_use]
    pub fn from_front_matter(
        front_matter: FrontMatter,
        defaults: &MetadataDefaults,
        today: NaiveDate,
    ) -> Self {
        let date_explicit = front_matter.date.is_some();
        Self {
            title: front_matter
                .title
                .unwrap_or_else(|| defaults.title.clone()),
            date: front_matter
                .date
                .unwrap_or_else(|| today.format(DATE_FORMAT).to_string()),
            tags: front_matter.tags,
            excerpt: front_matter.excerpt.unwrap_or_default(),
            read_time: front_matter
                .read_time
                .unwrap_or_else(|| defaults.read_time.clone()),
            date_explicit,
        }
    }

    /// The date as written in front matter, if any.
    #[must_use]
    pub fn explicit_date(&self) -> Option<&str> {
        self.date_explicit.then_some(self.date.as_str())
    }

    /// Date parsed as a calendar day.
    ///
    /// Only the leading `YYYY-MM-DD` is read, so full timestamps also parse.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let day = self.date.get(..10).unwrap_or(&self.date);
        NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
    }
}

/// A leaf unit of content.
///
/// Built once per resolution pass and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Raw path segments, extension removed.
    pub path: Vec<String>,
    /// Canonical slug derived from `path`.
    pub slug: String,
    pub metadata: PostMetadata,
    /// Markdown with front matter stripped.
    pub body: String,
}

impl Document {
    /// Parse raw document text found at `path`.
    #[must_use]
    pub fn parse(path: Vec<String>, raw: &str, defaults: &MetadataDefaults, today: NaiveDate) -> Self {
        let parsed = parse_front_matter(raw);
        Self {
            slug: derive_slug(&path),
            path,
            metadata: PostMetadata::from_front_matter(parsed.front_matter, defaults, today),
            body: parsed.body,
        }
    }

    /// Whether the document sits at the root of the content directory.
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        !self.slug.contains('/')
    }
}

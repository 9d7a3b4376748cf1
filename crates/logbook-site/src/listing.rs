//! Home page listing.
//!
//! The root route lists top-level documents newest first. The search box
//! and tag chips narrow that list with a per-request linear filter.

use std::cmp::Reverse;

use serde::Serialize;

use crate::document::Document;

/// Card shown for a post on the home page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub title: String,
    pub slug: String,
    pub date: String,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub read_time: String,
}

impl From<&Document> for PostSummary {
    fn from(doc: &Document) -> Self {
        Self {
            title: doc.metadata.title.clone(),
            slug: doc.slug.clone(),
            date: doc.metadata.date.clone(),
            tags: doc.metadata.tags.clone(),
            excerpt: doc.metadata.excerpt.clone(),
            read_time: doc.metadata.read_time.clone(),
        }
    }
}

/// Top-level documents sorted by date, newest first.
///
/// Documents whose date does not parse sort after all others and keep
/// discovery order among themselves.
#[must_use]
pub fn home_listing(documents: &[Document]) -> Vec<&Document> {
    let mut posts: Vec<&Document> = documents.iter().filter(|d| d.is_top_level()).collect();
    posts.sort_by_key(|d| Reverse(d.metadata.parsed_date()));
    posts
}

/// Keep posts matching `query` and `tag`.
///
/// `query` is a case-insensitive substring of the title, excerpt or body;
/// an empty query matches everything. `tag` must equal one of the post's
/// tags exactly.
#[must_use]
pub fn filter_posts<'a>(
    posts: &[&'a Document],
    query: Option<&str>,
    tag: Option<&str>,
) -> Vec<&'a Document> {
    let needle = query.map(str::trim).unwrap_or_default().to_lowercase();
    posts
        .iter()
        .copied()
        .filter(|doc| needle.is_empty() || matches_query(doc, &needle))
        .filter(|doc| tag.is_none_or(|t| doc.metadata.tags.iter().any(|own| own == t)))
        .collect()
}

fn matches_query(doc: &Document, needle: &str) -> bool {
    [&doc.metadata.title, &doc.metadata.excerpt, &doc.body]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Every tag of `posts`, first-seen order.
#[must_use]
pub fn all_tags(posts: &[&Document]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in posts.iter().flat_map(|d| &d.metadata.tags) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::document::MetadataDefaults;

    fn doc(rel: &str, raw: &str) -> Document {
        let path = rel.split('/').map(str::to_owned).collect();
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        Document::parse(path, raw, &MetadataDefaults::default(), today)
    }

    fn corpus() -> Vec<Document> {
        vec![
            doc(
                "old",
                "---\ntitle: Old Post\ndate: 2023-05-01\ntags: [rust]\n---\nBorrow checker notes\n",
            ),
            doc(
                "new",
                "---\ntitle: New Post\ndate: 2024-09-10\ntags: [linux, rust]\nexcerpt: Kernel tuning\n---\nsysctl\n",
            ),
            doc("nested/child", "---\ntitle: Child\ndate: 2030-01-01\n---\n"),
            doc("undated", "---\ntitle: Undated\ndate: someday\ntags: [misc]\n---\n"),
            doc("mid", "---\ntitle: Mid\ndate: 2024-01-01\n---\n"),
        ]
    }

    fn slugs(posts: &[&Document]) -> Vec<String> {
        posts.iter().map(|d| d.slug.clone()).collect()
    }

    #[test]
    fn test_home_listing_top_level_newest_first() {
        let docs = corpus();

        let posts = home_listing(&docs);

        assert_eq!(slugs(&posts), vec!["new", "mid", "old", "undated"]);
    }

    #[test]
    fn test_filter_by_query_matches_title_excerpt_body() {
        let docs = corpus();
        let posts = home_listing(&docs);

        assert_eq!(slugs(&filter_posts(&posts, Some("new post"), None)), vec!["new"]);
        assert_eq!(slugs(&filter_posts(&posts, Some("KERNEL"), None)), vec!["new"]);
        assert_eq!(slugs(&filter_posts(&posts, Some("borrow"), None)), vec!["old"]);
    }

    #[test]
    fn test_filter_empty_query_matches_all() {
        let docs = corpus();
        let posts = home_listing(&docs);

        assert_eq!(filter_posts(&posts, Some("  "), None).len(), posts.len());
        assert_eq!(filter_posts(&posts, None, None).len(), posts.len());
    }

    #[test]
    fn test_filter_by_tag() {
        let docs = corpus();
        let posts = home_listing(&docs);

        assert_eq!(slugs(&filter_posts(&posts, None, Some("rust"))), vec!["new", "old"]);
        assert!(filter_posts(&posts, None, Some("Rust")).is_empty());
        assert_eq!(
            slugs(&filter_posts(&posts, Some("borrow"), Some("rust"))),
            vec!["old"]
        );
    }

    #[test]
    fn test_all_tags_first_seen_order() {
        let docs = corpus();
        let posts = home_listing(&docs);

        assert_eq!(all_tags(&posts), vec!["linux", "rust", "misc"]);
    }

    #[test]
    fn test_summary_from_document() {
        let docs = corpus();

        let summary = PostSummary::from(&docs[1]);

        assert_eq!(summary.title, "New Post");
        assert_eq!(summary.slug, "new");
        assert_eq!(summary.date, "2024-09-10");
        assert_eq!(summary.excerpt, "Kernel tuning");
        assert_eq!(summary.read_time, "5 min read");
    }
}

//! Slug resolution.
//!
//! A requested slug resolves to one of three kinds:
//!
//! - [`ResolvedKind::Real`]: a document has that slug (case-insensitive).
//! - [`ResolvedKind::Virtual`]: no document has it, but at least one
//!   document lies below it. Folders without a document of their own
//!   resolve this way.
//! - [`ResolvedKind::NotFound`]: neither.
//!
//! Ancestors and sub-articles are collected in the same pass over the
//! documents. Only real documents become ancestors, so a virtual folder in
//! the middle of a path does not appear in the chain.

use chrono::NaiveDate;
use serde::Serialize;

use crate::document::{DATE_FORMAT, Document};
use crate::headings::{Heading, extract_headings};
use crate::slug::{
    SlugError, is_descendant, is_immediate_child, last_segment_title, same_slug,
    validate_requested_slug,
};

/// Title used for slugs that resolve to nothing.
const NOT_FOUND_TITLE: &str = "Untitled";

/// Error returned when a request cannot be resolved at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Empty or malformed requested slug.
    #[error("Invalid slug: {0}")]
    InvalidSlug(#[from] SlugError),
}

/// Resolution outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolvedKind {
    Real,
    Virtual,
    NotFound,
}

/// A real document above the resolved slug.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ancestor {
    pub title: String,
    pub slug: String,
}

/// A document exactly one segment below the resolved slug.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubArticle {
    pub title: String,
    pub slug: String,
    /// Date as written in front matter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Result of resolving one requested slug.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedNode {
    pub kind: ResolvedKind,
    /// Requested slug after normalization.
    pub slug: String,
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub read_time: String,
    /// Markdown body; empty unless real.
    pub content: String,
    /// Shortest slug first.
    pub ancestors: Vec<Ancestor>,
    /// Discovery order.
    pub sub_articles: Vec<SubArticle>,
    pub headings: Vec<Heading>,
}

impl ResolvedNode {
    /// Whether a document exists at this slug.
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.kind == ResolvedKind::Real
    }
}

/// Resolve `requested` against `documents`.
///
/// `today` is the date given to virtual nodes.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidSlug`] if `requested` is empty or has an
/// empty segment.
pub fn resolve(
    documents: &[Document],
    requested: &str,
    today: NaiveDate,
) -> Result<ResolvedNode, ResolveError> {
    let slug = validate_requested_slug(requested)?;

    let mut real: Option<&Document> = None;
    let mut has_descendant = false;
    let mut ancestors = Vec::new();
    let mut sub_articles = Vec::new();

    for doc in documents {
        if same_slug(&doc.slug, slug) {
            if real.is_none() {
                real = Some(doc);
            }
        } else if is_descendant(&doc.slug, slug) {
            has_descendant = true;
            if is_immediate_child(&doc.slug, slug) {
                sub_articles.push(SubArticle {
                    title: doc.metadata.title.clone(),
                    slug: doc.slug.clone(),
                    date: doc.metadata.explicit_date().map(str::to_owned),
                });
            }
        } else if is_descendant(slug, &doc.slug) {
            ancestors.push(Ancestor {
                title: doc.metadata.title.clone(),
                slug: doc.slug.clone(),
            });
        }
    }

    ancestors.sort_by_key(|a| a.slug.len());

    let node = if let Some(doc) = real {
        ResolvedNode {
            kind: ResolvedKind::Real,
            slug: slug.to_owned(),
            title: doc.metadata.title.clone(),
            date: doc.metadata.date.clone(),
            tags: doc.metadata.tags.clone(),
            excerpt: doc.metadata.excerpt.clone(),
            read_time: doc.metadata.read_time.clone(),
            content: doc.body.clone(),
            ancestors,
            sub_articles,
            headings: extract_headings(&doc.body),
        }
    } else if has_descendant {
        ResolvedNode {
            title: last_segment_title(slug),
            date: today.format(DATE_FORMAT).to_string(),
            ancestors,
            sub_articles,
            ..empty_node(ResolvedKind::Virtual, slug)
        }
    } else {
        ResolvedNode {
            ancestors,
            ..empty_node(ResolvedKind::NotFound, slug)
        }
    };

    tracing::debug!(slug, kind = ?node.kind, "Resolved slug");
    Ok(node)
}

fn empty_node(kind: ResolvedKind, slug: &str) -> ResolvedNode {
    ResolvedNode {
        kind,
        slug: slug.to_owned(),
        title: NOT_FOUND_TITLE.to_owned(),
        date: String::new(),
        tags: Vec::new(),
        excerpt: String::new(),
        read_time: String::new(),
        content: String::new(),
        ancestors: Vec::new(),
        sub_articles: Vec::new(),
        headings: Vec::new(),
    }
}

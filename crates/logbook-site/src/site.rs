//! Per-request resolution over a storage backend.
//!
//! [`Site`] ties the engine together. Every call loads the whole corpus
//! from [`Storage`], builds fresh documents and a fresh tree, and answers
//! from those. Nothing is cached between calls, so concurrent callers never
//! share mutable state.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use logbook_site::{Site, SiteConfig};
//! use logbook_storage_fs::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("content/posts")));
//! let site = Site::new(storage, SiteConfig::default());
//!
//! let page = site.post("systems/raft")?;
//! println!("{}", page.resolved.title);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use logbook_renderer::{HtmlRenderer, TocEntry, heading_id};
use logbook_storage::Storage;

use crate::breadcrumbs::{Breadcrumb, RouteConfig, assemble_breadcrumbs};
use crate::document::{Document, MetadataDefaults};
use crate::listing::{PostSummary, all_tags, filter_posts, home_listing};
use crate::resolver::{ResolveError, ResolvedNode, resolve};
use crate::routes::route_for_slug;
use crate::sequencer::RequestSequencer;
use crate::slug::{derive_slug, validate_requested_slug};
use crate::tree::{TreeNode, build_tree};

/// Configuration for [`Site`].
#[derive(Clone, Debug, Default)]
pub struct SiteConfig {
    pub routes: RouteConfig,
    pub defaults: MetadataDefaults,
    /// Fixed resolution date. Uses the local clock when `None`.
    pub today: Option<NaiveDate>,
}

/// Navigation payload for one route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostPage {
    pub resolved: ResolvedNode,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub tree: Vec<TreeNode>,
}

/// HTML for a real post.
#[derive(Clone, Debug, Serialize)]
pub struct RenderedPost {
    pub slug: String,
    pub title: String,
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Journal site backed by a storage provider.
pub struct Site {
    storage: Arc<dyn Storage>,
    config: SiteConfig,
    renderer: HtmlRenderer,
}

impl Site {
    /// Create a site over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, config: SiteConfig) -> Self {
        let prefix = config.routes.post_prefix.clone();
        let renderer = HtmlRenderer::new()
            .with_wiki_links(Box::new(move |target: &str| wiki_link_href(&prefix, target)));
        Self {
            storage,
            config,
            renderer,
        }
    }

    /// Load and parse every document.
    ///
    /// Unreadable documents are skipped with a warning. A failed scan yields
    /// an empty corpus.
    #[must_use]
    pub fn load_documents(&self) -> Vec<Document> {
        let start = Instant::now();
        let sources = match self.storage.scan() {
            Ok(sources) => sources,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to scan documents");
                return Vec::new();
            }
        };

        let today = self.today();
        let documents: Vec<Document> = sources
            .into_iter()
            .filter(|source| !source.segments.is_empty())
            .filter_map(|source| match self.storage.read(&source) {
                Ok(raw) => Some(Document::parse(
                    source.segments,
                    &raw,
                    &self.config.defaults,
                    today,
                )),
                Err(e) => {
                    tracing::warn!(
                        path = %source.rel_path.display(),
                        error = %e,
                        "Skipping unreadable document"
                    );
                    None
                }
            })
            .collect();

        tracing::debug!(
            count = documents.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Loaded documents"
        );
        documents
    }

    /// Whole-corpus navigation tree.
    #[must_use]
    pub fn tree(&self) -> Vec<TreeNode> {
        build_tree(&self.load_documents())
    }

    /// Resolve a slug into its navigation payload.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidSlug`] for an empty or malformed slug.
    pub fn post(&self, requested: &str) -> Result<PostPage, ResolveError> {
        validate_requested_slug(requested)?;

        let documents = self.load_documents();
        let tree = build_tree(&documents);
        let resolved = resolve(&documents, requested, self.today())?;
        let breadcrumbs = assemble_breadcrumbs(&resolved.ancestors, &resolved, &self.config.routes);

        Ok(PostPage {
            resolved,
            breadcrumbs,
            tree,
        })
    }

    /// Resolve a slug unless a newer navigation supersedes this one.
    ///
    /// Returns `Ok(None)` when another navigation began on `sequencer`
    /// while this one was loading.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidSlug`] for an empty or malformed slug.
    pub fn navigate(
        &self,
        sequencer: &RequestSequencer,
        requested: &str,
    ) -> Result<Option<PostPage>, ResolveError> {
        let ticket = sequencer.begin();
        let page = self.post(requested)?;

        if !sequencer.is_current(ticket) {
            tracing::debug!(slug = requested, "Discarding superseded navigation");
            return Ok(None);
        }
        Ok(Some(page))
    }

    /// Home listing, optionally narrowed by search text and tag.
    #[must_use]
    pub fn listing(&self, query: Option<&str>, tag: Option<&str>) -> Vec<PostSummary> {
        let documents = self.load_documents();
        let posts = home_listing(&documents);
        filter_posts(&posts, query, tag)
            .into_iter()
            .map(PostSummary::from)
            .collect()
    }

    /// Tags of the posts on the home listing.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        let documents = self.load_documents();
        all_tags(&home_listing(&documents))
    }

    /// Render a post to HTML.
    ///
    /// Returns `Ok(None)` unless the slug resolves to a real document.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidSlug`] for an empty or malformed slug.
    pub fn render(&self, requested: &str) -> Result<Option<RenderedPost>, ResolveError> {
        validate_requested_slug(requested)?;

        let documents = self.load_documents();
        let resolved = resolve(&documents, requested, self.today())?;
        if !resolved.is_real() {
            return Ok(None);
        }

        let result = self.renderer.render(&resolved.content);
        Ok(Some(RenderedPost {
            slug: resolved.slug,
            title: resolved.title,
            html: result.html,
            toc: result.toc,
        }))
    }

    fn today(&self) -> NaiveDate {
        self.config
            .today
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Href for a wiki-link target such as `systems/Raft notes#Log matching`.
fn wiki_link_href(prefix: &str, target: &str) -> String {
    let (page, anchor) = match target.split_once('#') {
        Some((page, anchor)) => (page, Some(anchor)),
        None => (target, None),
    };

    let mut href = String::new();
    let segments: Vec<&str> = page.split('/').map(str::trim).filter(|s| !s.is_empty()).collect();
    if !segments.is_empty() {
        href = route_for_slug(prefix, &derive_slug(&segments));
    }
    if let Some(anchor) = anchor {
        href.push('#');
        href.push_str(&heading_id(anchor));
    }
    href
}

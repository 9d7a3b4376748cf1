//! Content resolution and navigation for logbook.
//!
//! Turns a flat set of markdown documents addressed by hierarchical paths
//! into:
//! - canonical slugs ([`derive_slug`])
//! - a navigation tree mirroring the directory layout ([`build_tree`])
//! - resolved pages that are real, virtual folders, or not found ([`resolve`])
//! - breadcrumbs, sub-articles and in-page headings for each page
//!
//! [`Site`] runs the whole pipeline per request over a
//! [`Storage`](logbook_storage::Storage) backend.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use logbook_site::{ResolvedKind, Site, SiteConfig};
//! use logbook_storage::MockStorage;
//!
//! let storage = MockStorage::new().with_file("a/b.md", "---\ntitle: B\n---\n");
//! let site = Site::new(Arc::new(storage), SiteConfig::default());
//!
//! let page = site.post("a").unwrap();
//! assert_eq!(page.resolved.kind, ResolvedKind::Virtual);
//! assert_eq!(page.resolved.title, "A");
//! ```

mod breadcrumbs;
mod document;
mod front_matter;
mod headings;
mod listing;
mod nav_state;
mod resolver;
mod routes;
mod sequencer;
mod site;
mod slug;
mod tree;

pub use breadcrumbs::{Breadcrumb, RouteConfig, assemble_breadcrumbs};
pub use document::{Document, MetadataDefaults, PostMetadata};
pub use front_matter::{FrontMatter, ParsedDocument, parse_front_matter};
pub use headings::{Heading, extract_headings};
pub use listing::{PostSummary, all_tags, filter_posts, home_listing};
pub use nav_state::{NavRow, NavState, visible_rows};
pub use resolver::{Ancestor, ResolveError, ResolvedKind, ResolvedNode, SubArticle, resolve};
pub use routes::{DEFAULT_POST_PREFIX, route_for_slug, slug_from_route};
pub use sequencer::{RequestSequencer, Ticket};
pub use site::{PostPage, RenderedPost, Site, SiteConfig};
pub use slug::{
    SlugError, derive_slug, is_descendant, is_immediate_child, last_segment_title, same_slug,
    validate_requested_slug,
};
pub use tree::{NodeKind, TreeArena, TreeNode, ancestor_keys, build_tree, find_node, flatten_file_slugs};

// Re-export TocEntry from logbook-renderer for convenience
pub use logbook_renderer::TocEntry;

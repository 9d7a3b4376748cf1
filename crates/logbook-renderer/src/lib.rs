//! Markdown rendering for logbook.
//!
//! This crate owns the heading anchor contract: [`heading_id`] is the only
//! place anchor ids are generated. The navigation engine uses it when it
//! extracts headings for the in-page table of contents, and [`HtmlRenderer`]
//! uses it for the `id` attributes it emits, so links from one always land
//! on the other.
//!
//! # Example
//!
//! ```
//! use logbook_renderer::{HtmlRenderer, heading_id};
//!
//! let result = HtmlRenderer::new().render("## API & Design!\n\nBody.");
//! assert_eq!(result.toc[0].id, heading_id("API & Design!"));
//! assert!(result.html.contains(r#"<h2 id="api-design">"#));
//! ```

mod anchor;
mod html;

pub use anchor::{heading_id, heading_source_text};
pub use html::{HtmlRenderer, RenderResult, TocEntry, WikiLinkResolver};

//! HTML rendering with heading anchors and wiki links.

use pulldown_cmark::{Event, HeadingLevel, LinkType, Options, Parser, Tag};

use crate::anchor::{heading_id, heading_source_text};

/// Maps a wiki-link target (the text inside `[[...]]`) to an href.
pub type WikiLinkResolver = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text as written in the source.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Every heading the parser recognized, in document order.
    pub toc: Vec<TocEntry>,
}

/// Markdown to HTML renderer.
///
/// Every heading gets an `id` attribute from [`heading_id`]. Wiki links
/// (`[[Target]]`, `[[Target|Label]]`) are resolved through the configured
/// [`WikiLinkResolver`]; without one the target is used as the href
/// unchanged.
pub struct HtmlRenderer {
    gfm: bool,
    wiki_links: Option<WikiLinkResolver>,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            wiki_links: None,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    /// - Footnotes
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Resolve wiki-link targets with `resolver`.
    #[must_use]
    pub fn with_wiki_links(mut self, resolver: WikiLinkResolver) -> Self {
        self.wiki_links = Some(resolver);
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let base = Options::ENABLE_WIKILINKS;
        if self.gfm {
            base | Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_GFM
        } else {
            base
        }
    }

    /// Render markdown (front matter already stripped) to HTML.
    #[must_use]
    pub fn render(&self, markdown: &str) -> RenderResult {
        let parser = Parser::new_ext(markdown, self.parser_options()).into_offset_iter();
        let mut events = Vec::new();
        let mut toc = Vec::new();

        for (event, range) in parser {
            match event {
                Event::Start(Tag::Heading {
                    level,
                    classes,
                    attrs,
                    ..
                }) => {
                    let title = heading_source_text(&markdown[range]);
                    let id = heading_id(&title);
                    toc.push(TocEntry {
                        level: heading_level_to_num(level),
                        title,
                        id: id.clone(),
                    });
                    events.push(Event::Start(Tag::Heading {
                        level,
                        id: Some(id.into()),
                        classes,
                        attrs,
                    }));
                }
                Event::Start(Tag::Link {
                    link_type: link_type @ LinkType::WikiLink { .. },
                    dest_url,
                    title,
                    id,
                }) => {
                    let href = match &self.wiki_links {
                        Some(resolve) => resolve(&dest_url),
                        None => dest_url.to_string(),
                    };
                    events.push(Event::Start(Tag::Link {
                        link_type,
                        dest_url: href.into(),
                        title,
                        id,
                    }));
                }
                other => events.push(other),
            }
        }

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());

        RenderResult { html, toc }
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_heading_gets_id() {
        let result = HtmlRenderer::new().render("# Hello World\n");

        assert!(result.html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
    }

    #[test]
    fn test_toc_lists_headings_in_order() {
        let result = HtmlRenderer::new().render("# Title\n\ntext\n\n## Part One\n\n### Detail\n");

        assert_eq!(
            result.toc,
            vec![
                TocEntry {
                    level: 1,
                    title: "Title".to_owned(),
                    id: "title".to_owned(),
                },
                TocEntry {
                    level: 2,
                    title: "Part One".to_owned(),
                    id: "part-one".to_owned(),
                },
                TocEntry {
                    level: 3,
                    title: "Detail".to_owned(),
                    id: "detail".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_headings_share_id() {
        let result = HtmlRenderer::new().render("## Setup\n\n## Setup\n");

        assert_eq!(result.toc.len(), 2);
        assert_eq!(result.toc[0].id, "setup");
        assert_eq!(result.toc[1].id, "setup");
    }

    #[test]
    fn test_inline_markup_uses_source_text_for_id() {
        let result = HtmlRenderer::new().render("## Using `cargo` **fast**\n");

        assert_eq!(result.toc[0].id, "using-cargo-fast");
        assert!(result.html.contains(r#"<h2 id="using-cargo-fast">"#));
    }

    #[test]
    fn test_code_fence_comment_is_not_heading() {
        let result = HtmlRenderer::new().render("```bash\n# not a heading\n```\n");

        assert!(result.toc.is_empty());
        assert!(result.html.contains("# not a heading"));
    }

    #[test]
    fn test_wiki_link_default_uses_target() {
        let result = HtmlRenderer::new().render("See [[scheduler]].\n");

        assert!(result.html.contains(r#"<a href="scheduler">scheduler</a>"#));
    }

    #[test]
    fn test_wiki_link_resolver() {
        let renderer = HtmlRenderer::new().with_wiki_links(Box::new(|target: &str| {
            format!("/post/{}", target.replace(' ', "-"))
        }));
        let result = renderer.render("See [[systems/Scheduler Notes|the notes]].\n");

        assert!(
            result
                .html
                .contains(r#"<a href="/post/systems/Scheduler-Notes">the notes</a>"#)
        );
    }

    #[test]
    fn test_gfm_table() {
        let result = HtmlRenderer::new().render("| a | b |\n|---|---|\n| 1 | 2 |\n");

        assert!(result.html.contains("<table>"));
    }

    #[test]
    fn test_gfm_disabled_keeps_table_as_text() {
        let result = HtmlRenderer::new()
            .with_gfm(false)
            .render("| a | b |\n|---|---|\n| 1 | 2 |\n");

        assert!(!result.html.contains("<table>"));
    }
}

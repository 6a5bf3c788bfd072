//! Markdown preview rendering.
//!
//! Rendering is a collaborator: the note store only ever calls through
//! [`MarkdownRenderer`], and correctness of the HTML is the renderer's concern.

use pulldown_cmark::{html, Event, Options, Parser};

/// Turns markdown source into an HTML string.
pub trait MarkdownRenderer {
    /// Render `source` to HTML.
    fn render(&self, source: &str) -> String;
}

/// CommonMark renderer backed by `pulldown-cmark`.
///
/// Soft line breaks in the source become `<br />` in the output, so text
/// typed on consecutive lines keeps its line structure in the preview.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMarkRenderer {
    /// Enable GitHub-style tables, strikethrough and task lists.
    pub extensions: bool,
}

impl CommonMarkRenderer {
    /// Renderer with the common extensions switched on.
    #[must_use]
    pub fn with_extensions() -> Self {
        Self { extensions: true }
    }

    fn options(self) -> Options {
        if self.extensions {
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
        } else {
            Options::empty()
        }
    }
}

impl MarkdownRenderer for CommonMarkRenderer {
    fn render(&self, source: &str) -> String {
        if source.is_empty() {
            return String::new();
        }

        let parser = Parser::new_ext(source, self.options()).map(|event| match event {
            Event::SoftBreak => Event::HardBreak,
            other => other,
        });

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_renders_nothing() {
        assert_eq!(CommonMarkRenderer::default().render(""), "");
    }

    #[test]
    fn test_heading_and_emphasis() {
        let html = CommonMarkRenderer::default().render("# Title\n\nsome *emphasis*");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn test_soft_breaks_become_line_breaks() {
        let html = CommonMarkRenderer::default().render("first line\nsecond line");
        assert_eq!(html, "<p>first line<br />\nsecond line</p>\n");
    }

    #[test]
    fn test_extensions_enable_strikethrough() {
        let plain = CommonMarkRenderer::default().render("~~gone~~");
        let extended = CommonMarkRenderer::with_extensions().render("~~gone~~");
        assert!(!plain.contains("<del>"));
        assert!(extended.contains("<del>gone</del>"));
    }
}

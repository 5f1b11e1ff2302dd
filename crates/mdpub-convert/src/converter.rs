//! Markdown to Confluence storage format converter.
//!
//! The conversion is a fixed sequence of rewrites over the HTML produced by
//! pulldown-cmark. Later steps assume the shape left by earlier ones:
//!
//! 1. Markdown to HTML (tables, fenced code, footnotes)
//! 2. HTML comments to `<ac:placeholder>`
//! 3. `<pre><code>` to code macros
//! 4. First `[TOC]` paragraph to a TOC macro
//! 5. Relative image sources to attachment download paths (only with a page id)

use pulldown_cmark::{Options, Parser, html};
use tracing::debug;

use crate::code_block::{CodeMacroStyle, convert_code_blocks};
use crate::comment::convert_comments;
use crate::error::ConvertError;
use crate::image::convert_images;
use crate::toc::convert_toc;

/// Per-call conversion input beyond the Markdown text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversionContext<'a> {
    /// Id of the page the output will be stored in, once the server assigned one.
    pub page_id: Option<&'a str>,
}

impl<'a> ConversionContext<'a> {
    /// Context for a page that does not exist yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a page with a known id.
    #[must_use]
    pub fn with_page_id(page_id: &'a str) -> Self {
        Self {
            page_id: Some(page_id),
        }
    }
}

/// Converts Markdown to Confluence storage format.
///
/// # Example
///
/// ```
/// use mdpub_convert::{ConversionContext, MarkdownConverter};
///
/// let converter = MarkdownConverter::new();
/// let html = converter
///     .convert("![chart](chart.png)", &ConversionContext::with_page_id("42"))
///     .unwrap();
/// assert!(html.contains(r#"src="/download/attachments/42/chart.png""#));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    code_style: CodeMacroStyle,
}

impl MarkdownConverter {
    /// Create a converter with the default code macro style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the code macro theme (default `Midnight`).
    #[must_use]
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.code_style.theme = theme.into();
        self
    }

    /// Enable or disable line numbers in code macros (default enabled).
    #[must_use]
    pub fn line_numbers(mut self, enabled: bool) -> Self {
        self.code_style.line_numbers = enabled;
        self
    }

    /// Convert Markdown text to a storage format page body.
    ///
    /// Output is a pure function of the input and context.
    pub fn convert(
        &self,
        markdown: &str,
        context: &ConversionContext<'_>,
    ) -> Result<String, ConvertError> {
        let html = render_html(markdown);
        let html = convert_comments(&html)?;
        let html = convert_code_blocks(&html, &self.code_style)?;
        let html = convert_toc(&html);
        let html = match context.page_id {
            Some(page_id) => convert_images(&html, page_id)?,
            None => html,
        };
        debug!(
            "Converted {} bytes of markdown to {} bytes of storage format",
            markdown.len(),
            html.len()
        );
        Ok(html)
    }
}

fn render_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

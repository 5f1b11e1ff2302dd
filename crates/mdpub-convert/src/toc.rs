//! `[TOC]` marker to Confluence table-of-contents macro conversion.
//!
//! Match grammar: the exact text `<p>[TOC]</p>`, i.e. a paragraph whose whole
//! content is the marker. Only the first occurrence is converted; any later
//! markers are left as literal paragraphs.

const TOC_PARAGRAPH: &str = "<p>[TOC]</p>";
const TOC_MACRO: &str = r#"<p><ac:structured-macro ac:name="toc" ac:schema-version="1"/></p>"#;

/// Replace the first `[TOC]` paragraph with a TOC macro.
pub(crate) fn convert_toc(html: &str) -> String {
    html.replacen(TOC_PARAGRAPH, TOC_MACRO, 1)
}

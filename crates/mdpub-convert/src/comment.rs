//! HTML comment to Confluence placeholder conversion.
//!
//! Match grammar: the literal delimiters `<!--` and `-->`, replaced one for one.
//! There is no nesting awareness, so a comment body containing `-->` closes at
//! that point and the remainder of the intended comment becomes visible text.
//! A stray `-->` with no opener is still rewritten to a closing placeholder,
//! and an opener inside a comment body is rewritten as well.

use crate::error::ConvertError;

const OPEN: &str = "<!--";
const CLOSE: &str = "-->";
const PLACEHOLDER_OPEN: &str = "<ac:placeholder>";
const PLACEHOLDER_CLOSE: &str = "</ac:placeholder>";

/// Rewrite HTML comments into `<ac:placeholder>` blocks.
///
/// Fails when an opening delimiter has no closing delimiter after it. The
/// closing delimiter may overlap the opener, so `<!-->` and `<!--->` are empty
/// comments.
pub(crate) fn convert_comments(html: &str) -> Result<String, ConvertError> {
    let mut out = String::with_capacity(html.len() + html.len() / 4);
    let mut pos = 0;

    while let Some(start) = html[pos..].find(OPEN).map(|i| pos + i) {
        out.push_str(&close_strays(&html[pos..start]));

        // "<!" is never part of a closing delimiter
        let search_from = start + 2;
        let end = html[search_from..]
            .find(CLOSE)
            .map(|i| search_from + i)
            .ok_or(ConvertError::UnterminatedComment { offset: start })?;

        let body = &html[(start + OPEN.len()).min(end)..end];
        out.push_str(PLACEHOLDER_OPEN);
        out.push_str(&body.replace(OPEN, PLACEHOLDER_OPEN));
        out.push_str(PLACEHOLDER_CLOSE);
        pos = end + CLOSE.len();
    }

    out.push_str(&close_strays(&html[pos..]));
    Ok(out)
}

fn close_strays(text: &str) -> String {
    text.replace(CLOSE, PLACEHOLDER_CLOSE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_single_comment() {
        let html = "<p>a</p>\n<!-- hidden -->\n<p>b</p>";
        assert_eq!(
            convert_comments(html).unwrap(),
            "<p>a</p>\n<ac:placeholder> hidden </ac:placeholder>\n<p>b</p>"
        );
    }

    #[test]
    fn test_convert_multiline_comment() {
        let html = "<!--\n# Draft\n\nnot ready\n-->";
        assert_eq!(
            convert_comments(html).unwrap(),
            "<ac:placeholder>\n# Draft\n\nnot ready\n</ac:placeholder>"
        );
    }

    #[test]
    fn test_nested_close_ends_early() {
        let html = "<!-- a --> b -->";
        assert_eq!(
            convert_comments(html).unwrap(),
            "<ac:placeholder> a </ac:placeholder> b </ac:placeholder>"
        );
    }

    #[test]
    fn test_escaped_comment_untouched() {
        let html = "<pre><code>&lt;!-- kept --&gt;</code></pre>";
        assert_eq!(convert_comments(html).unwrap(), html);
    }

    #[test]
    fn test_unterminated_comment_is_error() {
        let html = "<p>a</p><!-- open <!-- x --><!-- never closed";
        assert_eq!(
            convert_comments(html),
            Err(ConvertError::UnterminatedComment { offset: 28 })
        );
    }

    #[test]
    fn test_empty_comment_forms() {
        assert_eq!(
            convert_comments("<!-->\n<p>text</p>").unwrap(),
            "<ac:placeholder></ac:placeholder>\n<p>text</p>"
        );
        assert_eq!(
            convert_comments("<!--->").unwrap(),
            "<ac:placeholder></ac:placeholder>"
        );
        assert_eq!(
            convert_comments("<!---->").unwrap(),
            "<ac:placeholder></ac:placeholder>"
        );
    }

    #[test]
    fn test_opener_inside_comment_substituted() {
        assert_eq!(
            convert_comments("<!-- a <!-- b -->").unwrap(),
            "<ac:placeholder> a <ac:placeholder> b </ac:placeholder>"
        );
    }

    #[test]
    fn test_no_comments_unchanged() {
        assert_eq!(convert_comments("<p>plain</p>").unwrap(), "<p>plain</p>");
    }
}

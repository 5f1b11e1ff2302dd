//! Relative `<img>` source to attachment download path conversion.
//!
//! Match grammar: see [`crate::html`]. For every self-closing `<img .../>` tag
//! whose `src` has no URI scheme, only the `src` value is replaced with
//! `/download/attachments/{page_id}/{basename}`. Other attributes (including an
//! `alt` that happens to equal the path) are left alone.
//!
//! Known false positives:
//! - absolute local paths (`/abs/c.png`) are rewritten too, although they are
//!   never uploaded as attachments
//! - `<img .../>` text inside a code macro is rewritten, because code bodies
//!   are already unescaped into CDATA when this step runs

use crate::error::ConvertError;
use crate::html::{IMG_TAG, basename, is_absolute_url, src_attr};

/// Server-relative download path of a page attachment.
fn attachment_download_path(page_id: &str, src: &str) -> String {
    format!("/download/attachments/{page_id}/{}", basename(src))
}

/// Point relative image sources at the page's attachments.
pub(crate) fn convert_images(html: &str, page_id: &str) -> Result<String, ConvertError> {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;

    for tag in IMG_TAG.find_iter(html) {
        let src = src_attr(tag.as_str()).ok_or_else(|| ConvertError::MissingImageSource {
            tag: tag.as_str().to_owned(),
        })?;
        if is_absolute_url(src.as_str()) {
            continue;
        }

        let src_start = tag.start() + src.start();
        out.push_str(&html[last..src_start]);
        out.push_str(&attachment_download_path(page_id, src.as_str()));
        last = tag.start() + src.end();
    }

    out.push_str(&html[last..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_src_rewritten() {
        assert_eq!(
            convert_images(r#"<img src="diagram.png"/>"#, "123").unwrap(),
            r#"<img src="/download/attachments/123/diagram.png"/>"#
        );
    }

    #[test]
    fn test_nested_path_uses_basename() {
        assert_eq!(
            convert_images(r#"<img src="img/sub/a.png" alt="img/sub/a.png" />"#, "7").unwrap(),
            r#"<img src="/download/attachments/7/a.png" alt="img/sub/a.png" />"#
        );
    }

    #[test]
    fn test_absolute_url_untouched() {
        let html = r#"<img src="http://x/y.png"/>"#;
        assert_eq!(convert_images(html, "123").unwrap(), html);
    }

    #[test]
    fn test_mixed_tags() {
        let html = r#"<p><img src="a.png" alt="a" /> <img src="https://e.com/b.png"/> <img src='c.png'/></p>"#;
        assert_eq!(
            convert_images(html, "9").unwrap(),
            r#"<p><img src="/download/attachments/9/a.png" alt="a" /> <img src="https://e.com/b.png"/> <img src='/download/attachments/9/c.png'/></p>"#
        );
    }

    #[test]
    fn test_missing_src_is_error() {
        assert_eq!(
            convert_images(r#"<p><img alt="x"/></p>"#, "1"),
            Err(ConvertError::MissingImageSource {
                tag: r#"<img alt="x"/>"#.to_owned()
            })
        );
    }

    #[test]
    fn test_non_self_closing_tag_ignored() {
        let html = r#"<img src="a.png">"#;
        assert_eq!(convert_images(html, "1").unwrap(), html);
    }
}

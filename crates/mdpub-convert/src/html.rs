//! Shared fragment patterns for `<img>` tags and image paths.
//!
//! Both the image rewrite and the attachment scan look at the same tag shape,
//! so the grammar lives here once:
//!
//! - tag: `<img` followed by anything except `>`, closed by `/>`
//! - attribute: `name="value"` or `name='value'`, preceded by whitespace
//!
//! Known false negatives: `<img ...>` without the self-closing slash, and
//! attribute values containing a raw `>`.

use std::sync::LazyLock;

use regex::{Match, Regex};

/// Self-closing `<img .../>` tag.
pub(crate) static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*/>").expect("invalid img tag regex"));

static SRC_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\ssrc\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("invalid src regex")
});

static ALT_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\salt\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("invalid alt regex")
});

/// URI scheme prefix (`http:`, `https:`, `data:`, ...) or protocol-relative `//`.
static URL_SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.\-]*:|//)").expect("invalid scheme regex")
});

/// Value of the `src` attribute inside a tag, with its position in the tag.
pub(crate) fn src_attr(tag: &str) -> Option<Match<'_>> {
    attr_value(&SRC_ATTR, tag)
}

/// Value of the `alt` attribute inside a tag.
pub(crate) fn alt_attr(tag: &str) -> Option<&str> {
    attr_value(&ALT_ATTR, tag).map(|m| m.as_str())
}

fn attr_value<'t>(pattern: &Regex, tag: &'t str) -> Option<Match<'t>> {
    let caps = pattern.captures(tag)?;
    caps.get(1).or_else(|| caps.get(2))
}

/// Whether a path points at a remote resource rather than a local file.
pub(crate) fn is_absolute_url(path: &str) -> bool {
    URL_SCHEME.is_match(path)
}

/// Last path segment, split on either separator.
pub(crate) fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_absolute_url_schemes() {
        assert!(is_absolute_url("http://example.com/a.png"));
        assert!(is_absolute_url("https://example.com/a.png"));
        assert!(is_absolute_url("data:image/png;base64,AAAA"));
        assert!(is_absolute_url("//cdn.example.com/a.png"));
    }

    #[test]
    fn test_is_absolute_url_relative_paths() {
        assert!(!is_absolute_url("diagram.png"));
        assert!(!is_absolute_url("img/a.png"));
        assert!(!is_absolute_url("../shared/a.png"));
        assert!(!is_absolute_url("/abs/c.png"));
        assert!(!is_absolute_url("httpdocs/a.png"));
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("img/sub/a.png"), "a.png");
        assert_eq!(basename("a.png"), "a.png");
        assert_eq!(basename(r"img\a.png"), "a.png");
    }

    #[test]
    fn test_src_attr_double_and_single_quotes() {
        assert_eq!(src_attr(r#"<img src="a.png"/>"#).unwrap().as_str(), "a.png");
        assert_eq!(src_attr("<img src='b.png'/>").unwrap().as_str(), "b.png");
        assert!(src_attr(r#"<img alt="x"/>"#).is_none());
    }

    #[test]
    fn test_src_attr_ignores_data_src() {
        let tag = r#"<img data-src="lazy.png" src="real.png"/>"#;
        assert_eq!(src_attr(tag).unwrap().as_str(), "real.png");
    }

    #[test]
    fn test_alt_attr() {
        assert_eq!(alt_attr(r#"<img src="a.png" alt="Diagram"/>"#), Some("Diagram"));
        assert_eq!(alt_attr(r#"<img src="a.png"/>"#), None);
    }

    #[test]
    fn test_img_tag_matches_pulldown_output() {
        let html = r#"<p><img src="a.png" alt="a" /> and <img src="b.png"/></p>"#;
        let tags: Vec<_> = IMG_TAG.find_iter(html).map(|m| m.as_str()).collect();
        assert_eq!(tags, vec![r#"<img src="a.png" alt="a" />"#, r#"<img src="b.png"/>"#]);
    }
}

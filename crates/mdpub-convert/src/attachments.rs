//! Local image discovery for attachment upload.
//!
//! Scans raw Markdown in two passes:
//!
//! 1. Markdown images: `![ALT](DEST)`, shortest `ALT` and `DEST` on one line.
//!    `DEST` may be `<path with spaces>` and may carry a trailing `"title"`.
//! 2. Inline HTML: self-closing `<img .../>` tags, `src` and optional `alt`.
//!
//! Paths with a URI scheme or a leading separator are skipped. The scan works
//! on the source text, so image syntax inside fenced code blocks is picked up
//! as well.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::ConvertError;
use crate::html::{IMG_TAG, alt_attr, is_absolute_url, src_attr};

static MARKDOWN_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[(?P<alt>.*?)\]\((?P<dest>.*?)\)").expect("invalid markdown image regex")
});

/// A local file to upload as a page attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Attachment comment (the image's alt text).
    pub comment: String,
}

impl Attachment {
    /// Attachment file name as it will appear on the page.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// Finds local images referenced by a Markdown document.
#[derive(Debug, Clone)]
pub struct AttachmentExtractor<'a> {
    markdown: &'a str,
    base_dir: PathBuf,
}

impl<'a> AttachmentExtractor<'a> {
    /// Create an extractor resolving relative paths against `base_dir`.
    ///
    /// `base_dir` should be the absolute directory of the source document.
    pub fn new(markdown: &'a str, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            markdown,
            base_dir: base_dir.into(),
        }
    }

    /// Lazily yield upload candidates, Markdown images first.
    ///
    /// Each call starts a fresh scan.
    pub fn candidates(&self) -> impl Iterator<Item = Result<Attachment, ConvertError>> + '_ {
        let markdown_images = MARKDOWN_IMAGE.captures_iter(self.markdown).filter_map(|caps| {
            let path = link_destination(&caps["dest"]);
            self.resolve(path, &caps["alt"]).map(Ok)
        });

        let html_images = IMG_TAG.find_iter(self.markdown).filter_map(|tag| {
            let tag = tag.as_str();
            let Some(src) = src_attr(tag) else {
                return Some(Err(ConvertError::MissingImageSource {
                    tag: tag.to_owned(),
                }));
            };
            self.resolve(src.as_str(), alt_attr(tag).unwrap_or_default())
                .map(Ok)
        });

        markdown_images.chain(html_images)
    }

    fn resolve(&self, path: &str, comment: &str) -> Option<Attachment> {
        match skip_reason(path) {
            Some(SkipReason::Remote) => {
                debug!("Skipping remote image '{}'", path);
                return None;
            }
            Some(SkipReason::AbsolutePath) => {
                warn!("Not uploading image with absolute path '{}'", path);
                return None;
            }
            None => {}
        }
        Some(Attachment {
            path: self.base_dir.join(Path::new(path)),
            comment: comment.to_owned(),
        })
    }
}

/// Why an image path is not an upload candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    /// URL or empty path; nothing local to upload.
    Remote,
    /// Local file outside the document tree.
    AbsolutePath,
}

fn skip_reason(path: &str) -> Option<SkipReason> {
    if path.is_empty() || is_absolute_url(path) {
        Some(SkipReason::Remote)
    } else if starts_with_separator(path) {
        Some(SkipReason::AbsolutePath)
    } else {
        None
    }
}

fn starts_with_separator(path: &str) -> bool {
    path.chars().next().is_some_and(std::path::is_separator)
}

/// Strip angle brackets and an optional title from a link destination.
fn link_destination(dest: &str) -> &str {
    let dest = dest.trim();
    if let Some(rest) = dest.strip_prefix('<') {
        return rest.split_once('>').map_or(rest, |(path, _)| path);
    }
    dest.split_once(char::is_whitespace)
        .map_or(dest, |(path, _)| path)
}

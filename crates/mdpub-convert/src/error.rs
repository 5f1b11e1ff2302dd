//! Error types for storage format conversion.

/// Malformed input found while rewriting converted HTML.
///
/// Offsets are byte positions in the intermediate HTML produced by the
/// Markdown pass, not in the Markdown source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// An HTML comment is opened but never closed.
    #[error("unterminated HTML comment at byte {offset}")]
    UnterminatedComment {
        /// Position of the opening `<!--`.
        offset: usize,
    },

    /// A `<pre><code>` opening has no matching `</code></pre>`.
    #[error("unclosed code block at byte {offset}")]
    UnclosedCodeBlock {
        /// Position of the unmatched opening tag.
        offset: usize,
    },

    /// An `<img>` tag has no `src` attribute.
    #[error("image tag without src attribute: {tag}")]
    MissingImageSource {
        /// The offending tag, verbatim.
        tag: String,
    },
}

//! Error types for document handling.

use std::path::PathBuf;

/// Error reading, parsing or writing a document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Document file could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        /// Document path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Document file could not be written.
    #[error("failed to write {}", path.display())]
    Write {
        /// Document path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Opening `---` without a closing one.
    #[error("front matter is not closed with a `---` line")]
    UnclosedFrontMatter,

    /// Front matter is valid YAML but not a key-value mapping.
    #[error("front matter must be a YAML mapping")]
    NotAMapping,

    /// YAML parsing or serialization error.
    #[error("invalid front matter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A known key has a value of the wrong shape.
    #[error("invalid `{field}` in front matter: {message}")]
    InvalidField {
        /// Front matter key.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

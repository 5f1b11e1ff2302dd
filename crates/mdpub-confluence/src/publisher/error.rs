//! Error types for publishing.

use mdpub_config::ConfigError;
use mdpub_convert::ConvertError;
use mdpub_document::DocumentError;

use crate::error::ConfluenceError;

/// Error during a publish run.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Required front matter field is absent.
    #[error("missing required field '{0}' in front matter or configuration")]
    MissingField(&'static str),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Front matter could not be read.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Markdown conversion failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// Confluence API error.
    #[error(transparent)]
    Confluence(#[from] ConfluenceError),

    /// A new page would collide with an existing one.
    #[error(
        "page '{title}' already exists in space {space_key} (id {id}); add its id and version to the front matter to update it"
    )]
    PageExists {
        /// Space key.
        space_key: String,
        /// Page title.
        title: String,
        /// Id of the existing page.
        id: String,
    },

    /// The page to update was not found by title and space.
    #[error("page '{title}' not found in space {space_key}")]
    PageNotFound {
        /// Space key.
        space_key: String,
        /// Page title.
        title: String,
    },

    /// Local metadata disagrees with the server's current page.
    #[error("page {field} mismatch: front matter has {local}, server has {remote}")]
    Inconsistent {
        /// `id` or `version`.
        field: &'static str,
        /// Value from the front matter.
        local: String,
        /// Value from the server.
        remote: String,
    },
}

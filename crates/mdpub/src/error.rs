//! CLI error types.

use mdpub_config::ConfigError;
use mdpub_confluence::PublishError;
use mdpub_convert::ConvertError;
use mdpub_document::DocumentError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Document(#[from] DocumentError),

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Publish failure with the page it was aimed at.
    #[error("{error} (base url: {base_url}, space: {space_key}, page id: {page_id})")]
    Publish {
        error: PublishError,
        base_url: String,
        space_key: String,
        page_id: String,
    },

    #[error("{0}")]
    Settings(#[from] PublishError),
}

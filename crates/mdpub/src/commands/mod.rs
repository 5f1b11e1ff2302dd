//! CLI command implementations.

mod convert;
mod publish;

pub(crate) use convert::ConvertArgs;
pub(crate) use publish::PublishArgs;

use std::path::{Path, PathBuf};

use mdpub_config::Config;
use mdpub_convert::MarkdownConverter;

/// Converter styled by the `[convert]` config section.
fn converter_from_config(config: &Config) -> MarkdownConverter {
    MarkdownConverter::new()
        .theme(config.convert.code_theme.clone())
        .line_numbers(config.convert.line_numbers)
}

/// Absolute directory containing `file`, for resolving relative image paths.
fn document_dir(file: &Path) -> std::io::Result<PathBuf> {
    let absolute = std::path::absolute(file)?;
    Ok(absolute
        .parent()
        .map_or_else(|| PathBuf::from("/"), Path::to_path_buf))
}

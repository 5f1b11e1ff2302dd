//! `mdpub convert` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use mdpub_config::Config;
use mdpub_convert::ConversionContext;
use mdpub_document::Document;

use super::converter_from_config;
use crate::error::CliError;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Path to the markdown file.
    markdown_file: PathBuf,

    /// Page id for attachment image paths (default: the front matter `id`).
    #[arg(long)]
    page_id: Option<String>,

    /// Path to configuration file (default: auto-discover mdpub.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ConvertArgs {
    /// Execute the convert command, writing storage format to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or converted.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let document = Document::load(&self.markdown_file)?;

        let page_id = self.page_id.or_else(|| document.id());
        let context = page_id
            .as_deref()
            .map_or_else(ConversionContext::new, ConversionContext::with_page_id);
        let html = converter_from_config(&config).convert(&document.content, &context)?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(html.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

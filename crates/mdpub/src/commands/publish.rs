//! `mdpub publish` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdpub_config::{CliSettings, Config};
use mdpub_confluence::{ConfluenceClient, PageSettings, PublishError, Publisher, dry_run};
use mdpub_document::Document;
use tracing::info;

use super::{converter_from_config, document_dir};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the publish command.
#[derive(Args)]
pub(crate) struct PublishArgs {
    /// Path to the markdown file.
    markdown_file: PathBuf,

    /// File holding the Confluence personal access token (overrides config).
    token_file: Option<PathBuf>,

    /// Confluence base URL (overrides config; front matter `base_url` wins).
    #[arg(long, env = "CONFLUENCE_BASE_URL")]
    base_url: Option<String>,

    /// Preview the converted page and attachments without contacting Confluence.
    #[arg(long)]
    dry_run: bool,

    /// Path to configuration file (default: auto-discover mdpub.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (shows each API call).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl PublishArgs {
    /// Execute the publish command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, converting, or publishing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            base_url: self.base_url.clone(),
            token_file: self.token_file.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            info!("Using configuration from {}", path.display());
        }

        let mut document = Document::load(&self.markdown_file)?;
        let base_dir = document_dir(&self.markdown_file)?;
        let converter = converter_from_config(&config);

        output.info(&format!("Converting {}...", self.markdown_file.display()));

        if self.dry_run {
            let result = dry_run(&converter, &document, &base_dir)?;
            output.dry_run_summary(&result);
            return Ok(());
        }

        let token = config.resolve_token()?;
        let settings =
            PageSettings::resolve(&document, config.confluence.base_url.as_deref(), token)?;

        let client = ConfluenceClient::new(&settings.base_url, &settings.token);
        let result = Publisher::new(&client, &converter)
            .publish(&mut document, &settings, &base_dir)
            .map_err(|error| publish_error(error, &settings))?;

        document.save(&self.markdown_file)?;
        output.publish_summary(&result);

        Ok(())
    }
}

fn publish_error(error: PublishError, settings: &PageSettings) -> CliError {
    CliError::Publish {
        error,
        base_url: settings.base_url.clone(),
        space_key: settings.target.space_key.clone(),
        page_id: settings.id.clone().unwrap_or_else(|| "new".to_owned()),
    }
}

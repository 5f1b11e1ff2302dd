//! mdpub CLI - publish Markdown documents as Confluence pages.
//!
//! Provides commands for:
//! - `publish`: Create or update the page for a document
//! - `convert`: Print a document's Confluence storage format

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, PublishArgs};
use output::Output;

/// mdpub - Markdown to Confluence publisher.
#[derive(Parser)]
#[command(name = "mdpub", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update the Confluence page for a Markdown file.
    Publish(PublishArgs),
    /// Print the Confluence storage format of a Markdown file.
    Convert(ConvertArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Publish(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Publish(args) => args.execute(),
        Commands::Convert(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

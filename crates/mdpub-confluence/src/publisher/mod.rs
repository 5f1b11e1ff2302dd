//! Create-or-update workflow for one document.
//!
//! A document without an `id` goes through two phases, because relative image
//! paths can only point at attachments once the page id is known:
//!
//! 1. Convert without an id and create the page
//! 2. Convert again with the new id, upload attachments, update the page
//!
//! A document with an `id` is converted once, checked against the server's
//! current id and version, and updated to the next version.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use mdpub_confluence::{ConfluenceClient, PageSettings, Publisher};
//! use mdpub_convert::MarkdownConverter;
//! use mdpub_document::Document;
//!
//! let path = Path::new("docs/notes.md");
//! let mut document = Document::load(path)?;
//! let settings = PageSettings::resolve(
//!     &document,
//!     Some("https://confluence.example.com"),
//!     "token".to_owned(),
//! )?;
//!
//! let client = ConfluenceClient::new(&settings.base_url, &settings.token);
//! let converter = MarkdownConverter::new();
//! let result = Publisher::new(&client, &converter).publish(
//!     &mut document,
//!     &settings,
//!     Path::new("docs"),
//! )?;
//! document.save(path)?;
//! println!("{}", result.page.link);
//! # Ok(())
//! # }
//! ```

mod error;
mod executor;
mod result;

pub use error::PublishError;
pub use executor::{Publisher, dry_run};
pub use result::{DryRunResult, PublishResult};

//! Confluence publishing.
//!
//! - [`ConfluenceClient`]: REST client for pages, attachments, and labels
//! - [`PageRepository`]: the operations the publisher needs, implemented by
//!   the client and by test fakes
//! - [`Publisher`]: the create-or-update workflow
//! - [`PageSettings`]: per-document settings resolved from front matter and
//!   configuration

mod client;
mod error;
mod publisher;
mod repository;
mod settings;
mod types;

pub use client::ConfluenceClient;
pub use error::ConfluenceError;
pub use publisher::{DryRunResult, PublishError, PublishResult, Publisher, dry_run};
pub use repository::{PageHandle, PageRepository, PageTarget};
pub use settings::PageSettings;

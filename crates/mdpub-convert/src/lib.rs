//! Markdown to Confluence storage format conversion.
//!
//! This crate is pure text processing, no I/O:
//! - [`MarkdownConverter`]: Markdown plus an optional page id to a storage
//!   format page body
//! - [`AttachmentExtractor`]: local images a document references, as upload
//!   candidates
//!
//! # Example
//!
//! ```
//! use mdpub_convert::{AttachmentExtractor, ConversionContext, MarkdownConverter};
//!
//! let markdown = "[TOC]\n\n# Intro\n\n![arch](img/arch.png)\n";
//!
//! // First pass, before the page exists
//! let draft = MarkdownConverter::new()
//!     .convert(markdown, &ConversionContext::new())
//!     .unwrap();
//! assert!(draft.contains(r#"src="img/arch.png""#));
//!
//! let uploads: Vec<_> = AttachmentExtractor::new(markdown, "/docs")
//!     .candidates()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(uploads.len(), 1);
//! ```

mod attachments;
mod code_block;
mod comment;
mod converter;
mod error;
mod html;
mod image;
mod toc;

pub use attachments::{Attachment, AttachmentExtractor};
pub use converter::{ConversionContext, MarkdownConverter};
pub use error::ConvertError;

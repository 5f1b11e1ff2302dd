//! Confluence REST API response types.

mod page;

pub use page::{AttachmentsResponse, ContentResponse, Page};

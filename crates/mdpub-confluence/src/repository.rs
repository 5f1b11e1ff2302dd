//! Storage seam between the publisher and Confluence.

use std::path::Path;

use crate::client::ConfluenceClient;
use crate::error::ConfluenceError;

/// A page as known to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHandle {
    /// Server-assigned page id.
    pub id: String,
    /// Current version number, starting at 1.
    pub version: u32,
    /// Web UI link.
    pub link: String,
}

/// Where a page lives and what it is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTarget {
    /// Space key.
    pub space_key: String,
    /// Page title, unique within the space.
    pub title: String,
    /// Parent page id.
    pub ancestor_id: Option<String>,
}

/// Page, attachment, and label storage.
///
/// Lookups that find nothing return `Ok(None)`; every other failure is an error.
pub trait PageRepository {
    /// Find a page by title within a space.
    fn find_page(&self, space_key: &str, title: &str)
    -> Result<Option<PageHandle>, ConfluenceError>;

    /// Create a page with a storage-format body.
    fn create_page(&self, target: &PageTarget, body: &str) -> Result<PageHandle, ConfluenceError>;

    /// Replace a page's body, storing it under `version`.
    fn update_page(
        &self,
        target: &PageTarget,
        page_id: &str,
        body: &str,
        version: u32,
    ) -> Result<PageHandle, ConfluenceError>;

    /// Attachment id for a file name on a page.
    fn find_attachment(
        &self,
        page_id: &str,
        file_name: &str,
    ) -> Result<Option<String>, ConfluenceError>;

    /// Upload a local file, replacing an attachment of the same name.
    fn upsert_attachment(
        &self,
        page_id: &str,
        path: &Path,
        comment: &str,
    ) -> Result<(), ConfluenceError>;

    /// Add a global label to a page.
    fn add_label(&self, page_id: &str, label: &str) -> Result<(), ConfluenceError>;
}

impl PageRepository for ConfluenceClient {
    fn find_page(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Option<PageHandle>, ConfluenceError> {
        ConfluenceClient::find_page(self, space_key, title)
    }

    fn create_page(&self, target: &PageTarget, body: &str) -> Result<PageHandle, ConfluenceError> {
        ConfluenceClient::create_page(self, target, body)
    }

    fn update_page(
        &self,
        target: &PageTarget,
        page_id: &str,
        body: &str,
        version: u32,
    ) -> Result<PageHandle, ConfluenceError> {
        ConfluenceClient::update_page(self, target, page_id, body, version)
    }

    fn find_attachment(
        &self,
        page_id: &str,
        file_name: &str,
    ) -> Result<Option<String>, ConfluenceError> {
        ConfluenceClient::find_attachment(self, page_id, file_name)
    }

    fn upsert_attachment(
        &self,
        page_id: &str,
        path: &Path,
        comment: &str,
    ) -> Result<(), ConfluenceError> {
        ConfluenceClient::upsert_attachment(self, page_id, path, comment)
    }

    fn add_label(&self, page_id: &str, label: &str) -> Result<(), ConfluenceError> {
        ConfluenceClient::add_label(self, page_id, label)
    }
}

//! Publish result types.

use mdpub_convert::Attachment;

use crate::repository::PageHandle;

/// Result of a successful publish.
#[derive(Debug)]
pub struct PublishResult {
    /// Final page state after the last write.
    pub page: PageHandle,
    /// Whether the page was created by this run.
    pub created: bool,
    /// Number of attachments uploaded.
    pub attachments_uploaded: usize,
    /// Labels added to the page.
    pub labels_added: Vec<String>,
}

/// Result of a dry run (no network calls, nothing written).
#[derive(Debug)]
pub struct DryRunResult {
    /// Converted storage-format body.
    pub html: String,
    /// Page id used for image paths, when the document has one.
    pub page_id: Option<String>,
    /// Files that would be uploaded.
    pub attachments: Vec<Attachment>,
}

//! Label operations for Confluence API.

use serde_json::json;
use tracing::info;

use super::{ConfluenceClient, check_response};
use crate::error::ConfluenceError;

impl ConfluenceClient {
    /// Add a global label to a page. Adding an existing label is a no-op server-side.
    pub(crate) fn add_label(&self, page_id: &str, label: &str) -> Result<(), ConfluenceError> {
        let url = format!("{}/content/{}/label", self.api_url(), page_id);
        let payload = json!({"prefix": "global", "name": label});

        info!("Adding label '{}' to page {}", label, page_id);

        let payload_bytes = serde_json::to_vec(&payload)?;
        let result = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..]);
        check_response("POST", &url, result)?;
        Ok(())
    }
}

//! Page operations for Confluence API.

use serde_json::{Value, json};
use tracing::info;

use super::{ConfluenceClient, check_response, read_json};
use crate::error::ConfluenceError;
use crate::repository::{PageHandle, PageTarget};
use crate::types::{ContentResponse, Page};

impl ConfluenceClient {
    /// Find a page by title within a space.
    pub(crate) fn find_page(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Option<PageHandle>, ConfluenceError> {
        let url = format!("{}/content", self.api_url());

        info!("Looking up page '{}' in space {}", title, space_key);

        let result = self
            .agent
            .get(&url)
            .query("title", title)
            .query("spaceKey", space_key)
            .query("expand", "version")
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json")
            .call();
        let mut body = check_response("GET", &url, result)?;
        let response: ContentResponse = read_json("GET", &url, &mut body)?;

        Ok(response.results.into_iter().next().map(|page| {
            let link = page
                .links
                .as_ref()
                .and_then(|links| links.webui.as_deref())
                .map_or_else(
                    || self.page_link(&page.id),
                    |webui| format!("{}{}", self.base_url, webui),
                );
            PageHandle {
                id: page.id,
                version: page.version.number,
                link,
            }
        }))
    }

    /// Create a page under the target's ancestor.
    pub(crate) fn create_page(
        &self,
        target: &PageTarget,
        body: &str,
    ) -> Result<PageHandle, ConfluenceError> {
        let url = format!("{}/content", self.api_url());
        let payload = page_payload(target, body);

        info!(
            "Creating page '{}' in space {}",
            target.title, target.space_key
        );

        let payload_bytes = serde_json::to_vec(&payload)?;
        let result = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..]);
        let mut response_body = check_response("POST", &url, result)?;
        let page: Page = read_json("POST", &url, &mut response_body)?;

        info!(
            "Page created in {} with id {}",
            space_name(&page, target),
            page.id
        );
        Ok(self.handle(page))
    }

    /// Replace a page's body and title, storing it as `version`.
    ///
    /// `version` is the new version number, not the current one.
    pub(crate) fn update_page(
        &self,
        target: &PageTarget,
        page_id: &str,
        body: &str,
        version: u32,
    ) -> Result<PageHandle, ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), page_id);

        let mut payload = page_payload(target, body);
        payload["id"] = json!(page_id);
        payload["version"] = json!({"number": version, "minorEdit": true});

        info!("Updating page {} to version {}", page_id, version);

        let payload_bytes = serde_json::to_vec(&payload)?;
        let result = self
            .agent
            .put(&url)
            .header("Authorization", &self.auth_header())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..]);
        let mut response_body = check_response("PUT", &url, result)?;
        let page: Page = read_json("PUT", &url, &mut response_body)?;

        info!(
            "Page updated in {} with id {}",
            space_name(&page, target),
            page.id
        );
        Ok(self.handle(page))
    }

    fn handle(&self, page: Page) -> PageHandle {
        PageHandle {
            link: self.page_link(&page.id),
            id: page.id,
            version: page.version.number,
        }
    }
}

/// Request body shared by create and update.
fn page_payload(target: &PageTarget, body: &str) -> Value {
    let mut payload = json!({
        "type": "page",
        "title": target.title,
        "space": {"key": target.space_key},
        "body": {
            "storage": {
                "value": body,
                "representation": "storage"
            }
        }
    });
    if let Some(ancestor_id) = &target.ancestor_id {
        payload["ancestors"] = json!([{"id": ancestor_id}]);
    }
    payload
}

fn space_name<'a>(page: &'a Page, target: &'a PageTarget) -> &'a str {
    page.space
        .as_ref()
        .and_then(|s| s.name.as_deref())
        .unwrap_or(target.space_key.as_str())
}

//! Attachment operations for Confluence API.

use std::path::Path;

use rand::RngExt;
use tracing::info;

use super::{ConfluenceClient, check_response, read_json};
use crate::error::ConfluenceError;
use crate::types::AttachmentsResponse;

impl ConfluenceClient {
    /// Find an attachment on a page by file name, returning its id.
    pub(crate) fn find_attachment(
        &self,
        page_id: &str,
        file_name: &str,
    ) -> Result<Option<String>, ConfluenceError> {
        let url = format!("{}/content/{}/child/attachment", self.api_url(), page_id);

        let result = self
            .agent
            .get(&url)
            .query("filename", file_name)
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/json")
            .call();
        let mut body = check_response("GET", &url, result)?;
        let response: AttachmentsResponse = read_json("GET", &url, &mut body)?;

        Ok(response
            .results
            .into_iter()
            .find(|a| a.title == file_name)
            .map(|a| a.id))
    }

    /// Upload a file to a page, replacing an attachment with the same name.
    pub(crate) fn upsert_attachment(
        &self,
        page_id: &str,
        path: &Path,
        comment: &str,
    ) -> Result<(), ConfluenceError> {
        if !path.is_file() {
            return Err(ConfluenceError::AttachmentNotFound {
                path: path.to_path_buf(),
            });
        }
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ConfluenceError::AttachmentNotFound {
                path: path.to_path_buf(),
            })?;
        let data = std::fs::read(path)?;
        let content_type = mime_guess::from_path(path).first_or_octet_stream();

        let url = if let Some(attachment_id) = self.find_attachment(page_id, file_name)? {
            info!(
                "Replacing attachment '{}' (id={}) on page {}",
                file_name, attachment_id, page_id
            );
            format!(
                "{}/content/{}/child/attachment/{}/data",
                self.api_url(),
                page_id,
                attachment_id
            )
        } else {
            info!("Uploading attachment '{}' to page {}", file_name, page_id);
            format!("{}/content/{}/child/attachment", self.api_url(), page_id)
        };

        let boundary = format!("----MdpubFormBoundary{:016x}", rand::rng().random::<u64>());
        let body = multipart_body(&boundary, file_name, content_type.as_ref(), &data, comment);

        let result = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header())
            .header(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .header("X-Atlassian-Token", "no-check")
            .header("Accept", "application/json")
            .send(&body[..]);
        check_response("POST", &url, result)?;

        Ok(())
    }
}

/// Build a `multipart/form-data` body with a `file` part and a `comment` part.
fn multipart_body(
    boundary: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
    comment: &str,
) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len() + 512);

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");

    if !comment.is_empty() {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"comment\"\r\n\r\n");
        body.extend_from_slice(comment.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

//! Confluence REST API client.
//!
//! Provides a sync HTTP client for the Confluence Server/Data Center REST API
//! with personal access token (bearer) authentication.

mod attachments;
mod labels;
mod pages;

use serde::de::DeserializeOwned;
use ureq::http::Response;
use ureq::{Agent, Body};

use crate::error::ConfluenceError;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    token: String,
}

impl ConfluenceClient {
    /// Create a client for `base_url` authenticating with a personal access token.
    ///
    /// No request timeout is set; calls block until the transport gives up.
    pub fn new(base_url: &str, token: &str) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
        }
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }

    /// `Authorization` header value.
    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Web UI link for a page id.
    fn page_link(&self, page_id: &str) -> String {
        format!("{}/pages/viewpage.action?pageId={}", self.base_url, page_id)
    }
}

/// Turn a transport result into a body, failing on error statuses.
fn check_response(
    method: &'static str,
    url: &str,
    result: Result<Response<Body>, ureq::Error>,
) -> Result<Body, ConfluenceError> {
    let response = result.map_err(|source| ConfluenceError::HttpRequest {
        method,
        url: url.to_owned(),
        source,
    })?;

    let status = response.status().as_u16();
    let mut body = response.into_body();

    if status >= 400 {
        let error_body = body
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(ConfluenceError::HttpResponse {
            method,
            url: url.to_owned(),
            status,
            body: error_body,
        });
    }

    Ok(body)
}

/// Decode a JSON response body.
fn read_json<T: DeserializeOwned>(
    method: &'static str,
    url: &str,
    body: &mut Body,
) -> Result<T, ConfluenceError> {
    body.read_json().map_err(|source| ConfluenceError::HttpRequest {
        method,
        url: url.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ConfluenceClient::new("https://wiki.example.com/", "t");
        assert_eq!(client.api_url(), "https://wiki.example.com/rest/api");
    }

    #[test]
    fn test_auth_header_is_bearer() {
        let client = ConfluenceClient::new("https://wiki.example.com", "secret");
        assert_eq!(client.auth_header(), "Bearer secret");
    }

    #[test]
    fn test_page_link() {
        let client = ConfluenceClient::new("https://wiki.example.com", "t");
        assert_eq!(
            client.page_link("42"),
            "https://wiki.example.com/pages/viewpage.action?pageId=42"
        );
    }
}

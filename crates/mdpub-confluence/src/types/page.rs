//! Page and attachment response types.

use serde::Deserialize;

/// Confluence page as returned by the content endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Version information.
    pub version: Version,
    /// Space the page belongs to (present on create/update responses).
    #[serde(default)]
    pub space: Option<Space>,
    /// Hypermedia links.
    #[serde(rename = "_links", default)]
    pub links: Option<Links>,
}

/// Page version.
#[derive(Debug, Clone, Deserialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
}

/// Space summary, used for log messages.
#[derive(Debug, Clone, Deserialize)]
pub struct Space {
    /// Human-readable space name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Hypermedia links.
#[derive(Debug, Clone, Deserialize)]
pub struct Links {
    /// Web UI link, relative to the base URL.
    #[serde(default)]
    pub webui: Option<String>,
}

/// Content search response.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentResponse {
    /// Matching pages.
    pub results: Vec<Page>,
}

/// Attachment listing of a page, filtered by file name.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentsResponse {
    /// Attachments whose title matched the `filename` query.
    pub results: Vec<AttachmentRef>,
}

/// Id and file name of an existing attachment.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentRef {
    /// Attachment id, used to replace its data.
    pub id: String,
    /// File name.
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "results": [{
                "id": "65601",
                "type": "page",
                "title": "Release notes",
                "version": {"number": 7, "minorEdit": true},
                "_links": {"webui": "/display/ENG/Release+notes", "self": "x"}
            }],
            "size": 1
        }"#;
        let response: ContentResponse = serde_json::from_str(json).unwrap();
        let page = &response.results[0];
        assert_eq!(page.id, "65601");
        assert_eq!(page.version.number, 7);
        assert_eq!(
            page.links.as_ref().and_then(|l| l.webui.as_deref()),
            Some("/display/ENG/Release+notes")
        );
    }

    #[test]
    fn test_parse_create_response() {
        let json = r#"{
            "id": "70001",
            "title": "New page",
            "space": {"key": "ENG", "name": "Engineering"},
            "version": {"number": 1}
        }"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert_eq!(page.version.number, 1);
        assert_eq!(
            page.space.and_then(|s| s.name),
            Some("Engineering".to_owned())
        );
        assert!(page.links.is_none());
    }
}

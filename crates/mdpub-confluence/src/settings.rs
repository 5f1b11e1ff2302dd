//! Per-page publish settings.

use mdpub_config::require_http_url;
use mdpub_document::{Document, keys};

use crate::publisher::PublishError;
use crate::repository::PageTarget;

/// Everything needed to publish one document, resolved once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSettings {
    /// Confluence server base URL.
    pub base_url: String,
    /// Personal access token.
    pub token: String,
    /// Space, title, and parent of the page.
    pub target: PageTarget,
    /// Page id from a previous publish.
    pub id: Option<String>,
    /// Page version from a previous publish.
    pub version: Option<u32>,
    /// Labels to add after publishing.
    pub labels: Vec<String>,
}

impl PageSettings {
    /// Build settings from a document's front matter.
    ///
    /// A `base_url` in the front matter wins over `default_base_url`, which
    /// carries the command line and configuration file value.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::MissingField` when `title`, `space_key`, or a
    /// base URL is missing, and `PublishError::Config` for a non-HTTP base URL.
    pub fn resolve(
        document: &Document,
        default_base_url: Option<&str>,
        token: String,
    ) -> Result<Self, PublishError> {
        let base_url = document
            .base_url()
            .or_else(|| default_base_url.map(str::to_owned))
            .filter(|url| !url.trim().is_empty())
            .ok_or(PublishError::MissingField(keys::BASE_URL))?;
        require_http_url(&base_url, keys::BASE_URL)?;

        let title = document
            .title()
            .filter(|t| !t.trim().is_empty())
            .ok_or(PublishError::MissingField(keys::TITLE))?;
        let space_key = document
            .space_key()
            .filter(|s| !s.trim().is_empty())
            .ok_or(PublishError::MissingField(keys::SPACE_KEY))?;

        Ok(Self {
            base_url,
            token,
            target: PageTarget {
                space_key,
                title,
                ancestor_id: document.ancestor_id().filter(|a| !a.is_empty()),
            },
            id: document.id(),
            version: document.version()?,
            labels: document.labels()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn doc(yaml: &str) -> Document {
        Document::parse(&format!("---\n{yaml}---\nbody\n")).unwrap()
    }

    #[test]
    fn test_resolve_new_page() {
        let settings = PageSettings::resolve(
            &doc("title: Notes\nspace_key: ENG\nancestor_id: 100\nlabel: docs\n"),
            Some("https://wiki.example.com"),
            "t".to_owned(),
        )
        .unwrap();
        assert_eq!(
            settings,
            PageSettings {
                base_url: "https://wiki.example.com".to_owned(),
                token: "t".to_owned(),
                target: PageTarget {
                    space_key: "ENG".to_owned(),
                    title: "Notes".to_owned(),
                    ancestor_id: Some("100".to_owned()),
                },
                id: None,
                version: None,
                labels: vec!["docs".to_owned()],
            }
        );
    }

    #[test]
    fn test_front_matter_base_url_wins() {
        let settings = PageSettings::resolve(
            &doc("title: T\nspace_key: S\nbase_url: https://other.example.com\n"),
            Some("https://wiki.example.com"),
            String::new(),
        )
        .unwrap();
        assert_eq!(settings.base_url, "https://other.example.com");
    }

    #[test]
    fn test_existing_page_ids() {
        let settings = PageSettings::resolve(
            &doc("title: T\nspace_key: S\nid: 42\nversion: 3\n"),
            Some("https://wiki.example.com"),
            String::new(),
        )
        .unwrap();
        assert_eq!(settings.id.as_deref(), Some("42"));
        assert_eq!(settings.version, Some(3));
    }

    #[test]
    fn test_missing_fields() {
        let base = Some("https://wiki.example.com");
        let cases = [
            ("space_key: S\n", base, "title"),
            ("title: T\n", base, "space_key"),
            ("title: T\nspace_key: S\n", None, "base_url"),
        ];
        for (yaml, base_url, field) in cases {
            let err = PageSettings::resolve(&doc(yaml), base_url, String::new()).unwrap_err();
            assert!(
                matches!(err, PublishError::MissingField(f) if f == field),
                "{yaml}: {err}"
            );
        }
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let err = PageSettings::resolve(
            &doc("title: T\nspace_key: S\n"),
            Some("ftp://wiki.example.com"),
            String::new(),
        )
        .unwrap_err();
        assert!(matches!(err, PublishError::Config(_)));
    }
}

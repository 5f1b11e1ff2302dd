//! Markdown documents with YAML front matter.
//!
//! A document on disk is a YAML mapping between `---` lines followed by the
//! Markdown body:
//!
//! ```text
//! ---
//! title: Release notes
//! space_key: ENG
//! ---
//! # Release notes
//! ```
//!
//! Only the metadata is ever modified. The body is written back byte for byte,
//! and key order and unknown keys in the front matter survive a round trip.

mod error;

use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::info;

pub use error::DocumentError;

const DELIMITER: &str = "---";

/// Front matter keys with a meaning to the publisher.
pub mod keys {
    /// Server-assigned page id.
    pub const ID: &str = "id";
    /// Page version number.
    pub const VERSION: &str = "version";
    /// Web UI link of the page.
    pub const LINK: &str = "link";
    /// Page title.
    pub const TITLE: &str = "title";
    /// Space the page lives in.
    pub const SPACE_KEY: &str = "space_key";
    /// Parent page id.
    pub const ANCESTOR_ID: &str = "ancestor_id";
    /// Label, or list of labels, to add to the page.
    pub const LABEL: &str = "label";
    /// Confluence server base URL.
    pub const BASE_URL: &str = "base_url";
}

/// A Markdown document and its front matter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Front matter mapping.
    pub metadata: Mapping,
    /// Markdown body, exactly as read.
    pub content: String,
}

impl Document {
    /// Split text into front matter and body.
    ///
    /// Text that does not start with a `---` line has no front matter; the whole
    /// text is the body.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let text = text.trim_start_matches('\u{feff}');
        let Some(rest) = strip_delimiter_line(text) else {
            return Ok(Self {
                metadata: Mapping::new(),
                content: text.to_owned(),
            });
        };

        let mut yaml_len = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == DELIMITER {
                let yaml = &rest[..yaml_len];
                let content = &rest[yaml_len + line.len()..];
                return Ok(Self {
                    metadata: parse_mapping(yaml)?,
                    content: content.to_owned(),
                });
            }
            yaml_len += line.len();
        }

        Err(DocumentError::UnclosedFrontMatter)
    }

    /// Read and parse a document from disk.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Render front matter and body back to text.
    pub fn render(&self) -> Result<String, DocumentError> {
        if self.metadata.is_empty() {
            return Ok(self.content.clone());
        }
        let yaml = serde_yaml::to_string(&self.metadata)?;
        Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{}", self.content))
    }

    /// Write the document to disk, replacing the file.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let text = self.render()?;
        std::fs::write(path, text).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved front matter to {}", path.display());
        Ok(())
    }

    /// Scalar value as a string. Numbers and booleans are formatted.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.metadata.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Set a metadata value, keeping the key's position if it already exists.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.metadata
            .insert(Value::String(key.to_owned()), value.into());
    }

    /// Page id, if the page has been published before.
    pub fn id(&self) -> Option<String> {
        self.get_str(keys::ID).filter(|id| !id.is_empty())
    }

    /// Recorded page version.
    pub fn version(&self) -> Result<Option<u32>, DocumentError> {
        let Some(value) = self.metadata.get(keys::VERSION) else {
            return Ok(None);
        };
        let invalid = || DocumentError::InvalidField {
            field: keys::VERSION,
            message: format!("expected a positive integer, got {value:?}"),
        };
        let number = match value {
            Value::Number(n) => n.as_u64().ok_or_else(invalid)?,
            Value::String(s) => s.trim().parse().map_err(|_| invalid())?,
            Value::Null => return Ok(None),
            _ => return Err(invalid()),
        };
        u32::try_from(number)
            .ok()
            .filter(|v| *v >= 1)
            .map(Some)
            .ok_or_else(invalid)
    }

    /// Page title.
    pub fn title(&self) -> Option<String> {
        self.get_str(keys::TITLE)
    }

    /// Space key.
    pub fn space_key(&self) -> Option<String> {
        self.get_str(keys::SPACE_KEY)
    }

    /// Parent page id.
    pub fn ancestor_id(&self) -> Option<String> {
        self.get_str(keys::ANCESTOR_ID)
    }

    /// Server base URL set in the document itself.
    pub fn base_url(&self) -> Option<String> {
        self.get_str(keys::BASE_URL)
    }

    /// Labels from `label`, given either as one string or a list.
    pub fn labels(&self) -> Result<Vec<String>, DocumentError> {
        let invalid = || DocumentError::InvalidField {
            field: keys::LABEL,
            message: "expected a string or a list of strings".to_owned(),
        };
        match self.metadata.get(keys::LABEL) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(vec![s.clone()]),
            Some(Value::Sequence(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned).ok_or_else(invalid))
                .collect(),
            Some(_) => Err(invalid()),
        }
    }
}

/// Strip a leading `---` line, returning what follows it.
fn strip_delimiter_line(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(DELIMITER)?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

fn parse_mapping(yaml: &str) -> Result<Mapping, DocumentError> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str(yaml)? {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(DocumentError::NotAMapping),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = "---\ntitle: Release notes\nspace_key: ENG\nancestor_id: '1001'\nowner: team-a\n---\n# Release notes\n\nBody text.\n";

    #[test]
    fn test_parse_front_matter_and_body() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.title(), Some("Release notes".to_owned()));
        assert_eq!(doc.space_key(), Some("ENG".to_owned()));
        assert_eq!(doc.ancestor_id(), Some("1001".to_owned()));
        assert_eq!(doc.content, "# Release notes\n\nBody text.\n");
    }

    #[test]
    fn test_round_trip_preserves_body_and_keys() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.render().unwrap(), SAMPLE);
    }

    #[test]
    fn test_set_appends_new_keys_and_keeps_order() {
        let mut doc = Document::parse(SAMPLE).unwrap();
        doc.set(keys::ID, "42");
        doc.set(keys::VERSION, 2);
        doc.set(keys::TITLE, "Renamed");

        let rendered = doc.render().unwrap();
        assert_eq!(
            rendered,
            "---\ntitle: Renamed\nspace_key: ENG\nancestor_id: '1001'\nowner: team-a\nid: '42'\nversion: 2\n---\n# Release notes\n\nBody text.\n"
        );
        let reparsed = Document::parse(&rendered).unwrap();
        assert_eq!(reparsed.id(), Some("42".to_owned()));
        assert_eq!(reparsed.version().unwrap(), Some(2));
    }

    #[test]
    fn test_no_front_matter() {
        let doc = Document::parse("# Just markdown\n").unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.content, "# Just markdown\n");
        assert_eq!(doc.render().unwrap(), "# Just markdown\n");
    }

    #[test]
    fn test_horizontal_rule_in_body_not_a_delimiter() {
        let doc = Document::parse("---\ntitle: T\n---\nabove\n\n---\n\nbelow\n").unwrap();
        assert_eq!(doc.content, "above\n\n---\n\nbelow\n");
    }

    #[test]
    fn test_crlf_delimiters() {
        let doc = Document::parse("---\r\ntitle: T\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(doc.title(), Some("T".to_owned()));
        assert_eq!(doc.content, "body\r\n");
    }

    #[test]
    fn test_unclosed_front_matter() {
        assert!(matches!(
            Document::parse("---\ntitle: T\nbody"),
            Err(DocumentError::UnclosedFrontMatter)
        ));
    }

    #[test]
    fn test_front_matter_must_be_mapping() {
        assert!(matches!(
            Document::parse("---\n- a\n- b\n---\nbody"),
            Err(DocumentError::NotAMapping)
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            Document::parse("---\ntitle: [broken\n---\nbody"),
            Err(DocumentError::Yaml(_))
        ));
    }

    #[test]
    fn test_numeric_id_read_as_string() {
        let doc = Document::parse("---\nid: 12345\nversion: 3\n---\n").unwrap();
        assert_eq!(doc.id(), Some("12345".to_owned()));
        assert_eq!(doc.version().unwrap(), Some(3));
    }

    #[test]
    fn test_version_as_string() {
        let doc = Document::parse("---\nversion: '4'\n---\n").unwrap();
        assert_eq!(doc.version().unwrap(), Some(4));
    }

    #[test]
    fn test_invalid_version() {
        for yaml in ["version: zero", "version: 0", "version: -1", "version: [1]"] {
            let doc = Document::parse(&format!("---\n{yaml}\n---\n")).unwrap();
            assert!(
                matches!(doc.version(), Err(DocumentError::InvalidField { field: "version", .. })),
                "{yaml}"
            );
        }
    }

    #[test]
    fn test_labels_string_or_list() {
        let single = Document::parse("---\nlabel: docs\n---\n").unwrap();
        assert_eq!(single.labels().unwrap(), vec!["docs".to_owned()]);

        let list = Document::parse("---\nlabel: [docs, howto]\n---\n").unwrap();
        assert_eq!(list.labels().unwrap(), vec!["docs".to_owned(), "howto".to_owned()]);

        let none = Document::parse("---\ntitle: T\n---\n").unwrap();
        assert!(none.labels().unwrap().is_empty());

        let bad = Document::parse("---\nlabel: {a: b}\n---\n").unwrap();
        assert!(bad.labels().is_err());
    }

    #[test]
    fn test_empty_id_treated_as_absent() {
        let doc = Document::parse("---\nid: ''\n---\n").unwrap();
        assert_eq!(doc.id(), None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.md");
        let doc = Document::parse(SAMPLE).unwrap();
        doc.save(&path).unwrap();
        assert_eq!(Document::load(&path).unwrap(), doc);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Document::load(Path::new("/nonexistent/page.md")).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/page.md"));
    }
}

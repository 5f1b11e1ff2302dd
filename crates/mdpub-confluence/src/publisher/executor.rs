//! Publisher implementation.

use std::path::Path;

use mdpub_convert::{Attachment, AttachmentExtractor, ConversionContext, MarkdownConverter};
use mdpub_document::{Document, keys};
use tracing::info;

use crate::repository::{PageHandle, PageRepository, PageTarget};
use crate::settings::PageSettings;

use super::error::PublishError;
use super::result::{DryRunResult, PublishResult};

/// Publishes Markdown documents as Confluence pages.
pub struct Publisher<'a, R: PageRepository> {
    repo: &'a R,
    converter: &'a MarkdownConverter,
}

impl<'a, R: PageRepository> Publisher<'a, R> {
    /// Create a new publisher.
    #[must_use]
    pub fn new(repo: &'a R, converter: &'a MarkdownConverter) -> Self {
        Self { repo, converter }
    }

    /// Create or update the page for `document` and record the result in its
    /// front matter.
    ///
    /// Relative image paths are resolved against `base_dir`. The document is
    /// only modified in memory; the caller saves it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the Markdown cannot be converted or an image tag has no `src`
    /// - a new page collides with an existing one
    /// - the front matter id or version disagrees with the server
    /// - Confluence API calls fail or an attachment file is missing
    pub fn publish(
        &self,
        document: &mut Document,
        settings: &PageSettings,
        base_dir: &Path,
    ) -> Result<PublishResult, PublishError> {
        let attachments = collect_attachments(&document.content, base_dir)?;

        let (page, created) = if let Some(id) = &settings.id {
            let page = self.update_existing(document, settings, id, &attachments)?;
            (page, false)
        } else {
            let page = self.create_new(document, &settings.target, &attachments)?;
            (page, true)
        };

        for label in &settings.labels {
            self.repo.add_label(&page.id, label)?;
        }

        document.set(keys::ID, page.id.clone());
        document.set(keys::VERSION, page.version);
        document.set(keys::LINK, page.link.clone());

        Ok(PublishResult {
            page,
            created,
            attachments_uploaded: attachments.len(),
            labels_added: settings.labels.clone(),
        })
    }

    fn update_existing(
        &self,
        document: &Document,
        settings: &PageSettings,
        id: &str,
        attachments: &[Attachment],
    ) -> Result<PageHandle, PublishError> {
        let body = self
            .converter
            .convert(&document.content, &ConversionContext::with_page_id(id))?;

        let current = self.fetch_current(&settings.target, id, settings.version)?;
        let version = next_version(&current)?;
        self.upload_attachments(id, attachments)?;

        let page = self
            .repo
            .update_page(&settings.target, id, &body, version)?;
        info!("Updated page {} to version {}", page.id, page.version);
        Ok(page)
    }

    fn create_new(
        &self,
        document: &Document,
        target: &PageTarget,
        attachments: &[Attachment],
    ) -> Result<PageHandle, PublishError> {
        let draft = self
            .converter
            .convert(&document.content, &ConversionContext::new())?;

        if let Some(existing) = self.repo.find_page(&target.space_key, &target.title)? {
            return Err(PublishError::PageExists {
                space_key: target.space_key.clone(),
                title: target.title.clone(),
                id: existing.id,
            });
        }

        let created = self.repo.create_page(target, &draft)?;
        info!("Created page {}, re-converting with its id", created.id);

        let body = self.converter.convert(
            &document.content,
            &ConversionContext::with_page_id(&created.id),
        )?;

        let current = self.fetch_current(target, &created.id, Some(created.version))?;
        let version = next_version(&current)?;
        self.upload_attachments(&created.id, attachments)?;

        let page = self
            .repo
            .update_page(target, &created.id, &body, version)?;
        Ok(page)
    }

    /// Fetch the page by title and space, requiring it to match `id` and `version`.
    fn fetch_current(
        &self,
        target: &PageTarget,
        id: &str,
        version: Option<u32>,
    ) -> Result<PageHandle, PublishError> {
        let current = self
            .repo
            .find_page(&target.space_key, &target.title)?
            .ok_or_else(|| PublishError::PageNotFound {
                space_key: target.space_key.clone(),
                title: target.title.clone(),
            })?;

        if current.id != id {
            return Err(PublishError::Inconsistent {
                field: keys::ID,
                local: id.to_owned(),
                remote: current.id,
            });
        }
        if version != Some(current.version) {
            return Err(PublishError::Inconsistent {
                field: keys::VERSION,
                local: version.map_or_else(|| "none".to_owned(), |v| v.to_string()),
                remote: current.version.to_string(),
            });
        }
        Ok(current)
    }

    fn upload_attachments(
        &self,
        page_id: &str,
        attachments: &[Attachment],
    ) -> Result<(), PublishError> {
        for attachment in attachments {
            self.repo
                .upsert_attachment(page_id, &attachment.path, &attachment.comment)?;
        }
        Ok(())
    }
}

/// Convert a document and list its attachments without touching the network.
///
/// # Errors
///
/// Returns an error if the Markdown cannot be converted or an image tag has
/// no `src`.
pub fn dry_run(
    converter: &MarkdownConverter,
    document: &Document,
    base_dir: &Path,
) -> Result<DryRunResult, PublishError> {
    let page_id = document.id();
    let context = page_id
        .as_deref()
        .map_or_else(ConversionContext::new, ConversionContext::with_page_id);
    let html = converter.convert(&document.content, &context)?;
    let attachments = collect_attachments(&document.content, base_dir)?;

    Ok(DryRunResult {
        html,
        page_id,
        attachments,
    })
}

/// Version number for the next write of `current`.
fn next_version(current: &PageHandle) -> Result<u32, PublishError> {
    current
        .version
        .checked_add(1)
        .ok_or_else(|| PublishError::Inconsistent {
            field: keys::VERSION,
            local: current.version.to_string(),
            remote: "no representable next version".to_owned(),
        })
}

fn collect_attachments(markdown: &str, base_dir: &Path) -> Result<Vec<Attachment>, PublishError> {
    Ok(AttachmentExtractor::new(markdown, base_dir)
        .candidates()
        .collect::<Result<_, _>>()?)
}

//! Publish summaries and colored terminal output.
//!
//! Summaries are built as styled lines first, so their content can be tested
//! without a terminal.

use console::{Style, Term};
use mdpub_confluence::{DryRunResult, PageHandle, PublishResult};

/// Color of one output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    Success,
    Warning,
    Error,
    Heading,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Plain => Style::new(),
            Self::Success => Style::new().green(),
            Self::Warning => Style::new().yellow(),
            Self::Error => Style::new().red(),
            Self::Heading => Style::new().cyan().bold(),
        }
    }
}

type Line = (Tone, String);

/// Writes progress, summaries, and errors to stderr.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    /// Print a progress message.
    pub(crate) fn info(&self, msg: &str) {
        self.write(Tone::Plain, msg);
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.write(Tone::Error, msg);
    }

    /// Print the outcome of a publish.
    pub(crate) fn publish_summary(&self, result: &PublishResult) {
        self.write_all(publish_lines(result));
    }

    /// Print what a publish would do.
    pub(crate) fn dry_run_summary(&self, result: &DryRunResult) {
        self.write_all(dry_run_lines(result));
    }

    fn write_all(&self, lines: Vec<Line>) {
        for (tone, text) in lines {
            self.write(tone, &text);
        }
    }

    fn write(&self, tone: Tone, msg: &str) {
        let _ = self.term.write_line(&tone.style().apply_to(msg).to_string());
    }
}

/// Id, version, and link of a page.
fn page_summary(page: &PageHandle) -> Vec<Line> {
    vec![
        (Tone::Plain, format!("ID: {}", page.id)),
        (Tone::Plain, format!("Version: {}", page.version)),
        (Tone::Plain, format!("URL: {}", page.link)),
    ]
}

fn publish_lines(result: &PublishResult) -> Vec<Line> {
    let headline = if result.created {
        "\nPage created successfully!"
    } else {
        "\nPage updated successfully!"
    };
    let mut lines = vec![(Tone::Success, headline.to_owned())];
    lines.extend(page_summary(&result.page));

    if result.attachments_uploaded > 0 {
        lines.push((
            Tone::Plain,
            format!("Attachments uploaded: {}", result.attachments_uploaded),
        ));
    }
    if !result.labels_added.is_empty() {
        lines.push((
            Tone::Plain,
            format!("Labels: {}", result.labels_added.join(", ")),
        ));
    }
    lines
}

fn dry_run_lines(result: &DryRunResult) -> Vec<Line> {
    let mut lines = vec![(Tone::Heading, "\n[DRY RUN] No changes made.".to_owned())];

    lines.push((
        Tone::Plain,
        match &result.page_id {
            Some(id) => format!("Page id: {id}"),
            None => "Page id: none (page would be created)".to_owned(),
        },
    ));
    lines.push((Tone::Plain, format!("Body: {} bytes", result.html.len())));

    if result.attachments.is_empty() {
        lines.push((Tone::Plain, "\nNo attachments.".to_owned()));
        return lines;
    }

    lines.push((
        Tone::Plain,
        format!("\nAttachments ({}):", result.attachments.len()),
    ));
    let mut missing = false;
    for attachment in &result.attachments {
        let exists = attachment.path.is_file();
        missing |= !exists;
        let marker = if exists { "->" } else { "!!" };
        lines.push((
            Tone::Plain,
            format!("  {marker} {}", attachment.path.display()),
        ));
    }
    if missing {
        lines.push((
            Tone::Warning,
            "Files marked !! do not exist and would fail the upload.".to_owned(),
        ));
    }
    lines
}

//! Invoice composition, printing and sharing
//!
//! Printing renders the invoice as text to any writer. Sharing hands the
//! summary text to a chain of targets and stops at the first one that is
//! available.

use std::io::Write;
use std::process::{Command, Stdio};

use chrono::{Local, NaiveDate};

use crate::config::settings::Settings;
use crate::display::invoice::render_invoice;
use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::models::invoice::InvoiceError;
use crate::models::{InvoiceConfig, InvoiceDocument, ProjectId};
use crate::storage::Storage;

/// Why a share target did not take the text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    /// The mechanism does not exist here; try the next target
    Unavailable,
    Failed(String),
}

/// Something that can receive an invoice summary
pub trait ShareTarget {
    fn name(&self) -> &'static str;

    fn share(&self, title: &str, text: &str) -> Result<(), ShareError>;
}

/// Pipes the text into a configured shell command
pub struct CommandShare {
    command: Option<String>,
}

impl CommandShare {
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }
}

impl ShareTarget for CommandShare {
    fn name(&self) -> &'static str {
        "share command"
    }

    fn share(&self, title: &str, text: &str) -> Result<(), ShareError> {
        let command = match self.command.as_deref().map(str::trim) {
            Some(command) if !command.is_empty() => command,
            _ => return Err(ShareError::Unavailable),
        };
        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or(ShareError::Unavailable)?;

        let mut child = Command::new(program)
            .args(parts)
            .env("CREATORFLOW_SHARE_TITLE", title)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ShareError::Unavailable,
                _ => ShareError::Failed(e.to_string()),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| ShareError::Failed(e.to_string()))?;
        }
        let status = child.wait().map_err(|e| ShareError::Failed(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(ShareError::Failed(format!("{} exited with {}", program, status)))
        }
    }
}

/// System clipboard, when built with the `clipboard` feature
pub struct ClipboardShare;

impl ShareTarget for ClipboardShare {
    fn name(&self) -> &'static str {
        "clipboard"
    }

    #[cfg(feature = "clipboard")]
    fn share(&self, _title: &str, text: &str) -> Result<(), ShareError> {
        let mut clipboard = arboard::Clipboard::new().map_err(|_| ShareError::Unavailable)?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ShareError::Failed(e.to_string()))
    }

    #[cfg(not(feature = "clipboard"))]
    fn share(&self, _title: &str, _text: &str) -> Result<(), ShareError> {
        Err(ShareError::Unavailable)
    }
}

/// Last resort: write the text where the user can copy it
pub struct PrintShare<W: Write> {
    out: std::cell::RefCell<W>,
}

impl<W: Write> PrintShare<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: std::cell::RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> ShareTarget for PrintShare<W> {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn share(&self, _title: &str, text: &str) -> Result<(), ShareError> {
        let mut out = self.out.borrow_mut();
        writeln!(out, "{}", text).map_err(|e| ShareError::Failed(e.to_string()))
    }
}

/// Try each target in order; unavailable or failing targets fall through
///
/// Returns the name of the target that took the text.
pub fn share_with_fallback(
    invoice: &InvoiceDocument,
    currency_symbol: &str,
    targets: &[&dyn ShareTarget],
) -> CreatorFlowResult<&'static str> {
    let title = invoice.share_title();
    let text = invoice.share_text(currency_symbol);
    let mut failures = Vec::new();

    for target in targets {
        match target.share(&title, &text) {
            Ok(()) => {
                tracing::info!(invoice = %invoice.number, target = target.name(), "Shared invoice");
                return Ok(target.name());
            }
            Err(ShareError::Unavailable) => {
                tracing::debug!(target = target.name(), "Share target unavailable");
            }
            Err(ShareError::Failed(reason)) => {
                tracing::warn!(target = target.name(), %reason, "Share target failed");
                failures.push(format!("{}: {}", target.name(), reason));
            }
        }
    }

    Err(CreatorFlowError::Share(if failures.is_empty() {
        "No share target available".into()
    } else {
        failures.join("; ")
    }))
}

pub struct InvoiceService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> InvoiceService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Compose an invoice for a project as of today
    pub fn build(&self, project_id: ProjectId, config: &InvoiceConfig) -> CreatorFlowResult<InvoiceDocument> {
        self.build_on(project_id, config, Local::now().date_naive())
    }

    pub fn build_on(
        &self,
        project_id: ProjectId,
        config: &InvoiceConfig,
        today: NaiveDate,
    ) -> CreatorFlowResult<InvoiceDocument> {
        let project = self
            .storage
            .projects
            .get(project_id)?
            .ok_or_else(|| CreatorFlowError::project_not_found(project_id.to_string()))?;

        let invoice = InvoiceDocument::build(&project, config, &self.settings.invoice, today)
            .map_err(|e: InvoiceError| CreatorFlowError::Validation(e.to_string()))?;
        tracing::debug!(invoice = %invoice.number, project = %project.id, "Built invoice");
        Ok(invoice)
    }

    /// Render the printable invoice into `out`
    pub fn print<W: Write>(&self, invoice: &InvoiceDocument, out: &mut W) -> CreatorFlowResult<()> {
        render_invoice(invoice, &self.settings.currency_symbol, out)
            .map_err(|e| CreatorFlowError::Io(format!("Failed to print invoice: {}", e)))
    }

    /// Share the summary through `targets`, in the configured currency
    pub fn share(
        &self,
        invoice: &InvoiceDocument,
        targets: &[&dyn ShareTarget],
    ) -> CreatorFlowResult<&'static str> {
        share_with_fallback(invoice, &self.settings.currency_symbol, targets)
    }

    /// The configured share command followed by the clipboard
    pub fn default_targets(&self) -> (CommandShare, ClipboardShare) {
        (
            CommandShare::new(self.settings.invoice.share_command.clone()),
            ClipboardShare,
        )
    }
}

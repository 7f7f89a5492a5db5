//! Batch orchestration over the external collaborator seams
//!
//! The extraction core stays pure; everything that talks to the outside
//! world goes through the traits below so callers can plug in their mail
//! transport, ledger and notification channels. Per-message error
//! isolation is the standing rule: one message's failure never halts its
//! siblings.

use crate::error::ExtractError;
use crate::message::RawMessage;
use crate::pipeline::extract_lead;
use crate::types::LedgerRow;
use std::fmt;
use tracing::{info, warn};

/// Errors surfaced by collaborators; always retryable, the message stays
/// unread for the next cycle.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Template identifier for the first-contact notifications.
pub const WELCOME_TEMPLATE: &str = "welcome";

/// Mail-retrieval collaborator.
pub trait MailSource {
    /// Identifiers of unread messages matching the lead query.
    fn list_unread(&mut self) -> Result<Vec<String>, TransportError>;

    /// Fetch one message by identifier.
    fn fetch(&mut self, id: &str) -> Result<RawMessage, TransportError>;

    /// Mark a message as read, suppressing retries for it.
    fn mark_read(&mut self, id: &str) -> Result<(), TransportError>;
}

/// Append-only ledger collaborator.
pub trait LedgerSink {
    fn append(&mut self, row: &LedgerRow) -> Result<(), TransportError>;
}

/// Templated messaging collaborator (WhatsApp in production).
pub trait Messenger {
    fn send_template(&mut self, to: &str, template: &str, name: &str)
    -> Result<(), TransportError>;
}

/// Templated email collaborator.
pub trait Mailer {
    fn send_template(
        &mut self,
        to: &str,
        name: &str,
        template: &str,
        product: &str,
        requirements: &str,
    ) -> Result<(), TransportError>;
}

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Names of leads appended to the ledger
    pub added: Vec<String>,

    /// Messages that failed, with their reasons
    pub failed: Vec<BatchFailure>,
}

/// One failed message in a batch.
#[derive(Debug)]
pub struct BatchFailure {
    pub message_id: String,
    pub reason: String,
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully processed {} leads: {}.",
            self.added.len(),
            self.added.join(", ")
        )?;
        if !self.failed.is_empty() {
            let reasons: Vec<String> = self
                .failed
                .iter()
                .map(|fail| format!("{} ({})", fail.message_id, fail.reason))
                .collect();
            write!(
                f,
                " Failed {} emails. IDs/Reasons: {}",
                self.failed.len(),
                reasons.join("; ")
            )?;
        }
        Ok(())
    }
}

/// Process every unread lead message once.
///
/// Extraction rejections are final for their message: the reason is
/// recorded and the message marked read so malformed content is not
/// refetched forever. Collaborator failures leave the message unread for
/// the next cycle. Only `list_unread` failing aborts the run.
pub fn process_batch<S, L, M, E>(
    source: &mut S,
    ledger: &mut L,
    messenger: &mut M,
    mailer: &mut E,
) -> Result<BatchReport, TransportError>
where
    S: MailSource,
    L: LedgerSink,
    M: Messenger,
    E: Mailer,
{
    let ids = source.list_unread()?;
    let mut report = BatchReport::default();

    if ids.is_empty() {
        info!("No new emails found matching criteria.");
        return Ok(report);
    }
    info!("Found {} new email(s). Processing...", ids.len());

    for id in ids {
        match process_message(&id, source, ledger, messenger, mailer) {
            Ok(name) => report.added.push(name),
            Err(reason) => {
                warn!("Failed to process {id}: {reason}");
                report.failed.push(BatchFailure {
                    message_id: id,
                    reason,
                });
            }
        }
    }

    info!("Batch finished. {report}");
    Ok(report)
}

fn process_message<S, L, M, E>(
    id: &str,
    source: &mut S,
    ledger: &mut L,
    messenger: &mut M,
    mailer: &mut E,
) -> Result<String, String>
where
    S: MailSource,
    L: LedgerSink,
    M: Messenger,
    E: Mailer,
{
    let message = source.fetch(id).map_err(|e| format!("fetch: {e}"))?;

    let lead = match extract_lead(&message) {
        Ok(lead) => lead,
        Err(reason) => {
            // Malformed content will not parse better next cycle; mark it
            // read so it stops being refetched.
            if let Err(e) = source.mark_read(id) {
                warn!("Could not mark unparseable {id} as read: {e}");
            }
            return Err(disposition_reason(&reason));
        }
    };

    ledger
        .append(&LedgerRow::new(&lead))
        .map_err(|e| format!("ledger append: {e}"))?;
    info!("Added lead to ledger: {} (ID: {id})", lead.name);

    messenger
        .send_template(&lead.phone, WELCOME_TEMPLATE, &lead.name)
        .map_err(|e| format!("messenger: {e}"))?;
    mailer
        .send_template(
            &lead.email,
            &lead.name,
            WELCOME_TEMPLATE,
            &lead.product,
            &lead.message,
        )
        .map_err(|e| format!("mailer: {e}"))?;

    source.mark_read(id).map_err(|e| format!("mark read: {e}"))?;

    Ok(lead.name)
}

fn disposition_reason(error: &ExtractError) -> String {
    match error {
        ExtractError::BodyExtractionFailed => format!("{error} (no body)"),
        _ => format!("{error} (parsing failed)"),
    }
}

//! Webhook status-update dispatch
//!
//! Decoupled from extraction: a CRM-side webhook posts
//! `{status, name, phone, email}` and fixed status strings map to
//! notification template identifiers. Pure dispatch over the same
//! collaborator seams the batch uses.

use crate::batch::{Mailer, Messenger, TransportError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Recognized CRM status values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeadStatus {
    Contacted,
    OrderConfirmed,
}

impl LeadStatus {
    /// Parse the fixed status strings the CRM sends.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Contacted" => Some(Self::Contacted),
            "Order Confirmed" => Some(Self::OrderConfirmed),
            _ => None,
        }
    }

    /// Messaging template identifier for this status.
    #[must_use]
    pub const fn messaging_template(self) -> &'static str {
        match self {
            Self::Contacted => "contacted_template_name",
            Self::OrderConfirmed => "order_confirmed_template_name",
        }
    }

    /// Email template identifier for this status.
    #[must_use]
    pub const fn email_template(self) -> &'static str {
        match self {
            Self::Contacted => "contacted",
            Self::OrderConfirmed => "order_confirmed",
        }
    }
}

/// Payload of one status-update webhook call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl StatusUpdate {
    /// Parse a webhook JSON body.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }
}

/// Send the notifications a status change calls for.
///
/// Unrecognized statuses are ignored, matching the CRM contract: new
/// status values roll out there first.
pub fn dispatch_status_update<M, E>(
    update: &StatusUpdate,
    messenger: &mut M,
    mailer: &mut E,
) -> Result<(), TransportError>
where
    M: Messenger,
    E: Mailer,
{
    let Some(status) = LeadStatus::parse(&update.status) else {
        debug!("Ignoring unhandled status: {}", update.status);
        return Ok(());
    };

    messenger.send_template(&update.phone, status.messaging_template(), &update.name)?;
    mailer.send_template(
        &update.email,
        &update.name,
        status.email_template(),
        "",
        "",
    )?;

    Ok(())
}

//! Core types for extracted leads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sender address identifying the buy-lead format
const BUY_LEAD_SENDER: &str = "buyleads@indiamart.com";

/// Sender address variants identifying the enquiry format
const ENQUIRY_SENDERS: [&str; 2] = [
    "buyershelpdesk@indiamart.com",
    "buyershelp+enq@indiamart.com",
];

/// Status written into the last ledger column for a fresh lead
pub const NEW_LEAD_STATUS: &str = "New Lead";

/// Which marketplace template produced a message.
///
/// Determined once per message from the sender address alone; no further
/// heuristics resolve format ambiguity. `Unknown` is terminal and always
/// yields an extraction failure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceFormat {
    BuyLead,
    Enquiry,
    Unknown,
}

impl SourceFormat {
    /// Classify a message by its sender address.
    ///
    /// Substring containment is sufficient here: the source addresses are
    /// well-known constants and `From` headers carry display names around
    /// them.
    #[must_use]
    pub fn from_sender(sender: &str) -> Self {
        if sender.contains(BUY_LEAD_SENDER) {
            Self::BuyLead
        } else if ENQUIRY_SENDERS.iter().any(|known| sender.contains(known)) {
            Self::Enquiry
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuyLead => write!(f, "buy lead"),
            Self::Enquiry => write!(f, "enquiry"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Canonical record extracted from one source email.
///
/// Only the validator constructs a `Lead`: name, phone, email and product
/// are non-empty, `phone` is digits-only and country-prefixed, and the
/// company heuristics have already cleared location false positives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lead {
    /// Buyer display name
    pub name: String,

    /// Company name; empty when the candidate was a location or pin code
    pub company: String,

    /// First mailto-style contact address; not re-validated for RFC shape
    pub email: String,

    /// Digits-only phone, "91" country prefix plus national number
    pub phone: String,

    /// Enquired product or category
    pub product: String,

    /// Newline-joined `Key: Value` requirement lines, document order
    pub message: String,
}

/// The fixed 8-column tuple the ledger sink expects:
/// `[timestamp, name, company, phone, email, product, message, status]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerRow(pub [String; 8]);

impl LedgerRow {
    /// Build a row for a lead timestamped now.
    #[must_use]
    pub fn new(lead: &Lead) -> Self {
        Self::at(lead, Utc::now())
    }

    /// Build a row for a lead at an explicit timestamp.
    #[must_use]
    pub fn at(lead: &Lead, timestamp: DateTime<Utc>) -> Self {
        Self([
            timestamp.to_rfc3339(),
            lead.name.clone(),
            lead.company.clone(),
            lead.phone.clone(),
            lead.email.clone(),
            lead.product.clone(),
            lead.message.clone(),
            NEW_LEAD_STATUS.to_string(),
        ])
    }

    /// Ordered cells of the row.
    #[must_use]
    pub const fn cells(&self) -> &[String; 8] {
        &self.0
    }
}

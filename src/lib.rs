// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Marketplace Lead Extractor
//!
//! Recovers canonical `Lead` records from the two loosely-templated HTML
//! email formats a B2B marketplace sends for new leads, failing safely
//! with a typed reason on malformed or unexpected input.
//!
//! # Pipeline
//!
//! raw message → normalize (decode + parse HTML) → classify by sender →
//! format-specific extraction → validate/canonicalize → `Lead` or
//! `ExtractError`.
//!
//! # Example
//!
//! ```rust
//! use lead_extract::{MessagePart, RawMessage, extract_lead, ExtractError};
//!
//! let message = RawMessage {
//!     id: "m1".into(),
//!     sender: "someone@example.com".into(),
//!     subject: "Hello".into(),
//!     payload: MessagePart::leaf("text/html", "<p>hi</p>"),
//! };
//!
//! // Unknown senders are rejected before any field extraction runs.
//! assert!(matches!(
//!     extract_lead(&message),
//!     Err(ExtractError::UnrecognizedSender(_))
//! ));
//! ```

mod batch;
mod document;
mod error;
mod extract;
mod message;
mod pipeline;
mod status;
mod types;
mod validate;

pub use batch::{
    BatchFailure, BatchReport, LedgerSink, MailSource, Mailer, Messenger, TransportError,
    WELCOME_TEMPLATE, process_batch,
};
pub use document::NormalizedDocument;
pub use error::{ExtractError, Result};
pub use extract::{BuyLeadExtractor, EnquiryExtractor, Extractor, RawLead, extractor_for};
pub use message::{MessagePart, RawMessage};
pub use pipeline::extract_lead;
pub use status::{LeadStatus, StatusUpdate, dispatch_status_update};
pub use types::{Lead, LedgerRow, NEW_LEAD_STATUS, SourceFormat};
pub use validate::{canonicalize_phone, validate};

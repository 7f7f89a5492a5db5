//! Error types for lead extraction

use thiserror::Error;

/// Typed rejection reasons produced by the extraction pipeline.
///
/// Every variant is a content failure isolated to one message: none of
/// these is retryable, so the orchestrator marks the source message as
/// read once the reason has been logged. Transport failures travel
/// separately as [`crate::TransportError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No decodable HTML payload found in the message part tree
    #[error("no decodable HTML payload found")]
    BodyExtractionFailed,

    /// Sender address matches neither known source format
    #[error("unrecognized sender: {0}")]
    UnrecognizedSender(String),

    /// Buy-lead document is missing its click-to-call contact block
    #[error("buy lead: no contact block found")]
    NoContactBlock,

    /// Enquiry document is missing its "Regards" contact section
    #[error("enquiry: could not find \"Regards\" section")]
    NoRegardsSection,

    /// No product name survived all extraction fallbacks
    #[error("could not extract product")]
    MissingProduct,

    /// Name, phone or email came back empty
    #[error("could not extract name, phone or email")]
    MissingContactFields,

    /// Fewer than 10 raw digits in the extracted phone number
    #[error("phone number {0} too short")]
    PhoneTooShort(String),

    /// Failed to parse a raw RFC 822 message into a payload tree
    #[error("failed to parse message structure: {0}")]
    Structure(String),
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

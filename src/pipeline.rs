//! Extraction pipeline: normalize, classify, extract, validate

use crate::document::NormalizedDocument;
use crate::error::{ExtractError, Result};
use crate::extract::extractor_for;
use crate::message::RawMessage;
use crate::types::{Lead, SourceFormat};
use crate::validate::validate;
use tracing::{debug, warn};

/// Run one message through the full extraction pipeline.
///
/// Pure with respect to its input: no I/O, no shared state, safe to call
/// concurrently over a batch of messages. Any stage failure short-circuits
/// to the typed rejection; a partially-filled [`Lead`] never escapes.
pub fn extract_lead(message: &RawMessage) -> Result<Lead> {
    let document = NormalizedDocument::from_message(message)?;

    let format = SourceFormat::from_sender(&message.sender);
    let Some(extractor) = extractor_for(format) else {
        warn!("Unknown email format from: {}", message.sender);
        return Err(ExtractError::UnrecognizedSender(message.sender.clone()));
    };

    let raw = extractor.extract(&document, &message.subject)?;
    let lead = validate(raw)?;

    debug!("Extracted {} lead: {} / {}", format, lead.name, lead.product);

    Ok(lead)
}

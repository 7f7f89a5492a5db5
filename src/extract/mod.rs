//! Format-specific field extractors
//!
//! One [`Extractor`] implementation per recognized source format, selected
//! through [`extractor_for`]. Extractors are tolerant by contract: every
//! query returns a best-effort string or an empty one, and only the loss
//! of a structural anchor (contact block, "Regards" section) aborts a
//! message.

mod buy_lead;
mod enquiry;

pub use buy_lead::BuyLeadExtractor;
pub use enquiry::EnquiryExtractor;

use crate::document::{NormalizedDocument, element_text};
use crate::error::Result;
use crate::types::SourceFormat;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

/// Raw field set produced by an extractor, before validation.
///
/// Any field may be empty; the validator decides what that means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLead {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub product: String,
    pub message: String,
}

/// One extraction strategy for one source format.
pub trait Extractor: Send + Sync {
    /// Extract raw lead fields from a normalized document.
    ///
    /// The subject line is consulted only by formats with subject-based
    /// fallbacks. First match wins throughout; queries never raise past
    /// this boundary except for the format's structural-anchor error.
    fn extract(&self, document: &NormalizedDocument, subject: &str) -> Result<RawLead>;
}

/// Look up the extractor for a classified format.
///
/// `Unknown` has no extractor; the pipeline turns that into
/// [`crate::ExtractError::UnrecognizedSender`].
#[must_use]
pub fn extractor_for(format: SourceFormat) -> Option<&'static dyn Extractor> {
    match format {
        SourceFormat::BuyLead => Some(&BuyLeadExtractor),
        SourceFormat::Enquiry => Some(&EnquiryExtractor),
        SourceFormat::Unknown => None,
    }
}

// Contact links shared by both formats.
pub(crate) static CALL_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[href*="call+"]"#).unwrap());
pub(crate) static MAILTO_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[href*="mailto:"]"#).unwrap());

/// Text of the first link matching `selector` inside `scope`, or empty.
pub(crate) fn link_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope.select(selector).next().map(element_text).unwrap_or_default()
}

/// Keep only ASCII digits, the shape both call links and the validator use.
pub(crate) fn digits_only(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// True when a company candidate is a recognized false positive from
/// location or pin-code text.
pub(crate) fn is_company_false_positive(candidate: &str) -> bool {
    candidate.is_empty()
        || candidate.eq_ignore_ascii_case("india")
        || candidate.chars().all(|c| c.is_ascii_digit())
}

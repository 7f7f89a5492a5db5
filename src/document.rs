//! Transport decoding and the structured-document query surface
//!
//! Wraps `scraper` (servo's html5ever) behind the handful of queries the
//! extractors need: first match of a selector, first element whose text
//! contains a phrase, and closest ancestor of a kind.

use crate::error::{ExtractError, Result};
use crate::message::RawMessage;
use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use scraper::{ElementRef, Html, Selector};

// Transport data arrives URL-safe; accept both alphabets and tolerate
// missing padding by mapping to the standard alphabet before decoding.
const BODY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A parsed HTML document for a single message, decoded once and queried
/// by the format-specific extractors.
#[derive(Debug)]
pub struct NormalizedDocument {
    html: Html,
}

impl NormalizedDocument {
    /// Locate, decode and parse the HTML body of a message.
    ///
    /// Returns [`ExtractError::BodyExtractionFailed`] when no part yields
    /// decodable data or the decoded text is empty; classification never
    /// runs for such messages.
    pub fn from_message(message: &RawMessage) -> Result<Self> {
        let data = message
            .payload
            .body_data()
            .ok_or(ExtractError::BodyExtractionFailed)?;
        let text = decode_body(data)?;
        if text.trim().is_empty() {
            return Err(ExtractError::BodyExtractionFailed);
        }
        Ok(Self::from_html(&text))
    }

    /// Parse already-decoded HTML text.
    #[must_use]
    pub fn from_html(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// First element matching `selector`, in document order.
    #[must_use]
    pub fn first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// First element matching `selector` whose text contains `needle`.
    #[must_use]
    pub fn first_containing(&self, selector: &Selector, needle: &str) -> Option<ElementRef<'_>> {
        self.html
            .select(selector)
            .find(|el| element_text(*el).contains(needle))
    }
}

/// Nearest ancestor (or the element itself) with the given tag name.
#[must_use]
pub fn closest<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    if element.value().name() == tag {
        return Some(element);
    }
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == tag)
}

/// Text content of an element with whitespace collapsed and trimmed.
#[must_use]
pub fn element_text(element: ElementRef<'_>) -> String {
    collapse(element.text())
}

/// Text content of a standalone HTML fragment, collapsed and trimmed.
#[must_use]
pub fn fragment_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    collapse(fragment.root_element().text())
}

fn collapse<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let joined: String = parts.collect();
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_body(data: &str) -> Result<String> {
    // The transport uses the URL-safe variant: `-` for `+`, `_` for `/`.
    let cleaned: String = data
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let bytes = BODY_ENGINE
        .decode(cleaned.as_bytes())
        .map_err(|_| ExtractError::BodyExtractionFailed)?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

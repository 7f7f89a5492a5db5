//! Raw message payload trees and the RFC 822 ingestion adapter

use crate::error::{ExtractError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;

/// One node of a message payload tree.
///
/// A node is a leaf when `parts` is empty; leaves carry a MIME type and an
/// optional body encoded as URL-safe base64, the way the mail transport
/// delivers them. HTML leaves may be nested arbitrarily deep inside
/// multipart containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePart {
    /// MIME type of this part, e.g. `text/html` or `multipart/alternative`
    pub mime_type: String,

    /// URL-safe base64 body data, present on leaves only
    pub body: Option<String>,

    /// Child parts of a multipart container
    pub parts: Vec<MessagePart>,
}

impl MessagePart {
    /// Build a leaf part from decoded text, encoding it the way the
    /// transport would.
    #[must_use]
    pub fn leaf(mime_type: impl Into<String>, text: &str) -> Self {
        Self {
            mime_type: mime_type.into(),
            body: Some(URL_SAFE.encode(text)),
            parts: Vec::new(),
        }
    }

    /// Build a multipart container.
    #[must_use]
    pub fn container(mime_type: impl Into<String>, parts: Vec<Self>) -> Self {
        Self {
            mime_type: mime_type.into(),
            body: None,
            parts,
        }
    }

    fn is_html(&self) -> bool {
        self.mime_type.to_lowercase().contains("text/html")
    }

    /// Locate the body data to decode, in priority order: this node when
    /// it is an HTML leaf, then a depth-first search for the first HTML
    /// leaf, then any leaf carrying a body at all.
    pub(crate) fn body_data(&self) -> Option<&str> {
        if self.is_html() && self.body.is_some() {
            return self.body.as_deref();
        }
        self.find_html_leaf().or_else(|| self.find_any_leaf())
    }

    fn find_html_leaf(&self) -> Option<&str> {
        for part in &self.parts {
            if part.is_html()
                && let Some(data) = part.body.as_deref()
            {
                return Some(data);
            }
            if let Some(data) = part.find_html_leaf() {
                return Some(data);
            }
        }
        None
    }

    fn find_any_leaf(&self) -> Option<&str> {
        if let Some(data) = self.body.as_deref() {
            return Some(data);
        }
        self.parts.iter().find_map(Self::find_any_leaf)
    }
}

/// A source email as handed over by the mail-retrieval collaborator.
///
/// Borrowed by the core for the duration of one extraction call; the core
/// never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    /// Transport-level message identifier
    pub id: String,

    /// Sender address, possibly wrapped in a display name
    pub sender: String,

    /// Subject line
    pub subject: String,

    /// Payload part tree
    pub payload: MessagePart,
}

impl RawMessage {
    /// Parse a raw RFC 822 message into a payload tree.
    ///
    /// Covers transports that hand over whole messages rather than
    /// pre-split part trees. Missing `From`/`Subject` headers fall back
    /// to placeholders so classification can still run (and fail with a
    /// typed reason).
    pub fn from_rfc822(id: impl Into<String>, raw: &[u8]) -> Result<Self> {
        let parsed =
            mailparse::parse_mail(raw).map_err(|e| ExtractError::Structure(e.to_string()))?;

        let sender =
            header_value(&parsed.headers, "from").unwrap_or_else(|| "Unknown Sender".to_string());
        let subject =
            header_value(&parsed.headers, "subject").unwrap_or_else(|| "No Subject".to_string());

        Ok(Self {
            id: id.into(),
            sender,
            subject,
            payload: build_part(&parsed),
        })
    }
}

fn header_value(headers: &[mailparse::MailHeader], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|h| h.get_key().to_lowercase() == name)
        .map(mailparse::MailHeader::get_value)
}

fn build_part(mail: &mailparse::ParsedMail) -> MessagePart {
    if mail.subparts.is_empty() {
        MessagePart::leaf(
            mail.ctype.mimetype.clone(),
            &mail.get_body().unwrap_or_default(),
        )
    } else {
        MessagePart::container(
            mail.ctype.mimetype.clone(),
            mail.subparts.iter().map(build_part).collect(),
        )
    }
}

//! Required-field gate and phone canonicalization

use crate::error::{ExtractError, Result};
use crate::extract::{RawLead, digits_only};
use crate::types::Lead;

/// Turn a raw field set into a [`Lead`] or a typed rejection.
///
/// Company stays optional; name, phone, email and product must be present
/// and the phone must carry at least 10 raw digits.
pub fn validate(raw: RawLead) -> Result<Lead> {
    if raw.product.is_empty() {
        return Err(ExtractError::MissingProduct);
    }
    if raw.name.is_empty() || raw.phone.is_empty() || raw.email.is_empty() {
        return Err(ExtractError::MissingContactFields);
    }

    let phone = canonicalize_phone(&raw.phone)?;

    Ok(Lead {
        name: raw.name,
        company: raw.company,
        email: raw.email,
        phone,
        product: raw.product,
        message: raw.message,
    })
}

/// Canonicalize a phone number to its country-prefixed form.
///
/// Non-digits are stripped (the extractors already do this, re-enforced
/// here). Numbers with fewer than 10 digits are rejected; numbers not
/// already carrying the "91" prefix get it prepended around their last 10
/// digits. Idempotent on already-canonical input.
pub fn canonicalize_phone(phone: &str) -> Result<String> {
    let digits = digits_only(phone);
    if digits.len() < 10 {
        return Err(ExtractError::PhoneTooShort(digits));
    }
    if digits.starts_with("91") {
        Ok(digits)
    } else {
        Ok(format!("91{}", &digits[digits.len() - 10..]))
    }
}

//! Extractor for the buy-lead notification template

use super::{CALL_LINK, Extractor, MAILTO_LINK, RawLead, digits_only, is_company_false_positive,
            link_text};
use crate::document::{NormalizedDocument, closest, element_text, fragment_text};
use crate::error::{ExtractError, Result};
use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

// The product sits in an emphasized fragment inside an 18px-styled block.
static PRODUCT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[style*="font-size:18px"] strong"#).unwrap());
static STRONG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("strong").unwrap());
static TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

static BR_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
// "City, ST" trailer marks a location line, not a company name.
static STATE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i),\s*[a-z]{2}\s*$").unwrap());
// Trailing "- 400084" style pin codes are stripped off.
static PIN_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*-\s*\d{6,}\s*$").unwrap());

// Mutually exclusive template sub-variants anchor the requirements table
// by different labels; the first non-empty match wins and any further
// qualifying tables are dropped.
const REQUIREMENT_ANCHORS: [&str; 3] = ["Quantity", "Width", "Thickness"];

/// Extractor for buy-lead notifications.
pub struct BuyLeadExtractor;

impl Extractor for BuyLeadExtractor {
    fn extract(&self, document: &NormalizedDocument, _subject: &str) -> Result<RawLead> {
        let product = document.first(&PRODUCT).map(element_text).unwrap_or_default();

        let call_link = document.first(&CALL_LINK).ok_or(ExtractError::NoContactBlock)?;
        let block = closest(call_link, "div").ok_or(ExtractError::NoContactBlock)?;

        // The block's inner markup is line-oriented: name first, then an
        // optional company/location line.
        let lines: Vec<String> = BR_SPLIT
            .split(&block.inner_html())
            .map(fragment_text)
            .collect();
        let name = lines.first().cloned().unwrap_or_default();
        let company = lines.get(1).map_or_else(String::new, |l| clean_company(l));

        let phone = digits_only(&link_text(block, &CALL_LINK));
        let email = link_text(block, &MAILTO_LINK);
        let message = requirements(document);

        Ok(RawLead {
            name,
            company,
            email,
            phone,
            product,
            message,
        })
    }
}

fn clean_company(line: &str) -> String {
    let line = line.trim();
    if STATE_SUFFIX.is_match(line) {
        return String::new();
    }
    let cleaned = PIN_SUFFIX.replace(line, "").trim().to_string();
    if is_company_false_positive(&cleaned) {
        String::new()
    } else {
        cleaned
    }
}

fn requirements(document: &NormalizedDocument) -> String {
    let table = REQUIREMENT_ANCHORS.iter().find_map(|anchor| {
        document
            .first_containing(&STRONG, anchor)
            .and_then(|el| closest(el, "table"))
    });
    let Some(table) = table else {
        return String::new();
    };

    let mut lines = Vec::new();
    for row in table.select(&TR) {
        let label = row.select(&STRONG).next().map(element_text).unwrap_or_default();
        let label = label.trim_end_matches(':').trim_end();
        let value = row.select(&TD).last().map(element_text).unwrap_or_default();
        if !label.is_empty() && !value.is_empty() && value != ":" {
            lines.push(format!("{label}: {value}"));
        }
    }
    lines.join("\n")
}

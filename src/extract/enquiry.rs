//! Extractor for the direct-enquiry notification template

use super::{CALL_LINK, Extractor, MAILTO_LINK, RawLead, digits_only, is_company_false_positive,
            link_text};
use crate::document::{NormalizedDocument, closest, element_text};
use crate::error::{ExtractError, Result};
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

static P: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
static B: LazyLock<Selector> = LazyLock::new(|| Selector::parse("b").unwrap());
static SPAN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());
static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static TABLE_TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table tr").unwrap());
static TD_SPAN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td > span").unwrap());

// Last-resort product source when the body paragraphs carry no bold
// product fragment.
static SUBJECT_PRODUCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Enquiry for (.*?) from").unwrap());

const PRODUCT_PHRASES: [&str; 2] = ["I am looking for", "I need"];
const REQUIREMENTS_ANCHOR: &str = "Below are the requirement details";

/// Extractor for direct enquiries.
pub struct EnquiryExtractor;

impl Extractor for EnquiryExtractor {
    fn extract(&self, document: &NormalizedDocument, subject: &str) -> Result<RawLead> {
        let product = product_of(document, subject);
        let message = requirements(document);

        let regards_cell = document
            .first_containing(&TD, "Regards")
            .ok_or(ExtractError::NoRegardsSection)?;
        let regards_table = closest(regards_cell, "table").ok_or(ExtractError::NoRegardsSection)?;

        // The sender's details follow the "Regards" row: name first, then
        // an optional company line.
        let regards_row = regards_table
            .select(&SPAN)
            .find(|el| element_text(*el).contains("Regards"))
            .and_then(|el| closest(el, "tr"))
            .or_else(|| closest(regards_cell, "tr"));
        let name_row = regards_row.and_then(next_row);
        let name = name_row
            .and_then(|row| row.select(&TD_SPAN).next())
            .map(element_text)
            .unwrap_or_default();
        let company = name_row
            .and_then(next_row)
            .map_or_else(String::new, company_of);

        let phone = digits_only(&link_text(regards_table, &CALL_LINK));
        let email = link_text(regards_table, &MAILTO_LINK)
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();

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

fn next_row(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "tr")
}

fn product_of(document: &NormalizedDocument, subject: &str) -> String {
    for phrase in PRODUCT_PHRASES {
        if let Some(paragraph) = document.first_containing(&P, phrase) {
            let bold = paragraph
                .select(&B)
                .next()
                .map(element_text)
                .unwrap_or_default();
            if !bold.is_empty() {
                return bold;
            }
        }
    }

    SUBJECT_PRODUCT
        .captures(subject)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().split(',').next().unwrap_or_default().trim().to_string())
        .unwrap_or_default()
}

fn requirements(document: &NormalizedDocument) -> String {
    let Some(anchor) = document.first_containing(&SPAN, REQUIREMENTS_ANCHOR) else {
        return String::new();
    };
    let Some(section) = closest(anchor, "tr") else {
        return String::new();
    };

    let mut lines = Vec::new();
    for row in section.select(&TABLE_TR) {
        let cells: Vec<_> = row.select(&TD).collect();
        // Cell 1 is the separator/colon cell between label and value.
        if cells.len() < 3 {
            continue;
        }
        let label = element_text(cells[0]);
        let label = label.trim_end_matches(':').trim_end();
        let value = element_text(cells[2]);
        if !label.is_empty() && !value.is_empty() {
            lines.push(format!("{label}: {value}"));
        }
    }
    lines.join("\n")
}

fn company_of(row: ElementRef<'_>) -> String {
    let text: String = row
        .select(&SPAN)
        .map(|el| el.text().collect::<String>())
        .collect();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.is_empty()
        || text.starts_with("Click to call:")
        || text.starts_with("Email:")
        || text.contains("verified")
    {
        return String::new();
    }

    let company = text.split(',').next().unwrap_or_default().trim().to_string();
    if is_company_false_positive(&company) {
        String::new()
    } else {
        company
    }
}

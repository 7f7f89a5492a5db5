use chrono::{TimeZone, Utc};
use lead_extract::{Lead, LedgerRow, NEW_LEAD_STATUS, SourceFormat};

#[test]
fn test_classify_buy_lead_sender() {
    assert_eq!(
        SourceFormat::from_sender("IndiaMART <buyleads@indiamart.com>"),
        SourceFormat::BuyLead
    );
}

#[test]
fn test_classify_enquiry_senders() {
    assert_eq!(
        SourceFormat::from_sender("buyershelpdesk@indiamart.com"),
        SourceFormat::Enquiry
    );
    assert_eq!(
        SourceFormat::from_sender("IndiaMART <buyershelp+enq@indiamart.com>"),
        SourceFormat::Enquiry
    );
}

#[test]
fn test_classify_unknown_sender() {
    assert_eq!(
        SourceFormat::from_sender("noreply@example.com"),
        SourceFormat::Unknown
    );
}

#[test]
fn test_classification_is_case_sensitive() {
    // Source addresses are fixed constants; nothing normalizes case.
    assert_eq!(
        SourceFormat::from_sender("BUYLEADS@INDIAMART.COM"),
        SourceFormat::Unknown
    );
}

fn sample_lead() -> Lead {
    Lead {
        name: "Rahul Shah".into(),
        company: String::new(),
        email: "rahul@x.com".into(),
        phone: "919987654321".into(),
        product: "BOPP Film".into(),
        message: "Quantity: 500 units".into(),
    }
}

#[test]
fn test_ledger_row_shape() {
    let at = Utc.with_ymd_and_hms(2026, 8, 23, 10, 30, 0).unwrap();
    let row = LedgerRow::at(&sample_lead(), at);
    let cells = row.cells();

    assert_eq!(cells[0], at.to_rfc3339());
    assert_eq!(cells[1], "Rahul Shah");
    assert_eq!(cells[2], "");
    assert_eq!(cells[3], "919987654321");
    assert_eq!(cells[4], "rahul@x.com");
    assert_eq!(cells[5], "BOPP Film");
    assert_eq!(cells[6], "Quantity: 500 units");
    assert_eq!(cells[7], NEW_LEAD_STATUS);
}

#[test]
fn test_lead_serializes_round_trip() {
    let lead = sample_lead();
    let json = serde_json::to_string(&lead).unwrap();
    let back: Lead = serde_json::from_str(&json).unwrap();
    assert_eq!(lead, back);
}

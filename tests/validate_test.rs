use lead_extract::{ExtractError, RawLead, canonicalize_phone, validate};

fn raw_lead() -> RawLead {
    RawLead {
        name: "Rahul Shah".into(),
        company: "Shah Films".into(),
        email: "rahul@x.com".into(),
        phone: "9987654321".into(),
        product: "BOPP Film".into(),
        message: "Quantity: 500 units".into(),
    }
}

#[test]
fn test_valid_lead_passes() {
    let lead = validate(raw_lead()).unwrap();

    assert_eq!(lead.name, "Rahul Shah");
    assert_eq!(lead.phone, "919987654321");
    assert_eq!(lead.company, "Shah Films");
}

#[test]
fn test_missing_product_rejected() {
    let raw = RawLead {
        product: String::new(),
        ..raw_lead()
    };
    assert_eq!(validate(raw), Err(ExtractError::MissingProduct));
}

#[test]
fn test_missing_contact_fields_rejected() {
    for field in ["name", "phone", "email"] {
        let mut raw = raw_lead();
        match field {
            "name" => raw.name.clear(),
            "phone" => raw.phone.clear(),
            _ => raw.email.clear(),
        }
        assert_eq!(
            validate(raw),
            Err(ExtractError::MissingContactFields),
            "field: {field}"
        );
    }
}

#[test]
fn test_empty_company_allowed() {
    let raw = RawLead {
        company: String::new(),
        ..raw_lead()
    };
    assert_eq!(validate(raw).unwrap().company, "");
}

#[test]
fn test_nine_digit_phone_rejected() {
    assert_eq!(
        canonicalize_phone("987654321"),
        Err(ExtractError::PhoneTooShort("987654321".into()))
    );
}

#[test]
fn test_ten_digit_phone_prefixed() {
    assert_eq!(canonicalize_phone("9876543210").unwrap(), "919876543210");
}

#[test]
fn test_prefixed_phone_unchanged() {
    assert_eq!(canonicalize_phone("919876543210").unwrap(), "919876543210");
}

#[test]
fn test_canonicalization_is_idempotent() {
    let once = canonicalize_phone("99876 54321").unwrap();
    let twice = canonicalize_phone(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_non_digits_stripped_before_length_check() {
    assert_eq!(
        canonicalize_phone("+91 99876 54321").unwrap(),
        "919987654321"
    );
    assert_eq!(
        canonicalize_phone("(98) 76-54"),
        Err(ExtractError::PhoneTooShort("987654".into()))
    );
}

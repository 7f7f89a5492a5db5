use lead_extract::{
    LedgerRow, LedgerSink, MailSource, Mailer, MessagePart, Messenger, RawMessage, StatusUpdate,
    TransportError, dispatch_status_update, process_batch,
};
use std::collections::HashMap;

const BUY_LEAD_HTML: &str = r#"
<html><body>
  <div style="font-size:18px"><strong>BOPP Film</strong></div>
  <div>
    Rahul Shah<br>
    Mumbai, MH<br>
    <a href="https://m.indiamart.com/call+919987654321">+91 99876 54321</a>
    <a href="mailto:rahul@x.com">rahul@x.com</a>
  </div>
  <table>
    <tr><td><strong>Quantity</strong></td><td>500 units</td></tr>
  </table>
</body></html>
"#;

fn buy_lead_message(id: &str) -> RawMessage {
    RawMessage {
        id: id.into(),
        sender: "buyleads@indiamart.com".into(),
        subject: "New BuyLead".into(),
        payload: MessagePart::leaf("text/html", BUY_LEAD_HTML),
    }
}

fn junk_message(id: &str) -> RawMessage {
    RawMessage {
        id: id.into(),
        sender: "spam@example.com".into(),
        subject: "Hello".into(),
        payload: MessagePart::leaf("text/html", "<p>hi</p>"),
    }
}

#[derive(Default)]
struct MockSource {
    unread: Vec<String>,
    messages: HashMap<String, RawMessage>,
    read: Vec<String>,
}

impl MockSource {
    fn with(messages: Vec<RawMessage>) -> Self {
        Self {
            unread: messages.iter().map(|m| m.id.clone()).collect(),
            messages: messages.into_iter().map(|m| (m.id.clone(), m)).collect(),
            read: Vec::new(),
        }
    }
}

impl MailSource for MockSource {
    fn list_unread(&mut self) -> Result<Vec<String>, TransportError> {
        Ok(self.unread.clone())
    }

    fn fetch(&mut self, id: &str) -> Result<RawMessage, TransportError> {
        self.messages
            .get(id)
            .cloned()
            .ok_or_else(|| "message vanished".into())
    }

    fn mark_read(&mut self, id: &str) -> Result<(), TransportError> {
        self.read.push(id.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct MockLedger {
    rows: Vec<LedgerRow>,
    fail: bool,
}

impl LedgerSink for MockLedger {
    fn append(&mut self, row: &LedgerRow) -> Result<(), TransportError> {
        if self.fail {
            return Err("sheets quota exceeded".into());
        }
        self.rows.push(row.clone());
        Ok(())
    }
}

#[derive(Default)]
struct MockMessenger {
    sent: Vec<(String, String, String)>,
}

impl Messenger for MockMessenger {
    fn send_template(
        &mut self,
        to: &str,
        template: &str,
        name: &str,
    ) -> Result<(), TransportError> {
        self.sent
            .push((to.to_string(), template.to_string(), name.to_string()));
        Ok(())
    }
}

#[derive(Default)]
struct MockMailer {
    sent: Vec<(String, String, String)>,
}

impl Mailer for MockMailer {
    fn send_template(
        &mut self,
        to: &str,
        name: &str,
        template: &str,
        _product: &str,
        _requirements: &str,
    ) -> Result<(), TransportError> {
        self.sent
            .push((to.to_string(), name.to_string(), template.to_string()));
        Ok(())
    }
}

#[test]
fn test_batch_happy_path() {
    let mut source = MockSource::with(vec![buy_lead_message("m1")]);
    let mut ledger = MockLedger::default();
    let mut messenger = MockMessenger::default();
    let mut mailer = MockMailer::default();

    let report = process_batch(&mut source, &mut ledger, &mut messenger, &mut mailer).unwrap();

    assert_eq!(report.added, vec!["Rahul Shah"]);
    assert!(report.failed.is_empty());

    assert_eq!(ledger.rows.len(), 1);
    let cells = ledger.rows[0].cells();
    assert_eq!(cells[1], "Rahul Shah");
    assert_eq!(cells[3], "919987654321");
    assert_eq!(cells[7], "New Lead");

    assert_eq!(
        messenger.sent,
        vec![(
            "919987654321".to_string(),
            "welcome".to_string(),
            "Rahul Shah".to_string()
        )]
    );
    assert_eq!(
        mailer.sent,
        vec![(
            "rahul@x.com".to_string(),
            "Rahul Shah".to_string(),
            "welcome".to_string()
        )]
    );
    assert_eq!(source.read, vec!["m1"]);
}

#[test]
fn test_unparseable_message_marked_read() {
    let mut source = MockSource::with(vec![junk_message("m1")]);
    let mut ledger = MockLedger::default();
    let mut messenger = MockMessenger::default();
    let mut mailer = MockMailer::default();

    let report = process_batch(&mut source, &mut ledger, &mut messenger, &mut mailer).unwrap();

    assert!(report.added.is_empty());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].message_id, "m1");
    assert!(ledger.rows.is_empty());
    assert!(messenger.sent.is_empty());
    // Malformed content is suppressed, not retried.
    assert_eq!(source.read, vec!["m1"]);
}

#[test]
fn test_ledger_failure_leaves_message_unread() {
    let mut source = MockSource::with(vec![buy_lead_message("m1")]);
    let mut ledger = MockLedger {
        fail: true,
        ..MockLedger::default()
    };
    let mut messenger = MockMessenger::default();
    let mut mailer = MockMailer::default();

    let report = process_batch(&mut source, &mut ledger, &mut messenger, &mut mailer).unwrap();

    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].reason.contains("ledger append"));
    // Transport failures stay retryable.
    assert!(source.read.is_empty());
    assert!(messenger.sent.is_empty());
}

#[test]
fn test_one_failure_does_not_halt_batch() {
    let mut source = MockSource::with(vec![junk_message("bad"), buy_lead_message("good")]);
    let mut ledger = MockLedger::default();
    let mut messenger = MockMessenger::default();
    let mut mailer = MockMailer::default();

    let report = process_batch(&mut source, &mut ledger, &mut messenger, &mut mailer).unwrap();

    assert_eq!(report.added, vec!["Rahul Shah"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].message_id, "bad");
    assert_eq!(ledger.rows.len(), 1);
}

#[test]
fn test_empty_mailbox_reports_nothing() {
    let mut source = MockSource::default();
    let mut ledger = MockLedger::default();
    let mut messenger = MockMessenger::default();
    let mut mailer = MockMailer::default();

    let report = process_batch(&mut source, &mut ledger, &mut messenger, &mut mailer).unwrap();

    assert!(report.added.is_empty());
    assert!(report.failed.is_empty());
}

#[test]
fn test_status_update_contacted() {
    let update = StatusUpdate::from_json(
        r#"{"status":"Contacted","name":"Rahul Shah","phone":"919987654321","email":"rahul@x.com"}"#,
    )
    .unwrap();

    let mut messenger = MockMessenger::default();
    let mut mailer = MockMailer::default();
    dispatch_status_update(&update, &mut messenger, &mut mailer).unwrap();

    assert_eq!(
        messenger.sent,
        vec![(
            "919987654321".to_string(),
            "contacted_template_name".to_string(),
            "Rahul Shah".to_string()
        )]
    );
    assert_eq!(mailer.sent[0].2, "contacted");
}

#[test]
fn test_status_update_order_confirmed() {
    let update = StatusUpdate {
        status: "Order Confirmed".into(),
        name: "Rahul Shah".into(),
        phone: "919987654321".into(),
        email: "rahul@x.com".into(),
    };

    let mut messenger = MockMessenger::default();
    let mut mailer = MockMailer::default();
    dispatch_status_update(&update, &mut messenger, &mut mailer).unwrap();

    assert_eq!(messenger.sent[0].1, "order_confirmed_template_name");
    assert_eq!(mailer.sent[0].2, "order_confirmed");
}

#[test]
fn test_unknown_status_ignored() {
    let update = StatusUpdate {
        status: "Shipped".into(),
        name: "Rahul Shah".into(),
        phone: "919987654321".into(),
        email: "rahul@x.com".into(),
    };

    let mut messenger = MockMessenger::default();
    let mut mailer = MockMailer::default();
    dispatch_status_update(&update, &mut messenger, &mut mailer).unwrap();

    assert!(messenger.sent.is_empty());
    assert!(mailer.sent.is_empty());
}

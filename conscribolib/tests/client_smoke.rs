use chrono::NaiveDate;
use conscribolib::{
    client::{Client, API_VERSION, API_VERSION_HEADER, SESSION_ID_HEADER},
    error::{ConscriboError, Result},
    model::{Credentials, DebitCredit, Transaction, TransactionRow},
    traits::{Headers, HttpResponse, Transport},
    xml::Element,
};
use std::cell::RefCell;
use std::collections::VecDeque;

const ENDPOINT: &str = "https://example.test/api";

#[derive(Debug, Clone)]
struct Sent {
    url: String,
    body: String,
    headers: Headers,
}

/// Отдаёт заранее заготовленные ответы по очереди и запоминает запросы.
#[derive(Debug, Default)]
struct FakeTransport {
    replies: RefCell<VecDeque<Result<HttpResponse>>>,
    sent: RefCell<Vec<Sent>>,
}

impl FakeTransport {
    fn reply(self, status: u16, text: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(HttpResponse { status, text: text.into() }));
        self
    }

    fn fail(self, msg: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Err(ConscriboError::Transport(msg.into())));
        self
    }

    fn sent(&self) -> Vec<Sent> {
        self.sent.borrow().clone()
    }
}

impl Transport for FakeTransport {
    fn post(&self, url: &str, body: String, headers: &Headers) -> Result<HttpResponse> {
        self.sent.borrow_mut().push(Sent {
            url: url.into(),
            body,
            headers: headers.clone(),
        });
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ConscriboError::Transport("no reply queued".into())))
    }
}

const AUTH_OK: &str = "<result><success>1</success><sessionId>S-1</sessionId></result>";
const LIST_OK: &str = "<result><success>1</success><transactions>\
<transaction><description>Groceries</description><date>2017-08-01</date></transaction>\
<transaction><description>Dues T#[3]</description><date>2017-08-01</date><transactionRows>\
<transactionRow><amount>10,00</amount><side>debit</side><accountNr>1200</accountNr></transactionRow>\
</transactionRows></transaction></transactions></result>";

fn creds() -> Credentials {
    Credentials::new("key", "secret")
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 8, 1).unwrap()
}

#[test]
fn connect_authenticates_with_version_header_only() {
    let t = FakeTransport::default().reply(200, AUTH_OK);
    let client = Client::connect(&t, ENDPOINT, &creds()).expect("connect");
    assert_eq!(client.session().id(), "S-1");

    let sent = t.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, ENDPOINT);
    assert_eq!(sent[0].headers.get(API_VERSION_HEADER).map(String::as_str), Some(API_VERSION));
    assert!(!sent[0].headers.contains_key(SESSION_ID_HEADER));

    let req = Element::parse(&sent[0].body).unwrap();
    assert_eq!(req.child_text("command"), Some("authenticate"));
    assert_eq!(req.child_text("apiIdentifierKey"), Some("key"));
    assert_eq!(req.child_text("passPhrase"), Some("secret"));
}

#[test]
fn connect_fails_fast() {
    let t = FakeTransport::default().reply(
        200,
        "<result><success>0</success><notifications><notification>bad key</notification></notifications></result>",
    );
    let err = Client::connect(&t, ENDPOINT, &creds()).unwrap_err();
    assert!(err.to_string().contains("bad key"));

    let t = FakeTransport::default().reply(503, "down");
    assert!(matches!(
        Client::connect(&t, ENDPOINT, &creds()),
        Err(ConscriboError::HttpStatus { status: 503, .. })
    ));

    let t = FakeTransport::default().fail("connection refused");
    assert!(matches!(
        Client::connect(&t, ENDPOINT, &creds()),
        Err(ConscriboError::Transport(_))
    ));

    let t = FakeTransport::default().reply(200, "<html>");
    assert!(matches!(
        Client::connect(&t, ENDPOINT, &creds()),
        Err(ConscriboError::Parse(_))
    ));
    assert_eq!(t.sent().len(), 1, "no retry");
}

#[test]
fn list_transactions_sends_session_and_filters() {
    let t = FakeTransport::default()
        .reply(200, AUTH_OK)
        .reply(200, LIST_OK)
        .reply(200, LIST_OK);
    let client = Client::connect(&t, ENDPOINT, &creds()).unwrap();

    let first = client.list_transactions(day(), day()).expect("list");
    let second = client.list_transactions(day(), day()).expect("list again");
    assert_eq!(first, second);
    assert_eq!(
        first,
        vec![Transaction {
            identifier: 3,
            description: "Dues T#[3]".into(),
            date: day(),
            rows: vec![TransactionRow { amount: 1000, account: 1200, dc: DebitCredit::Debit }],
        }]
    );

    let sent = t.sent();
    assert_eq!(sent.len(), 3);
    for s in &sent[1..] {
        assert_eq!(s.headers.get(SESSION_ID_HEADER).map(String::as_str), Some("S-1"));
        assert_eq!(s.headers.get(API_VERSION_HEADER).map(String::as_str), Some(API_VERSION));
        let req = Element::parse(&s.body).unwrap();
        assert_eq!(req.child_text("command"), Some("listTransactions"));
        assert!(req.child("limit").is_none());
        let filters = req.find_all("filters/filter");
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].child_text("dateStart"), Some("2017-08-01"));
        assert_eq!(filters[0].child_text("dateEnd"), Some("2017-08-01"));
    }
}

#[test]
fn api_failure_after_connect_is_surfaced() {
    let t = FakeTransport::default().reply(200, AUTH_OK).reply(
        200,
        "<result><success>0</success><notifications><notification>session expired</notification></notifications></result>",
    );
    let client = Client::connect(&t, ENDPOINT, &creds()).unwrap();
    let err = client.list_transactions(day(), day()).unwrap_err();
    assert!(matches!(err, ConscriboError::Api(_)));
    assert!(err.to_string().contains("session expired"));
}

#[test]
fn add_change_transaction_serializes_rows() {
    let t = FakeTransport::default()
        .reply(200, AUTH_OK)
        .reply(200, "<result><success>1</success></result>");
    let client = Client::connect(&t, ENDPOINT, &creds()).unwrap();

    let mut tx = Transaction::new(9, day());
    tx.rows.push(TransactionRow { amount: 1234, account: 1000, dc: DebitCredit::Credit });
    tx.rows.push(TransactionRow { amount: 1234, account: 1200, dc: DebitCredit::Debit });
    client.add_change_transaction(&tx).expect("add");

    let req = Element::parse(&t.sent()[1].body).unwrap();
    assert_eq!(req.child_text("command"), Some("addChangeTransaction"));
    assert_eq!(req.child_text("description"), Some("T#[9]"));
    assert_eq!(req.child_text("date"), Some("2017-08-01"));
    let rows = req.find_all("transactionRows/transactionRow");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].child_text("amount"), Some("12,34"));
    assert_eq!(rows[0].child_text("side"), Some("credit"));
    assert_eq!(rows[1].child_text("accountNr"), Some("1200"));
}

//! Исходящие запросы: `<request><command/>поля…</request>`.
//! Поля со значением `None` в документ не попадают совсем.

use crate::{
    api::transaction::format_amount,
    model::Transaction,
    traits::ToRequest,
    xml::Element,
};
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const AUTHENTICATE: &str = "authenticate";
pub const LIST_TRANSACTIONS: &str = "listTransactions";
pub const ADD_CHANGE_TRANSACTION: &str = "addChangeTransaction";

/// Команда плюс именованные скалярные поля в порядке добавления.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    command: String,
    fields: Vec<(String, Option<String>)>,
}

impl Request {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl ToRequest for Request {
    fn to_element(&self) -> Element {
        let mut root = Element::new("request");
        root.push_text_child("command", self.command.as_str());
        for (name, value) in &self.fields {
            if let Some(v) = value {
                root.push_text_child(name.as_str(), v.as_str());
            }
        }
        root
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticateRequest {
    api_key: String,
    passphrase: String,
}

impl AuthenticateRequest {
    pub fn new(api_key: impl Into<String>, passphrase: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            passphrase: passphrase.into(),
        }
    }
}

impl ToRequest for AuthenticateRequest {
    fn to_element(&self) -> Element {
        Request::new(AUTHENTICATE)
            .field("apiIdentifierKey", Some(self.api_key.clone()))
            .field("passPhrase", Some(self.passphrase.clone()))
            .to_element()
    }
}

/// Одна запись `<filter>`; отсутствующие границы не пишутся.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
}

impl DateFilter {
    fn to_element(self) -> Element {
        let mut f = Element::new("filter");
        if let Some(d) = self.date_start {
            f.push_text_child("dateStart", d.format(DATE_FORMAT).to_string());
        }
        if let Some(d) = self.date_end {
            f.push_text_child("dateEnd", d.format(DATE_FORMAT).to_string());
        }
        f
    }
}

/// `listTransactions` с необязательными `limit`/`offset`.
/// Контейнер `<filters>` пишется всегда, даже пустой.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionListRequest {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    filters: Vec<DateFilter>,
}

impl TransactionListRequest {
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit,
            offset,
            filters: Vec::new(),
        }
    }

    /// Каждый вызов добавляет отдельный фильтр.
    pub fn filter_date(
        &mut self,
        date_start: Option<NaiveDate>,
        date_end: Option<NaiveDate>,
    ) -> &mut Self {
        self.filters.push(DateFilter { date_start, date_end });
        self
    }

    pub fn filters(&self) -> &[DateFilter] {
        &self.filters
    }
}

impl ToRequest for TransactionListRequest {
    fn to_element(&self) -> Element {
        let mut root = Request::new(LIST_TRANSACTIONS)
            .field("limit", self.limit.map(|v| v.to_string()))
            .field("offset", self.offset.map(|v| v.to_string()))
            .to_element();
        let filters = root.push(Element::new("filters"));
        for f in &self.filters {
            filters.push(f.to_element());
        }
        root
    }
}

/// `addChangeTransaction`: проводка в той же форме, в какой её отдаёт `listTransactions`.
#[derive(Debug, Clone, Copy)]
pub struct AddChangeTransactionRequest<'a> {
    transaction: &'a Transaction,
}

impl<'a> AddChangeTransactionRequest<'a> {
    pub fn new(transaction: &'a Transaction) -> Self {
        Self { transaction }
    }
}

impl ToRequest for AddChangeTransactionRequest<'_> {
    fn to_element(&self) -> Element {
        let tx = self.transaction;
        let mut root = Request::new(ADD_CHANGE_TRANSACTION)
            .field("description", Some(tx.description.clone()))
            .field("date", Some(tx.date.format(DATE_FORMAT).to_string()))
            .to_element();
        let rows = root.push(Element::new("transactionRows"));
        for r in &tx.rows {
            let row = rows.push(Element::new("transactionRow"));
            row.push_text_child("accountNr", r.account.to_string());
            row.push_text_child("amount", format_amount(r.amount));
            row.push_text_child("side", r.dc.as_str());
        }
        root
    }
}

//! Доменные модели: учётные данные, проводки и их строки.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ключ API и пароль, передаются один раз при открытии сессии.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub passphrase: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, passphrase: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            passphrase: passphrase.into(),
        }
    }
}

// пароль в логи не попадает
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("passphrase", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DebitCredit {
    Debit,
    Credit,
}

impl DebitCredit {
    /// Значение поля `<side>`.
    pub fn as_str(self) -> &'static str {
        match self {
            DebitCredit::Debit => "debit",
            DebitCredit::Credit => "credit",
        }
    }
}

/// Строка проводки. `amount` в центах.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRow {
    pub amount: i64,
    pub account: u64,
    pub dc: DebitCredit,
}

impl TransactionRow {
    pub fn is_credit(&self) -> bool {
        self.dc == DebitCredit::Credit
    }
}

impl fmt::Display for TransactionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = if self.is_credit() { "Credit" } else { "Debit" };
        write!(f, "{} to {} {}", self.amount, self.account, side)
    }
}

/// Проводка с маркером `T#[id]` в описании; строки принадлежат только ей.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub identifier: u64,
    pub description: String,
    pub date: NaiveDate,
    pub rows: Vec<TransactionRow>,
}

impl Transaction {
    /// Новая проводка без строк; описание состоит из одного маркера.
    pub fn new(identifier: u64, date: NaiveDate) -> Self {
        Self {
            identifier,
            description: crate::marker::format(identifier),
            date,
            rows: Vec::new(),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} {}", self.identifier, self.date.format("%Y-%m-%d"), self.description)?;
        for row in &self.rows {
            writeln!(f, "  {row}")?;
        }
        Ok(())
    }
}

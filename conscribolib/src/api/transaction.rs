use crate::{
    api::request::DATE_FORMAT,
    error::{ConscriboError, Result},
    marker,
    model::{DebitCredit, Transaction, TransactionRow},
    xml::Element,
};
use chrono::NaiveDate;
use log::debug;
use rust_decimal::{prelude::ToPrimitive, Decimal};

impl Transaction {
    /// `Ok(None)`: в описании нет маркера, проводка не наша.
    pub fn from_element(node: &Element) -> Result<Option<Transaction>> {
        let description = required(node, "description")?;
        let Some(identifier) = marker::identifier(description)? else {
            debug!("skipping unmarked transaction {description:?}");
            return Ok(None);
        };

        let date_text = required(node, "date")?;
        let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT)
            .map_err(|e| ConscriboError::Mapping(format!("transaction date {date_text:?}: {e}")))?;

        let rows = node
            .find_all("transactionRows/transactionRow")
            .into_iter()
            .map(TransactionRow::from_element)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(Transaction {
            identifier,
            description: description.to_owned(),
            date,
            rows,
        }))
    }
}

impl TransactionRow {
    pub fn from_element(node: &Element) -> Result<TransactionRow> {
        let amount = parse_amount(required(node, "amount")?)?;

        let account_text = required(node, "accountNr")?;
        let account = account_text
            .parse::<u64>()
            .map_err(|e| ConscriboError::Mapping(format!("accountNr {account_text:?}: {e}")))?;

        // всё, что не "credit", считается дебетом
        let dc = match required(node, "side")? {
            "credit" => DebitCredit::Credit,
            _ => DebitCredit::Debit,
        };

        Ok(TransactionRow { amount, account, dc })
    }
}

fn required<'a>(node: &'a Element, name: &str) -> Result<&'a str> {
    node.child_text(name)
        .ok_or_else(|| ConscriboError::Mapping(format!("<{}> has no <{name}>", node.name)))
}

/// Сумма в центах. Запятая: десятичный разделитель; если она есть, точки
/// считаются разделителями тысяч. Без запятой строка читается как обычное
/// десятичное число. Дробь меньше цента отбрасывается.
pub fn parse_amount(text: &str) -> Result<i64> {
    let t = text.trim();
    let normalized = if t.contains(',') {
        t.replace('.', "").replace(',', ".")
    } else {
        t.to_owned()
    };

    let bad = || ConscriboError::Mapping(format!("amount {text:?}"));
    let value: Decimal = normalized.parse().map_err(|_| bad())?;
    value
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|v| v.trunc())
        .and_then(|v| v.to_i64())
        .ok_or_else(bad)
}

/// Обратное преобразование: `1234` -> `"12,34"`.
pub fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{},{:02}", abs / 100, abs % 100)
}

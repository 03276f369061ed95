//! Плоский CSV: одна строка на строку проводки.
//! Заголовки: identifier,date,description,account,amount,side (amount в центах).
//! Проводка без строк даёт одну строку с пустыми account/amount/side.

use crate::{error::Result, model::Transaction};
use csv::WriterBuilder;
use std::io::Write;

#[derive(serde::Serialize)]
struct CsvOutRow<'a> {
    identifier: u64,
    date: String,
    description: &'a str,
    account: Option<u64>,
    amount: Option<i64>,
    side: Option<&'static str>,
}

pub fn write_transactions<W: Write>(mut w: W, transactions: &[Transaction]) -> Result<()> {
    let mut wrt = WriterBuilder::new().from_writer(&mut w);

    for tx in transactions {
        let date = tx.date.format("%Y-%m-%d").to_string();
        if tx.rows.is_empty() {
            wrt.serialize(CsvOutRow {
                identifier: tx.identifier,
                date,
                description: &tx.description,
                account: None,
                amount: None,
                side: None,
            })?;
            continue;
        }
        for r in &tx.rows {
            wrt.serialize(CsvOutRow {
                identifier: tx.identifier,
                date: date.clone(),
                description: &tx.description,
                account: Some(r.account),
                amount: Some(r.amount),
                side: Some(r.dc.as_str()),
            })?;
        }
    }
    wrt.flush()?;
    Ok(())
}

//! Единый тип ошибок публичного API.
//!
//! Слои не смешиваются: транспорт (`Transport`, `HttpStatus`), разбор XML
//! (`Parse`), отказ API (`Api`) и несоответствие контракту (`Mapping`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConscriboError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("XML parse error: {0}")]
    Parse(String),

    #[error("API exception(s) occurred:\n{}", .0.join("\n"))]
    Api(Vec<String>),

    #[error("Mapping error: {0}")]
    Mapping(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ConscriboError>;

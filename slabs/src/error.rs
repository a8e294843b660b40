use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlabError {
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("slab not found: {0}")]
    NotFound(String),

    #[error("duplicate slab id: {0}")]
    DuplicateId(String),

    #[error("charge for slab {id} overflows at amount {amount}")]
    ChargeOverflow { id: String, amount: Decimal },

    #[error("unknown slab table: {0}")]
    UnknownTable(String),

    #[error("invalid value type: {0}")]
    InvalidValueType(String),
}

pub type Result<T> = std::result::Result<T, SlabError>;

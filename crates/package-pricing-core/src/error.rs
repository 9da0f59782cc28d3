use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Entry cap exceeded: {entries} annual entries is above the cap of {cap}")]
    EntryCapExceeded { entries: u64, cap: u64 },

    #[error("Tier exhausted: {value} exceeds the top threshold {top_threshold} of the {table} table")]
    TierExhausted {
        table: String,
        value: Decimal,
        top_threshold: Decimal,
    },

    #[error("Invalid fee schedule: {0}")]
    InvalidSchedule(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PricingError {
    fn from(e: serde_json::Error) -> Self {
        PricingError::SerializationError(e.to_string())
    }
}

//! Errors raised by the sample-data layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("No sample {kind} data for {symbol}")]
    NoSampleData { kind: &'static str, symbol: String },
    #[error("No earnings data for {symbol}")]
    NoEarnings { symbol: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

//! Errors for the outer layers of the dashboard.
//!
//! Contains error variants for:
//! - Fetching a published sheet (transport failure, non-success status)
//! - Loading configuration (I/O, malformed JSON)
//! - Writing reports (CSV serialization)
//!
//! The parser and the ledger extractor never produce these: bad cells,
//! missing rows and unbalanced quotes all degrade to defaults instead.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected response status: {0}")]
    Status(reqwest::StatusCode),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("sheet catalog is empty")]
    EmptyCatalog,
}

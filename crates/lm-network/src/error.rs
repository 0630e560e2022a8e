//! Network-subsystem error type.

use thiserror::Error;

use lm_core::{ClientId, WarehouseId};

/// Errors produced by `lm-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("travel table has {got} columns in row {row}, expected {expected}")]
    RaggedRow { row: usize, expected: usize, got: usize },

    #[error("travel table covers {got} {what}, instance has {expected}")]
    DimensionMismatch {
        what:     &'static str,
        expected: usize,
        got:      usize,
    },

    #[error("no travel time from {client} to {warehouse}")]
    MissingEntry { client: ClientId, warehouse: WarehouseId },

    #[error("instance error: {0}")]
    Instance(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;

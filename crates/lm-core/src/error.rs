//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::{ClientId, WarehouseId};

/// Errors raised by `lm-core` and shared by the sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("warehouse {0} not found")]
    WarehouseNotFound(WarehouseId),

    #[error("client {0} not found")]
    ClientNotFound(ClientId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `lm-core`.
pub type CoreResult<T> = Result<T, CoreError>;

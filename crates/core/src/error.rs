//! Domain error model.

use thiserror::Error;

use crate::value_object::{Money, Quantity};

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation, funds,
/// stock, ranges). Terminal and IO concerns belong to the CLI.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A purchase costs more than the current balance.
    #[error("insufficient funds (required: {required}, available: {available})")]
    InsufficientFunds { required: Money, available: Money },

    /// A sale asks for more units than are in stock (or the product is unknown).
    #[error("not enough stock of {product:?} (requested: {requested}, available: {available})")]
    InsufficientStock {
        product: String,
        requested: Quantity,
        available: Quantity,
    },

    /// A review range does not fit the operation log.
    #[error("invalid range [{start}, {end}) for log of length {len}")]
    InvalidRange { start: i64, end: i64, len: usize },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn insufficient_funds(required: Money, available: Money) -> Self {
        Self::InsufficientFunds { required, available }
    }

    pub fn insufficient_stock(
        product: impl Into<String>,
        requested: Quantity,
        available: Quantity,
    ) -> Self {
        Self::InsufficientStock {
            product: product.into(),
            requested,
            available,
        }
    }
}

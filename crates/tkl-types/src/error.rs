use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("price must not be negative")]
    NegativePrice,

    #[error("price exceeds the representable range")]
    PriceOverflow,

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

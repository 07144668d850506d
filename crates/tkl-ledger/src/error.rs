pub use tkl_crypto::ChainError as IntegrityError;

/// Rejection of a payload at append time. Nothing is appended.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("required field '{field}' is empty")]
    EmptyField { field: &'static str },

    #[error("price must be greater than zero")]
    NonPositivePrice,
}

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("integrity violation: {0}")]
    Integrity(#[from] IntegrityError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("ledger lock poisoned")]
    LockPoisoned,
}

impl LedgerError {
    /// Returns `true` for caller-correctable input rejections.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` when the chain failed verification.
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity(_))
    }
}

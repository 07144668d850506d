//! Append-only ticket ledger for the Ticket Ledger (TKL).
//!
//! This crate is the heart of TKL. It provides:
//! - [`Record`]: an immutable, hash-sealed entry linked to its predecessor
//! - [`Ledger`]: the single-owner chain with genesis, append, and verify
//! - [`SharedLedger`]: the same chain behind a lock for multi-caller use
//! - [`VerificationReport`]: per-index integrity diagnostics
//! - [`LedgerConfig`]: digest selection, loadable from TOML
//!
//! Construction computes and trusts a record's hash; verification always
//! recomputes it from the stored fields and compares.

pub mod config;
pub mod error;
pub mod ledger;
pub mod payload;
pub mod record;
pub mod shared;
pub mod validation;

pub use config::LedgerConfig;
pub use error::{IntegrityError, LedgerError, ValidationError};
pub use ledger::{Ledger, GENESIS_PREVIOUS_HASH};
pub use payload::Payload;
pub use record::Record;
pub use shared::SharedLedger;
pub use validation::VerificationReport;

pub use tkl_crypto::DigestAlgorithm;
pub use tkl_types::{Price, TicketSale, Timestamp};

//! Cryptographic primitives for the Ticket Ledger.
//!
//! Provides the record digest (SHA-256 by default, BLAKE3 on request) and
//! hash chain verification over anything that exposes its stored hash, its
//! predecessor link, and a way to recompute its own digest.
//!
//! All crypto operations wrap established libraries; there is no custom cryptography.

pub mod chain;
pub mod hasher;

pub use chain::{ChainError, ChainLink, HashChainVerifier};
pub use hasher::{DigestAlgorithm, RecordHasher};

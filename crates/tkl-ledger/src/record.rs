use serde::Serialize;
use tkl_crypto::{ChainLink, DigestAlgorithm, RecordHasher};
use tkl_types::{TicketSale, Timestamp};
use tracing::debug;

use crate::payload::Payload;

/// One immutable, hash-sealed ledger entry.
///
/// The hash is computed once, at construction, over
/// `timestamp ‖ payload fields ‖ previous_hash` using the canonical string
/// form of each part. Fields are read-only after construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Record<P = TicketSale> {
    timestamp: Timestamp,
    payload: P,
    previous_hash: String,
    hash: String,
    digest: DigestAlgorithm,
}

impl<P: Payload> Record<P> {
    /// Seal a payload at the current time with SHA-256.
    pub fn new(payload: P, previous_hash: impl Into<String>) -> Self {
        Self::seal(
            Timestamp::now(),
            payload,
            previous_hash,
            DigestAlgorithm::default(),
        )
    }

    /// Seal a payload with every digest input given explicitly.
    pub fn seal(
        timestamp: Timestamp,
        payload: P,
        previous_hash: impl Into<String>,
        digest: DigestAlgorithm,
    ) -> Self {
        let mut record = Self {
            timestamp,
            payload,
            previous_hash: previous_hash.into(),
            hash: String::new(),
            digest,
        };
        record.hash = record.compute_hash();
        debug!(hash = %record.hash, timestamp = %record.timestamp, "record sealed");
        record
    }

    /// Recompute the digest from the stored fields. Never reads the stored hash.
    pub fn compute_hash(&self) -> String {
        let fields = self.payload.canonical_fields();
        let mut parts = Vec::with_capacity(fields.len() + 2);
        parts.push(self.timestamp.canonical());
        parts.extend(fields);
        parts.push(self.previous_hash.clone());
        RecordHasher::new(self.digest).digest_parts(&parts)
    }

    /// Returns `true` if the stored hash matches the stored fields.
    pub fn is_sealed_correctly(&self) -> bool {
        self.compute_hash() == self.hash
    }
}

impl<P> Record<P> {
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    /// The hash stored at construction.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn digest(&self) -> DigestAlgorithm {
        self.digest
    }
}

#[cfg(test)]
impl<P> Record<P> {
    /// Mutable access for tamper tests. Does not reseal.
    pub(crate) fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    pub(crate) fn hash_mut(&mut self) -> &mut String {
        &mut self.hash
    }

    pub(crate) fn previous_hash_mut(&mut self) -> &mut String {
        &mut self.previous_hash
    }

    pub(crate) fn timestamp_mut(&mut self) -> &mut Timestamp {
        &mut self.timestamp
    }
}

impl<P: Payload> ChainLink for Record<P> {
    fn stored_hash(&self) -> &str {
        &self.hash
    }

    fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    fn recompute_hash(&self) -> String {
        self.compute_hash()
    }
}

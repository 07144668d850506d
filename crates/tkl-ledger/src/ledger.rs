use std::slice;

use tkl_crypto::HashChainVerifier;
use tkl_types::{TicketSale, Timestamp};
use tracing::{debug, info, warn};

use crate::config::LedgerConfig;
use crate::error::{IntegrityError, LedgerError};
use crate::payload::Payload;
use crate::record::Record;
use crate::validation::VerificationReport;

/// Previous hash carried by every genesis record.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Append-only chain of hash-sealed records.
///
/// Always holds at least the genesis record. Records enter only through
/// [`Ledger::append`]; nothing is ever updated, removed, or reordered. The
/// ledger is owned by a single caller; see [`SharedLedger`](crate::SharedLedger)
/// for multi-caller access.
#[derive(Clone, Debug)]
pub struct Ledger<P: Payload = TicketSale> {
    config: LedgerConfig,
    records: Vec<Record<P>>,
}

impl<P: Payload> Ledger<P> {
    /// Create a ledger with the default configuration.
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create a ledger and seal its genesis record.
    pub fn with_config(config: LedgerConfig) -> Self {
        let genesis = Record::seal(
            Timestamp::now(),
            P::genesis(),
            GENESIS_PREVIOUS_HASH,
            config.digest,
        );
        info!(digest = %config.digest, genesis = %genesis.hash(), "ledger created");
        Self {
            config,
            records: vec![genesis],
        }
    }

    /// Validate `payload`, then seal it against the current tip and append.
    ///
    /// A rejected payload leaves the ledger unchanged.
    pub fn append(&mut self, payload: P) -> Result<&Record<P>, LedgerError> {
        if let Err(e) = payload.validate() {
            warn!(error = %e, "append rejected");
            return Err(e.into());
        }

        let previous_hash = self.tip().hash().to_owned();
        let record = Record::seal(Timestamp::now(), payload, previous_hash, self.config.digest);
        debug!(index = self.records.len(), hash = %record.hash(), "record appended");
        self.records.push(record);
        Ok(self.tip())
    }

    /// Check the whole chain, stopping at the first failure.
    ///
    /// Every record after genesis is re-digested from its stored fields and
    /// its previous hash compared with its predecessor's stored hash. The
    /// genesis record has no predecessor and is trusted by construction.
    pub fn verify(&self) -> Result<(), IntegrityError> {
        HashChainVerifier::verify_chain(&self.records).inspect_err(|e| {
            warn!(error = %e, "ledger failed verification");
        })
    }

    /// Single validity signal for the whole chain.
    pub fn is_valid(&self) -> bool {
        self.verify().is_ok()
    }

    /// Check the whole chain and report every offending index.
    pub fn audit(&self) -> VerificationReport {
        let violations = HashChainVerifier::find_violations(&self.records);
        if !violations.is_empty() {
            warn!(count = violations.len(), "ledger audit found violations");
        }
        VerificationReport {
            record_count: self.records.len(),
            violations,
        }
    }

    /// The most recently appended record (genesis on a fresh ledger).
    pub fn tip(&self) -> &Record<P> {
        // non-empty from construction onward
        &self.records[self.records.len() - 1]
    }

    pub fn genesis(&self) -> &Record<P> {
        &self.records[0]
    }

    /// All records in chain order.
    pub fn records(&self) -> &[Record<P>] {
        &self.records
    }

    pub fn iter(&self) -> slice::Iter<'_, Record<P>> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Record<P>> {
        self.records.get(index)
    }

    /// Number of records, genesis included. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn records_mut(&mut self) -> &mut Vec<Record<P>> {
        &mut self.records
    }
}

impl<P: Payload> Default for Ledger<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, P: Payload> IntoIterator for &'a Ledger<P> {
    type Item = &'a Record<P>;
    type IntoIter = slice::Iter<'a, Record<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

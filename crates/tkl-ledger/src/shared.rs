use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tkl_types::TicketSale;

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::payload::Payload;
use crate::record::Record;
use crate::validation::VerificationReport;

/// A [`Ledger`] that can be appended to and verified through `&self`.
///
/// Appends take the write lock for the whole read-tip, seal, push sequence,
/// so two callers can never seal against the same tip. Verification takes
/// the read lock and never observes a half-appended record.
pub struct SharedLedger<P: Payload = TicketSale> {
    inner: RwLock<Ledger<P>>,
}

impl<P: Payload> SharedLedger<P> {
    pub fn new(ledger: Ledger<P>) -> Self {
        Self {
            inner: RwLock::new(ledger),
        }
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self::new(Ledger::with_config(config))
    }

    /// Append under the write lock and return a copy of the new record.
    pub fn append(&self, payload: P) -> Result<Record<P>, LedgerError> {
        let mut ledger = self.write()?;
        let record = ledger.append(payload)?.clone();
        Ok(record)
    }

    pub fn verify(&self) -> Result<(), LedgerError> {
        Ok(self.read()?.verify()?)
    }

    /// `Ok(false)` for a tampered chain; a poisoned lock is an error, not
    /// an integrity verdict.
    pub fn is_valid(&self) -> Result<bool, LedgerError> {
        Ok(self.read()?.is_valid())
    }

    pub fn audit(&self) -> Result<VerificationReport, LedgerError> {
        Ok(self.read()?.audit())
    }

    /// Copy of the current tip.
    pub fn tip(&self) -> Result<Record<P>, LedgerError> {
        Ok(self.read()?.tip().clone())
    }

    /// Copy of every record in chain order.
    pub fn snapshot(&self) -> Result<Vec<Record<P>>, LedgerError> {
        Ok(self.read()?.records().to_vec())
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> Result<usize, LedgerError> {
        Ok(self.read()?.len())
    }

    /// Unwrap the owned ledger.
    pub fn into_inner(self) -> Result<Ledger<P>, LedgerError> {
        self.inner.into_inner().map_err(|_| LedgerError::LockPoisoned)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Ledger<P>>, LedgerError> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Ledger<P>>, LedgerError> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }
}

impl<P: Payload> Default for SharedLedger<P> {
    fn default() -> Self {
        Self::new(Ledger::new())
    }
}

impl<P: Payload> From<Ledger<P>> for SharedLedger<P> {
    fn from(ledger: Ledger<P>) -> Self {
        Self::new(ledger)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::error::{IntegrityError, ValidationError};
    use tkl_types::Price;

    fn sale(buyer: &str, seat: &str) -> TicketSale {
        TicketSale::new("Concert A", buyer, seat, Price::from_cents(2500))
    }

    #[test]
    fn append_returns_linked_copy() {
        let shared: SharedLedger = SharedLedger::default();
        let genesis = shared.tip().unwrap();
        let record = shared.append(sale("Alice", "A1")).unwrap();
        assert_eq!(record.previous_hash(), genesis.hash());
        assert_eq!(shared.len().unwrap(), 2);
        assert_eq!(shared.tip().unwrap(), record);
    }

    #[test]
    fn validation_errors_pass_through() {
        let shared: SharedLedger = SharedLedger::default();
        let err = shared.append(sale("Alice", "")).unwrap_err();
        assert_eq!(
            err,
            LedgerError::Validation(ValidationError::EmptyField { field: "seat" })
        );
        assert_eq!(shared.len().unwrap(), 1);
    }

    #[test]
    fn concurrent_appends_form_a_single_chain() {
        let shared: Arc<SharedLedger> = Arc::new(SharedLedger::default());
        let threads = 8;
        let per_thread = 25;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for i in 0..per_thread {
                        shared
                            .append(sale(&format!("buyer-{t}"), &format!("{t}-{i}")))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let records = shared.snapshot().unwrap();
        assert_eq!(records.len(), threads * per_thread + 1);
        assert!(shared.is_valid().unwrap());

        // No two records were sealed against the same predecessor.
        let predecessors: HashSet<&str> = records.iter().map(|r| r.previous_hash()).collect();
        assert_eq!(predecessors.len(), records.len());
    }

    #[test]
    fn into_inner_returns_owned_ledger() {
        let shared: SharedLedger = SharedLedger::default();
        shared.append(sale("Alice", "A1")).unwrap();
        let mut ledger = shared.into_inner().unwrap();
        ledger.records_mut()[1].payload_mut().buyer = "Mallory".into();

        let shared = SharedLedger::from(ledger);
        assert_eq!(
            shared.verify(),
            Err(LedgerError::Integrity(IntegrityError::HashMismatch { index: 1 }))
        );
        assert!(!shared.audit().unwrap().is_valid());
        assert_eq!(shared.is_valid(), Ok(false));
    }

    #[test]
    fn poisoned_lock_is_not_an_integrity_verdict() {
        let shared: Arc<SharedLedger> = Arc::new(SharedLedger::default());
        let writer = Arc::clone(&shared);
        let joined = thread::spawn(move || {
            let _guard = writer.inner.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(joined.is_err());

        assert_eq!(shared.verify(), Err(LedgerError::LockPoisoned));
        assert_eq!(shared.is_valid(), Err(LedgerError::LockPoisoned));
        assert_eq!(shared.len(), Err(LedgerError::LockPoisoned));
        assert_eq!(
            shared.append(sale("Alice", "A1")).unwrap_err(),
            LedgerError::LockPoisoned
        );
        assert!(shared.audit().is_err());
    }
}

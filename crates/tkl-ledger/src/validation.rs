use serde::Serialize;

use crate::error::IntegrityError;

/// Result of a full-chain audit.
///
/// Validity is all-or-nothing: a single violation anywhere invalidates the
/// whole chain. The violation list only says where to look.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub record_count: usize,
    pub violations: Vec<IntegrityError>,
}

impl VerificationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// The earliest violation, if any.
    pub fn first_violation(&self) -> Option<&IntegrityError> {
        self.violations.first()
    }

    /// Indices whose content no longer matches their stored hash.
    pub fn altered_indices(&self) -> Vec<usize> {
        self.violations
            .iter()
            .filter_map(|v| match v {
                IntegrityError::HashMismatch { index } => Some(*index),
                IntegrityError::BrokenLink { .. } => None,
            })
            .collect()
    }

    /// Indices whose previous hash does not name their predecessor.
    pub fn broken_link_indices(&self) -> Vec<usize> {
        self.violations
            .iter()
            .filter_map(|v| match v {
                IntegrityError::BrokenLink { index } => Some(*index),
                IntegrityError::HashMismatch { .. } => None,
            })
            .collect()
    }

    /// Collapse to the single validity signal, keeping the first failure.
    pub fn into_result(self) -> Result<(), IntegrityError> {
        match self.violations.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(()),
        }
    }
}

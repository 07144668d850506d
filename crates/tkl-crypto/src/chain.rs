use serde::Serialize;

/// Trait for objects that participate in a hash chain.
pub trait ChainLink {
    /// The hash stored on the object when it was sealed.
    fn stored_hash(&self) -> &str;
    /// The stored hash of the predecessor this object claims to follow.
    fn previous_hash(&self) -> &str;
    /// Digest recomputed from the object's current fields. Must never read
    /// [`ChainLink::stored_hash`].
    fn recompute_hash(&self) -> String;
}

/// Hash chain integrity verifier.
///
/// The first element is the chain's anchor and is trusted as-is: it has no
/// predecessor to link to and is not re-digested. Every later element must
/// (1) digest to its stored hash and (2) name its predecessor's stored hash
/// as its previous hash.
pub struct HashChainVerifier;

impl HashChainVerifier {
    /// Verify a chain, stopping at the first failure.
    pub fn verify_chain(links: &[impl ChainLink]) -> Result<(), ChainError> {
        for index in 1..links.len() {
            Self::check_link(links, index)?;
        }
        Ok(())
    }

    /// Verify a chain, collecting every failure in index order.
    ///
    /// A single element may contribute both a [`ChainError::HashMismatch`]
    /// and a [`ChainError::BrokenLink`].
    pub fn find_violations(links: &[impl ChainLink]) -> Vec<ChainError> {
        let mut violations = Vec::new();
        for index in 1..links.len() {
            if links[index].recompute_hash() != links[index].stored_hash() {
                violations.push(ChainError::HashMismatch { index });
            }
            if links[index].previous_hash() != links[index - 1].stored_hash() {
                violations.push(ChainError::BrokenLink { index });
            }
        }
        violations
    }

    fn check_link(links: &[impl ChainLink], index: usize) -> Result<(), ChainError> {
        let current = &links[index];
        if current.recompute_hash() != current.stored_hash() {
            return Err(ChainError::HashMismatch { index });
        }
        if current.previous_hash() != links[index - 1].stored_hash() {
            return Err(ChainError::BrokenLink { index });
        }
        Ok(())
    }
}

/// Errors from chain verification.
#[derive(Clone, Copy, Debug, thiserror::Error, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainError {
    #[error("hash mismatch at index {index}: content was altered after sealing")]
    HashMismatch { index: usize },

    #[error("broken link at index {index}: previous hash does not match predecessor")]
    BrokenLink { index: usize },
}

impl ChainError {
    /// Index of the offending element.
    pub fn index(&self) -> usize {
        match self {
            Self::HashMismatch { index } | Self::BrokenLink { index } => *index,
        }
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Digest function used to seal records.
///
/// Both algorithms produce 32-byte digests, rendered as 64 lowercase hex
/// characters. A ledger uses exactly one algorithm for its whole lifetime;
/// hashes from ledgers with different algorithms are not comparable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256 => write!(f, "sha256"),
            Self::Blake3 => write!(f, "blake3"),
        }
    }
}

/// Record content hasher.
///
/// Feeds the canonical string parts of a record into the digest with no
/// separators, in the order given, and returns the lowercase hex digest.
/// Callers are responsible for supplying parts in their fixed declared order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecordHasher {
    algorithm: DigestAlgorithm,
}

impl RecordHasher {
    /// SHA-256 record hasher.
    pub const SHA256: Self = Self::new(DigestAlgorithm::Sha256);
    /// BLAKE3 record hasher.
    pub const BLAKE3: Self = Self::new(DigestAlgorithm::Blake3);

    pub const fn new(algorithm: DigestAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Digest the concatenation of `parts` and return it as hex.
    pub fn digest_parts<S: AsRef<str>>(&self, parts: &[S]) -> String {
        match self.algorithm {
            DigestAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                for part in parts {
                    hasher.update(part.as_ref().as_bytes());
                }
                hex::encode(hasher.finalize())
            }
            DigestAlgorithm::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                for part in parts {
                    hasher.update(part.as_ref().as_bytes());
                }
                hex::encode(hasher.finalize().as_bytes())
            }
        }
    }

    /// Verify that `parts` digest to the expected hex string.
    pub fn verify<S: AsRef<str>>(&self, parts: &[S], expected: &str) -> bool {
        self.digest_parts(parts) == expected
    }

    /// The algorithm used by this hasher.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sha256_matches_known_vector() {
        let hash = RecordHasher::SHA256.digest_parts(&["abc"]);
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn blake3_matches_known_vector() {
        let hash = RecordHasher::BLAKE3.digest_parts::<&str>(&[]);
        assert_eq!(
            hash,
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    #[test]
    fn parts_are_concatenated_without_separator() {
        let split = RecordHasher::SHA256.digest_parts(&["ab", "c"]);
        let joined = RecordHasher::SHA256.digest_parts(&["abc"]);
        assert_eq!(split, joined);
    }

    #[test]
    fn algorithms_produce_different_hashes() {
        let data = ["same content"];
        assert_ne!(
            RecordHasher::SHA256.digest_parts(&data),
            RecordHasher::BLAKE3.digest_parts(&data)
        );
    }

    #[test]
    fn verify_correct_and_tampered_data() {
        let hash = RecordHasher::SHA256.digest_parts(&["original"]);
        assert!(RecordHasher::SHA256.verify(&["original"], &hash));
        assert!(!RecordHasher::SHA256.verify(&["tampered"], &hash));
    }

    #[test]
    fn algorithm_serde_is_lowercase() {
        let json = serde_json::to_string(&DigestAlgorithm::Blake3).unwrap();
        assert_eq!(json, "\"blake3\"");
        let parsed: DigestAlgorithm = serde_json::from_str("\"sha256\"").unwrap();
        assert_eq!(parsed, DigestAlgorithm::Sha256);
        assert_eq!(DigestAlgorithm::default(), DigestAlgorithm::Sha256);
    }

    proptest! {
        #[test]
        fn digest_is_deterministic_hex(parts in proptest::collection::vec(".*", 0..6)) {
            for hasher in [RecordHasher::SHA256, RecordHasher::BLAKE3] {
                let a = hasher.digest_parts(&parts);
                let b = hasher.digest_parts(&parts);
                prop_assert_eq!(&a, &b);
                prop_assert_eq!(a.len(), 64);
                prop_assert!(a.bytes().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
            }
        }
    }
}

use std::path::Path;

use serde::{Deserialize, Serialize};
use tkl_crypto::DigestAlgorithm;

use crate::error::LedgerError;

/// Configuration for a ledger instance.
///
/// ```toml
/// digest = "blake3"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Digest used to seal every record, genesis included.
    pub digest: DigestAlgorithm,
}

impl LedgerConfig {
    pub fn with_digest(digest: DigestAlgorithm) -> Self {
        Self { digest }
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, LedgerError> {
        toml::from_str(source).map_err(|e| LedgerError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }
}

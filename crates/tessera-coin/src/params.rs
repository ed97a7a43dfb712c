//! Protocol parameters.

use serde::{Deserialize, Serialize};

use crate::{CoinError, Result};

/// Default number of identity share pairs per coin.
pub const DEFAULT_K: usize = 16;

/// Default leading field of the coin wire format.
pub const DEFAULT_BANK_MARKER: &str = "TESSERA";

/// Default prefix embedded in front of the owner identity.
pub const DEFAULT_IDENTITY_MARKER: &str = "IDENTITY:";

/// Field separator of the coin wire format.
pub const FIELD_SEPARATOR: char = '-';

/// Commitment list separator of the coin wire format.
pub const LIST_SEPARATOR: char = ',';

/// Constants shared by bank, owners and merchants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolParams {
    /// Number of independent share pairs (RIS length).
    #[serde(default = "default_k")]
    pub k: usize,
    /// Leading field validating the coin wire format.
    #[serde(default = "default_bank_marker")]
    pub bank_marker: String,
    /// Prefix on the recovered identity plaintext.
    #[serde(default = "default_identity_marker")]
    pub identity_marker: String,
}

fn default_k() -> usize {
    DEFAULT_K
}

fn default_bank_marker() -> String {
    DEFAULT_BANK_MARKER.to_string()
}

fn default_identity_marker() -> String {
    DEFAULT_IDENTITY_MARKER.to_string()
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            k: default_k(),
            bank_marker: default_bank_marker(),
            identity_marker: default_identity_marker(),
        }
    }
}

impl ProtocolParams {
    /// Parameters with a custom `k` and default markers.
    pub fn with_k(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    /// Reject parameters the wire format or the adjudicator cannot work with.
    ///
    /// # Errors
    ///
    /// - [`CoinError::InvalidParams`] on `k == 0`, an empty marker, or a bank
    ///   marker containing a wire separator
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(CoinError::InvalidParams("k must be at least 1".to_string()));
        }
        if self.bank_marker.is_empty() {
            return Err(CoinError::InvalidParams(
                "bank marker must not be empty".to_string(),
            ));
        }
        if self.bank_marker.contains([FIELD_SEPARATOR, LIST_SEPARATOR]) {
            return Err(CoinError::InvalidParams(format!(
                "bank marker {:?} contains a wire separator",
                self.bank_marker
            )));
        }
        if self.identity_marker.is_empty() {
            return Err(CoinError::InvalidParams(
                "identity marker must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

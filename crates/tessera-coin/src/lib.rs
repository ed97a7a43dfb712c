//! # tessera-coin
//!
//! The double-spend-tracing coin.
//!
//! A coin carries `k` pairs of committed identity shares. Each pair is a
//! one-time pad over `identity_marker || owner`, so revealing one side of
//! every pair discloses nothing, while two reveals that disagree on any
//! index expose the owner.
//!
//! ## Modules
//!
//! - [`params`] — Protocol constants (`k`, markers)
//! - [`share`] — Sides, preimages and identity share construction
//! - [`record`] — The public coin record and its wire format
//! - [`coin`] — Owner-held coin: mint, reveal, blind signing
//! - [`ris`] — Revealed identity share sequences
//! - [`authority`] — The bank's blind signing authority

pub mod authority;
pub mod coin;
pub mod params;
pub mod record;
pub mod ris;
pub mod share;

pub use authority::SigningAuthority;
pub use coin::{Coin, CoinParts, PendingSignature};
pub use params::ProtocolParams;
pub use record::{Commitment, CoinRecord};
pub use ris::Ris;
pub use share::{Preimage, Side};

use tessera_crypto::CryptoError;

/// Error types for coin operations.
#[derive(Debug, thiserror::Error)]
pub enum CoinError {
    /// Protocol parameters are unusable.
    #[error("invalid protocol parameters: {0}")]
    InvalidParams(String),

    /// A coin must carry a positive amount.
    #[error("invalid amount: {0}")]
    InvalidAmount(u64),

    /// The owner identity is empty.
    #[error("owner identity must not be empty")]
    EmptyIdentity,

    /// The wire encoding of a coin is malformed.
    #[error("malformed coin: {reason}")]
    Format {
        /// What was wrong with the encoding.
        reason: String,
    },

    /// The coin cannot supply the requested preimage.
    #[error("coin {guid} has no {side} preimage at index {index}")]
    MissingPreimage {
        /// The coin identifier.
        guid: String,
        /// The requested side.
        side: Side,
        /// The requested index.
        index: usize,
    },

    /// The unblinded bank signature does not verify.
    #[error("bank signature does not verify for coin {guid}")]
    Signature {
        /// The coin identifier.
        guid: String,
    },

    /// The underlying cryptographic primitive failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl CoinError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        Self::Format {
            reason: reason.into(),
        }
    }
}

/// Convenience result type for coin operations.
pub type Result<T> = std::result::Result<T, CoinError>;

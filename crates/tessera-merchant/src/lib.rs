//! # tessera-merchant
//!
//! Merchant-side coin acceptance.
//!
//! A merchant verifies the bank signature, checks the coin's wire form, then
//! challenges the owner to open one side of every share pair. The opened
//! preimages form the RIS deposited with the bank.
//!
//! ## Modules
//!
//! - [`challenge`] — Side challenge sources
//! - [`accept`] — The acceptance protocol

pub mod accept;
pub mod challenge;

pub use accept::Merchant;
pub use challenge::{FixedChallenge, RngChallenge, SideChallenge};

use tessera_coin::{CoinError, Side};

/// Error types for coin acceptance.
#[derive(Debug, thiserror::Error)]
pub enum AcceptError {
    /// The coin carries no bank signature yet.
    #[error("coin {guid} is unsigned")]
    Unsigned {
        /// The coin identifier.
        guid: String,
    },

    /// The bank signature does not verify under the coin's parameters.
    #[error("invalid bank signature on coin {guid}")]
    InvalidSignature {
        /// The coin identifier.
        guid: String,
    },

    /// The coin's wire form does not parse under the merchant's parameters.
    #[error("malformed coin {guid}: {source}")]
    MalformedCoin {
        /// The coin identifier.
        guid: String,
        /// The parse failure.
        #[source]
        source: CoinError,
    },

    /// A revealed preimage does not open its commitment.
    #[error("coin {guid}: {side} preimage at index {index} does not match its commitment")]
    HashMismatch {
        /// The coin identifier.
        guid: String,
        /// The challenged side.
        side: Side,
        /// The offending index.
        index: usize,
    },

    /// The coin could not supply a challenged preimage.
    #[error("coin {guid}: no {side} preimage at index {index}")]
    MissingPreimage {
        /// The coin identifier.
        guid: String,
        /// The challenged side.
        side: Side,
        /// The missing index.
        index: usize,
    },
}

/// Convenience result type for acceptance.
pub type Result<T> = std::result::Result<T, AcceptError>;

//! # tessera-judge
//!
//! Double-spend adjudication.
//!
//! When the bank sees two deposits of the same coin it compares the two
//! revealed share sequences. Identical sequences mean a merchant redeposited
//! what it already had; sequences that disagree at some index XOR to the
//! owner's marked identity.
//!
//! ## Modules
//!
//! - [`report`] — Verdicts and cheater reports
//! - [`adjudicator`] — The comparison itself, plain and hardened
//! - [`desk`] — Per-coin deposit intake that triggers adjudication

pub mod adjudicator;
pub mod desk;
pub mod report;

pub use adjudicator::Adjudicator;
pub use desk::{DepositDesk, DepositOutcome};
pub use report::{CheaterReport, Verdict};

/// Error types for adjudication.
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    /// A share sequence or commitment list has the wrong length.
    #[error("coin {guid}: expected {expected} shares, got {actual}")]
    Length {
        /// The coin identifier.
        guid: String,
        /// The protocol's `k`.
        expected: usize,
        /// The length found.
        actual: usize,
    },

    /// A revealed share opens neither commitment at its index.
    #[error("coin {guid}: share at index {index} matches no commitment")]
    HashMismatch {
        /// The coin identifier.
        guid: String,
        /// The offending index.
        index: usize,
    },

    /// A single reveal mixes left and right shares.
    #[error("coin {guid}: reveal mixes left and right shares")]
    MixedSides {
        /// The coin identifier.
        guid: String,
    },

    /// No identity could be recovered after scanning every index.
    #[error("coin {guid}: adjudication indeterminate")]
    Indeterminate {
        /// The coin identifier.
        guid: String,
    },

    /// The bank signature on a deposited coin record does not verify.
    #[error("coin {guid}: bank signature does not verify")]
    InvalidSignature {
        /// The coin identifier.
        guid: String,
    },

    /// The deposit book lock was poisoned by a panicking holder.
    #[error("deposit book lock poisoned")]
    LockPoisoned,

    /// A deposit's coin record differs from the one first seen for its guid.
    #[error("coin {guid}: deposited record differs from the first deposit")]
    RecordMismatch {
        /// The coin identifier.
        guid: String,
    },
}

/// Convenience result type for adjudication.
pub type Result<T> = std::result::Result<T, JudgeError>;

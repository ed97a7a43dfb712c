//! # tessera-crypto
//!
//! Cryptographic capabilities consumed by the tessera coin protocol.
//!
//! The protocol treats all three as opaque collaborators: the coin model only
//! relies on their contracts, never on how they are built.
//!
//! ## Modules
//!
//! - [`blake3`] — Domain-separated BLAKE3 hashing and share commitments
//! - [`otp`] — One-time-pad XOR over equal-length operands
//! - [`blind`] — Blind signature scheme trait and its RSA implementation

pub mod blake3;
pub mod blind;
pub mod otp;

/// Error types for cryptographic operations.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// Key generation failed.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// The signer rejected or could not process the blinded message.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Blinding or unblinding failed on the holder side.
    #[error("blinding failed: {0}")]
    Blinding(String),

    /// XOR operands of different lengths.
    #[error("length mismatch: key is {key} bytes, ciphertext is {ciphertext} bytes")]
    LengthMismatch { key: usize, ciphertext: usize },

    /// Invalid input data.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

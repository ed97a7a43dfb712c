//! Identity shares.
//!
//! For every index the owner holds a left and a right preimage with
//! `left XOR right = identity_marker || owner`. The left half is fresh random
//! padding per index, so each half alone is indistinguishable from noise.

use std::fmt;

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tessera_crypto::{blake3, otp};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::record::Commitment;
use crate::Result;

/// Which half of a share pair is revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The other half of the pair.
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// A secret share preimage. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, Serialize, Deserialize)]
pub struct Preimage(#[serde(with = "hex::serde")] Vec<u8>);

impl Preimage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The commitment binding this preimage.
    pub fn commitment(&self) -> Commitment {
        Commitment(blake3::commit(&self.0))
    }

    /// Whether this preimage opens `commitment`.
    pub fn opens(&self, commitment: &Commitment) -> bool {
        blake3::verify_commitment(&self.0, &commitment.0)
    }
}

impl fmt::Debug for Preimage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Preimage({} bytes)", self.0.len())
    }
}

impl fmt::Display for Preimage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

/// The plaintext every share pair of an owner's coin encodes.
pub fn identity_plaintext(identity_marker: &str, owner: &str) -> Vec<u8> {
    let mut plain = Vec::with_capacity(identity_marker.len() + owner.len());
    plain.extend_from_slice(identity_marker.as_bytes());
    plain.extend_from_slice(owner.as_bytes());
    plain
}

/// Split `plaintext` into a fresh one-time-pad pair `(left, right)`.
pub fn split<R: RngCore + CryptoRng>(
    plaintext: &[u8],
    rng: &mut R,
) -> Result<(Preimage, Preimage)> {
    let mut pad = vec![0u8; plaintext.len()];
    rng.fill_bytes(&mut pad);
    let masked = otp::xor(&pad, plaintext)?;
    Ok((Preimage(pad), Preimage(masked)))
}

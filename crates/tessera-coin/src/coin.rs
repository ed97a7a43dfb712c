//! The owner-held coin.
//!
//! ## Life Cycle
//!
//! 1. Owner: `Coin::mint(params, owner, amount, bank_public_params)`
//! 2. Owner: `request_signature()` -> `(BlindedMessage, PendingSignature)`
//! 3. Bank: `SigningAuthority::sign(blinded)` -> `BlindSignature`
//! 4. Owner: `complete_signature(blind_sig, pending)` stores the unblinded signature
//!
//! Commitments and preimages are fixed at mint and never regenerated.

use std::fmt;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tessera_crypto::blake3;
use tessera_crypto::blind::{
    BlindSignature, BlindSignatureScheme, BlindedMessage, RsaBlind, Signature,
};

use crate::share::{self, Preimage, Side};
use crate::{CoinError, CoinRecord, ProtocolParams, Result};

/// A minted coin together with the owner's secrets.
pub struct Coin<S: BlindSignatureScheme = RsaBlind> {
    owner: String,
    record: CoinRecord,
    public_params: S::PublicParams,
    left: Vec<Preimage>,
    right: Vec<Preimage>,
    signature: Option<Signature>,
}

/// The raw fields of a [`Coin`], for wallet persistence.
///
/// [`Coin::from_parts`] trusts these as stored; the merchant re-checks every
/// revealed preimage against the record at spend time.
pub struct CoinParts<S: BlindSignatureScheme = RsaBlind> {
    pub owner: String,
    pub record: CoinRecord,
    pub public_params: S::PublicParams,
    pub left: Vec<Preimage>,
    pub right: Vec<Preimage>,
    pub signature: Option<Signature>,
}

/// Unblinding material for one outstanding signing request.
///
/// Consumed by [`Coin::complete_signature`]; the blinding secret does not
/// outlive the request.
pub struct PendingSignature<S: BlindSignatureScheme = RsaBlind> {
    guid: String,
    message: Vec<u8>,
    secret: S::BlindingSecret,
}

impl<S: BlindSignatureScheme> Coin<S> {
    /// Mint a coin for `owner` using the operating system RNG.
    ///
    /// # Errors
    ///
    /// - [`CoinError::InvalidParams`] if `params` do not validate
    /// - [`CoinError::InvalidAmount`] if `amount` is zero
    /// - [`CoinError::EmptyIdentity`] if `owner` is empty
    pub fn mint(
        params: &ProtocolParams,
        owner: &str,
        amount: u64,
        public_params: S::PublicParams,
    ) -> Result<Self> {
        Self::mint_with_rng(params, owner, amount, public_params, &mut OsRng)
    }

    /// Mint a coin drawing guid seed and share padding from `rng`.
    pub fn mint_with_rng<R: RngCore + CryptoRng>(
        params: &ProtocolParams,
        owner: &str,
        amount: u64,
        public_params: S::PublicParams,
        rng: &mut R,
    ) -> Result<Self> {
        params.validate()?;
        if amount == 0 {
            return Err(CoinError::InvalidAmount(0));
        }
        if owner.is_empty() {
            return Err(CoinError::EmptyIdentity);
        }

        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        let guid = hex::encode(blake3::derive_guid(&seed));

        let plaintext = share::identity_plaintext(&params.identity_marker, owner);
        let mut left = Vec::with_capacity(params.k);
        let mut right = Vec::with_capacity(params.k);
        for _ in 0..params.k {
            let (l, r) = share::split(&plaintext, rng)?;
            left.push(l);
            right.push(r);
        }

        let record = CoinRecord {
            bank_marker: params.bank_marker.clone(),
            amount,
            guid,
            left: left.iter().map(Preimage::commitment).collect(),
            right: right.iter().map(Preimage::commitment).collect(),
        };

        tracing::debug!(guid = %record.guid, amount, k = params.k, "coin minted");

        Ok(Self {
            owner: owner.to_string(),
            record,
            public_params,
            left,
            right,
            signature: None,
        })
    }

    /// Rebuild a coin from stored fields.
    pub fn from_parts(parts: CoinParts<S>) -> Self {
        Self {
            owner: parts.owner,
            record: parts.record,
            public_params: parts.public_params,
            left: parts.left,
            right: parts.right,
            signature: parts.signature,
        }
    }

    /// Break the coin into its stored fields.
    pub fn into_parts(self) -> CoinParts<S> {
        CoinParts {
            owner: self.owner,
            record: self.record,
            public_params: self.public_params,
            left: self.left,
            right: self.right,
            signature: self.signature,
        }
    }

    pub fn guid(&self) -> &str {
        &self.record.guid
    }

    pub fn amount(&self) -> u64 {
        self.record.amount
    }

    /// Number of share pairs held.
    pub fn k(&self) -> usize {
        self.record.k()
    }

    /// The owner identity. Never part of any wire encoding.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The public half of the coin.
    pub fn record(&self) -> &CoinRecord {
        &self.record
    }

    /// The bank parameters the coin was minted against.
    pub fn public_params(&self) -> &S::PublicParams {
        &self.public_params
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Wire encoding of the public record.
    pub fn serialize(&self) -> String {
        self.record.serialize()
    }

    /// The stored preimage for `side` at `index`.
    ///
    /// # Errors
    ///
    /// - [`CoinError::MissingPreimage`] if the coin holds no such preimage
    pub fn reveal_side(&self, side: Side, index: usize) -> Result<&Preimage> {
        let list = match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        };
        list.get(index).ok_or_else(|| CoinError::MissingPreimage {
            guid: self.record.guid.clone(),
            side,
            index,
        })
    }

    /// Blind the signing message for submission to the bank.
    pub fn request_signature(&self) -> Result<(BlindedMessage, PendingSignature<S>)> {
        let message = self.record.signing_message();
        let (blinded, secret) = S::blind(&self.public_params, &message)?;
        Ok((
            blinded,
            PendingSignature {
                guid: self.record.guid.clone(),
                message,
                secret,
            },
        ))
    }

    /// Unblind the bank's response and attach the signature.
    ///
    /// # Errors
    ///
    /// - [`CoinError::Signature`] if the request belongs to another coin or the
    ///   finished signature does not verify
    /// - [`CoinError::Crypto`] if unblinding fails
    pub fn complete_signature(
        &mut self,
        blind_signature: &BlindSignature,
        pending: PendingSignature<S>,
    ) -> Result<()> {
        let message = self.record.signing_message();
        if pending.guid != self.record.guid || pending.message != message {
            return Err(CoinError::Signature {
                guid: self.record.guid.clone(),
            });
        }
        let signature = S::unblind(&self.public_params, blind_signature, pending.secret, &message)?;
        if !S::verify(&signature, &message, &self.public_params) {
            tracing::warn!(guid = %self.record.guid, "unblinded signature rejected");
            return Err(CoinError::Signature {
                guid: self.record.guid.clone(),
            });
        }
        self.signature = Some(signature);
        Ok(())
    }
}

impl<S: BlindSignatureScheme> fmt::Debug for Coin<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coin")
            .field("guid", &self.record.guid)
            .field("amount", &self.record.amount)
            .field("k", &self.k())
            .field("signed", &self.is_signed())
            .finish_non_exhaustive()
    }
}

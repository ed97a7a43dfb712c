//! Blind signatures.
//!
//! The coin protocol only needs a scheme that can sign a message it cannot
//! read and later verify the unblinded result. [`BlindSignatureScheme`] is that
//! boundary; [`RsaBlind`] is the production implementation (RSA-PSS blind
//! signatures, RFC 9474).
//!
//! ## Protocol Flow
//!
//! 1. Holder: `blind(public_params, message)` -> `(BlindedMessage, BlindingSecret)`
//! 2. Signer: `sign(blinded, private_key)` -> `BlindSignature`
//! 3. Holder: `unblind(public_params, blind_sig, secret, message)` -> `Signature`
//! 4. Anyone: `verify(signature, message, public_params)` -> `bool`

use std::fmt;

use blind_rsa_signatures::reexports::rsa::PublicKeyParts;
use blind_rsa_signatures::{KeyPair, Options, PublicKey, SecretKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::{CryptoError, Result};

/// A blinded message produced by the holder and sent to the signer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindedMessage(#[serde(with = "hex::serde")] pub Vec<u8>);

/// The signer's response over a blinded message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindSignature(#[serde(with = "hex::serde")] pub Vec<u8>);

/// An unblinded signature over the holder's original message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "hex::serde")] pub Vec<u8>);

/// A swappable blind signature primitive.
///
/// Implementations are stateless markers; key material travels in the
/// associated types so callers decide where it lives.
pub trait BlindSignatureScheme {
    /// Public verification parameters published by the signer.
    type PublicParams: Clone + fmt::Debug + PartialEq;
    /// Signer-only key material.
    type PrivateKey;
    /// Holder-side blinding material, needed once to unblind.
    type BlindingSecret;

    /// Generate a fresh key pair with the given modulus size.
    fn generate_keys(bits: usize) -> Result<(Self::PublicParams, Self::PrivateKey)>;

    /// Blind `message` for signing under `public_params`.
    fn blind(
        public_params: &Self::PublicParams,
        message: &[u8],
    ) -> Result<(BlindedMessage, Self::BlindingSecret)>;

    /// Sign a blinded message.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::Signing`] if the blinded message is malformed
    fn sign(blinded: &BlindedMessage, private_key: &Self::PrivateKey) -> Result<BlindSignature>;

    /// Remove the blinding from a signer response.
    fn unblind(
        public_params: &Self::PublicParams,
        blind_signature: &BlindSignature,
        secret: Self::BlindingSecret,
        message: &[u8],
    ) -> Result<Signature>;

    /// Check an unblinded signature. Never fails; callers decide what `false` means.
    fn verify(signature: &Signature, message: &[u8], public_params: &Self::PublicParams) -> bool;
}

/// RSA blind signatures (RSA-PSS, SHA-384, non-randomized message variant).
pub struct RsaBlind;

/// Bank public key (n, e), carried as SPKI DER.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaPublicParams {
    #[serde(with = "hex::serde")]
    der: Vec<u8>,
}

/// Bank private key.
pub struct RsaPrivateKey {
    key: SecretKey,
}

/// Holder-side unblinding material for one signing request.
pub struct RsaBlindingSecret {
    secret: blind_rsa_signatures::Secret,
    randomizer: Option<blind_rsa_signatures::MessageRandomizer>,
}

impl RsaPublicParams {
    /// Restore public parameters from DER bytes.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let params = Self { der: der.to_vec() };
        params.key()?;
        Ok(params)
    }

    /// Raw DER encoding.
    pub fn to_der(&self) -> &[u8] {
        &self.der
    }

    /// The RSA modulus `n`, big-endian hex.
    pub fn modulus(&self) -> Result<String> {
        Ok(hex::encode(self.key()?.0.n().to_bytes_be()))
    }

    /// The RSA public exponent `e`, big-endian hex.
    pub fn exponent(&self) -> Result<String> {
        Ok(hex::encode(self.key()?.0.e().to_bytes_be()))
    }

    fn key(&self) -> Result<PublicKey> {
        PublicKey::from_der(&self.der)
            .map_err(|e| CryptoError::Serialization(format!("RSA public key: {e}")))
    }
}

impl fmt::Debug for RsaPublicParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPublicParams")
            .field("der_len", &self.der.len())
            .finish()
    }
}

impl BlindSignatureScheme for RsaBlind {
    type PublicParams = RsaPublicParams;
    type PrivateKey = RsaPrivateKey;
    type BlindingSecret = RsaBlindingSecret;

    fn generate_keys(bits: usize) -> Result<(RsaPublicParams, RsaPrivateKey)> {
        let kp = KeyPair::generate(&mut OsRng, bits)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        let der = kp
            .pk
            .to_der()
            .map_err(|e| CryptoError::Serialization(e.to_string()))?;
        Ok((RsaPublicParams { der }, RsaPrivateKey { key: kp.sk }))
    }

    fn blind(
        public_params: &RsaPublicParams,
        message: &[u8],
    ) -> Result<(BlindedMessage, RsaBlindingSecret)> {
        let pk = public_params.key()?;
        let result = pk
            .blind(&mut OsRng, message, false, &Options::default())
            .map_err(|e| CryptoError::Blinding(e.to_string()))?;
        Ok((
            BlindedMessage(result.blind_msg.0),
            RsaBlindingSecret {
                secret: result.secret,
                randomizer: result.msg_randomizer,
            },
        ))
    }

    fn sign(blinded: &BlindedMessage, private_key: &RsaPrivateKey) -> Result<BlindSignature> {
        let sig = private_key
            .key
            .blind_sign(&mut OsRng, &blinded.0, &Options::default())
            .map_err(|e| CryptoError::Signing(e.to_string()))?;
        Ok(BlindSignature(sig.0))
    }

    fn unblind(
        public_params: &RsaPublicParams,
        blind_signature: &BlindSignature,
        secret: RsaBlindingSecret,
        message: &[u8],
    ) -> Result<Signature> {
        let pk = public_params.key()?;
        let blind_sig = blind_rsa_signatures::BlindSignature::new(blind_signature.0.clone());
        let sig = pk
            .finalize(
                &blind_sig,
                &secret.secret,
                secret.randomizer,
                message,
                &Options::default(),
            )
            .map_err(|e| CryptoError::Blinding(e.to_string()))?;
        Ok(Signature(sig.0))
    }

    fn verify(signature: &Signature, message: &[u8], public_params: &RsaPublicParams) -> bool {
        let Ok(pk) = public_params.key() else {
            return false;
        };
        blind_rsa_signatures::Signature::new(signature.0.clone())
            .verify(&pk, None, message, &Options::default())
            .is_ok()
    }
}

/// Insecure keyed-hash stand-in for unit tests.
///
/// Blinding is the identity and the "public" parameters contain the signing
/// key, so it offers none of the guarantees of [`RsaBlind`].
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;

    /// Test-only scheme marker.
    pub struct MockBlind;

    /// Shared key; doubles as public parameters.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct MockKey(pub [u8; 32]);

    impl BlindSignatureScheme for MockBlind {
        type PublicParams = MockKey;
        type PrivateKey = MockKey;
        type BlindingSecret = ();

        fn generate_keys(_bits: usize) -> Result<(MockKey, MockKey)> {
            let mut key = [0u8; 32];
            rand::RngCore::fill_bytes(&mut OsRng, &mut key);
            Ok((MockKey(key), MockKey(key)))
        }

        fn blind(_public_params: &MockKey, message: &[u8]) -> Result<(BlindedMessage, ())> {
            Ok((BlindedMessage(message.to_vec()), ()))
        }

        fn sign(blinded: &BlindedMessage, private_key: &MockKey) -> Result<BlindSignature> {
            if blinded.0.is_empty() {
                return Err(CryptoError::Signing("empty blinded message".to_string()));
            }
            Ok(BlindSignature(
                ::blake3::keyed_hash(&private_key.0, &blinded.0).as_bytes().to_vec(),
            ))
        }

        fn unblind(
            _public_params: &MockKey,
            blind_signature: &BlindSignature,
            _secret: (),
            _message: &[u8],
        ) -> Result<Signature> {
            Ok(Signature(blind_signature.0.clone()))
        }

        fn verify(signature: &Signature, message: &[u8], public_params: &MockKey) -> bool {
            ::blake3::keyed_hash(&public_params.0, message).as_bytes()[..] == signature.0[..]
        }
    }
}

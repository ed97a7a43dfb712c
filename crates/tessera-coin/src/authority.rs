//! The bank's blind signing authority.
//!
//! Holds one key pair as an ordinary value. Whoever needs a bank (a daemon,
//! a test) creates one and decides how long it lives.

use tessera_crypto::blind::{
    BlindSignature, BlindSignatureScheme, BlindedMessage, RsaBlind, Signature,
};

use crate::{Coin, Result};

/// Bank key pair plus the operations the bank performs with it.
pub struct SigningAuthority<S: BlindSignatureScheme = RsaBlind> {
    public_params: S::PublicParams,
    private_key: S::PrivateKey,
}

impl<S: BlindSignatureScheme> SigningAuthority<S> {
    /// Generate a fresh authority with a `bits`-sized key.
    pub fn generate(bits: usize) -> Result<Self> {
        let (public_params, private_key) = S::generate_keys(bits)?;
        tracing::info!(bits, "signing authority keys generated");
        Ok(Self {
            public_params,
            private_key,
        })
    }

    /// Wrap existing key material.
    pub fn from_keys(public_params: S::PublicParams, private_key: S::PrivateKey) -> Self {
        Self {
            public_params,
            private_key,
        }
    }

    /// Parameters published to owners and merchants.
    pub fn public_params(&self) -> &S::PublicParams {
        &self.public_params
    }

    /// Sign a blinded coin message.
    ///
    /// # Errors
    ///
    /// - [`crate::CoinError::Crypto`] wrapping a signing error on malformed input
    pub fn sign(&self, blinded: &BlindedMessage) -> Result<BlindSignature> {
        let signature = S::sign(blinded, &self.private_key)?;
        tracing::debug!(len = blinded.0.len(), "blinded coin signed");
        Ok(signature)
    }

    /// Check an unblinded signature against this authority's parameters.
    pub fn verify(&self, signature: &Signature, message: &[u8]) -> bool {
        S::verify(signature, message, &self.public_params)
    }

    /// Run the full blind signing exchange for a locally held coin.
    pub fn issue(&self, coin: &mut Coin<S>) -> Result<()> {
        let (blinded, pending) = coin.request_signature()?;
        let blind_signature = self.sign(&blinded)?;
        coin.complete_signature(&blind_signature, pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CoinError, ProtocolParams};
    use tessera_crypto::blind::mock::MockBlind;

    #[test]
    fn test_issue_signs_coin() {
        let bank = SigningAuthority::<MockBlind>::generate(0).expect("authority");
        let params = ProtocolParams::with_k(2);
        let mut coin = Coin::<MockBlind>::mint(&params, "bob", 50, bank.public_params().clone())
            .expect("mint");
        bank.issue(&mut coin).expect("issue");
        let sig = coin.signature().expect("signed");
        assert!(bank.verify(sig, &coin.record().signing_message()));
    }

    #[test]
    fn test_sign_malformed_input() {
        let bank = SigningAuthority::<MockBlind>::generate(0).expect("authority");
        let err = bank.sign(&BlindedMessage(Vec::new())).expect_err("empty message");
        assert!(matches!(err, CoinError::Crypto(_)));
    }

    #[test]
    fn test_independent_authorities_do_not_cross_verify() {
        let a = SigningAuthority::<MockBlind>::generate(0).expect("a");
        let b = SigningAuthority::<MockBlind>::generate(0).expect("b");
        let params = ProtocolParams::with_k(1);
        let mut coin =
            Coin::<MockBlind>::mint(&params, "bob", 1, a.public_params().clone()).expect("mint");
        a.issue(&mut coin).expect("issue");
        let sig = coin.signature().expect("signed");
        assert!(!b.verify(sig, &coin.record().signing_message()));
    }
}

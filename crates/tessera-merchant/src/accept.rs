//! The acceptance protocol.
//!
//! ## Steps
//!
//! 1. Verify the bank signature over the coin's signing message
//! 2. Re-parse the coin's wire form under the merchant's parameters
//! 3. Draw one side for the whole transaction
//! 4. Open that side at every index and check each preimage against its commitment
//! 5. Return the opened preimages, in index order, as the RIS
//!
//! Acceptance only reads the coin.

use tessera_coin::{Coin, CoinRecord, ProtocolParams, Ris};
use tessera_crypto::blind::BlindSignatureScheme;

use crate::{AcceptError, Result, SideChallenge};

/// A merchant accepting coins under fixed protocol parameters.
#[derive(Clone, Debug)]
pub struct Merchant {
    params: ProtocolParams,
}

impl Merchant {
    pub fn new(params: ProtocolParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    /// Accept `coin`, extracting one RIS.
    ///
    /// # Errors
    ///
    /// - [`AcceptError::Unsigned`] if the coin has no bank signature
    /// - [`AcceptError::InvalidSignature`] if the signature does not verify
    /// - [`AcceptError::MalformedCoin`] if the wire form does not parse or a
    ///   commitment list does not hold exactly `k` entries
    /// - [`AcceptError::MissingPreimage`] if the coin cannot open a challenged share
    /// - [`AcceptError::HashMismatch`] if an opened share does not match its commitment
    pub fn accept<S, C>(&self, coin: &Coin<S>, challenge: &mut C) -> Result<Ris>
    where
        S: BlindSignatureScheme,
        C: SideChallenge + ?Sized,
    {
        let guid = coin.guid().to_string();

        let Some(signature) = coin.signature() else {
            tracing::warn!(%guid, "rejecting unsigned coin");
            return Err(AcceptError::Unsigned { guid });
        };
        let message = coin.record().signing_message();
        if !S::verify(signature, &message, coin.public_params()) {
            tracing::warn!(%guid, "rejecting coin with invalid bank signature");
            return Err(AcceptError::InvalidSignature { guid });
        }

        let record = CoinRecord::parse(&self.params, &coin.serialize()).map_err(|source| {
            tracing::warn!(%guid, error = %source, "rejecting malformed coin");
            AcceptError::MalformedCoin {
                guid: guid.clone(),
                source,
            }
        })?;

        let side = challenge.challenge();
        let mut shares = Vec::with_capacity(self.params.k);
        for (index, commitment) in record.commitments(side).iter().enumerate() {
            let preimage = coin
                .reveal_side(side, index)
                .map_err(|_| AcceptError::MissingPreimage {
                    guid: guid.clone(),
                    side,
                    index,
                })?;
            if !preimage.opens(commitment) {
                tracing::warn!(%guid, %side, index, "revealed preimage does not open commitment");
                return Err(AcceptError::HashMismatch {
                    guid,
                    side,
                    index,
                });
            }
            shares.push(preimage.clone());
        }

        tracing::debug!(%guid, %side, k = shares.len(), "coin accepted");
        Ok(Ris::new(shares))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedChallenge, RngChallenge};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tessera_coin::{CoinError, Preimage, Side, SigningAuthority};
    use tessera_crypto::blind::mock::MockBlind;

    fn signed_coin(params: &ProtocolParams, owner: &str) -> Coin<MockBlind> {
        let bank = SigningAuthority::<MockBlind>::generate(0).expect("authority");
        let mut coin =
            Coin::<MockBlind>::mint(params, owner, 10, bank.public_params().clone()).expect("mint");
        bank.issue(&mut coin).expect("issue");
        coin
    }

    #[test]
    fn test_accept_left_returns_left_preimages() {
        let params = ProtocolParams::with_k(3);
        let coin = signed_coin(&params, "alice");
        let ris = Merchant::new(params)
            .accept(&coin, &mut FixedChallenge(Side::Left))
            .expect("accept");
        assert_eq!(ris.len(), 3);
        for (i, share) in ris.iter().enumerate() {
            assert_eq!(share, coin.reveal_side(Side::Left, i).expect("left"));
        }
    }

    #[test]
    fn test_accept_right_returns_right_preimages() {
        let params = ProtocolParams::with_k(3);
        let coin = signed_coin(&params, "alice");
        let ris = Merchant::new(params)
            .accept(&coin, &mut FixedChallenge(Side::Right))
            .expect("accept");
        for (i, share) in ris.iter().enumerate() {
            assert_eq!(share, coin.reveal_side(Side::Right, i).expect("right"));
        }
    }

    #[test]
    fn test_accept_twice_is_read_only() {
        let params = ProtocolParams::with_k(4);
        let coin = signed_coin(&params, "alice");
        let merchant = Merchant::new(params);
        let mut challenge = RngChallenge::new(StdRng::seed_from_u64(1));
        let a = merchant.accept(&coin, &mut challenge).expect("first");
        let b = merchant.accept(&coin, &mut challenge).expect("second");
        assert_eq!(a.len(), 4);
        assert_eq!(b.len(), 4);
        let again = merchant
            .accept(&coin, &mut FixedChallenge(Side::Left))
            .expect("third");
        let left: Vec<Preimage> = (0..4)
            .map(|i| coin.reveal_side(Side::Left, i).expect("left").clone())
            .collect();
        assert_eq!(again, Ris::new(left));
    }

    #[test]
    fn test_accept_unsigned() {
        let params = ProtocolParams::with_k(2);
        let bank = SigningAuthority::<MockBlind>::generate(0).expect("authority");
        let coin = Coin::<MockBlind>::mint(&params, "alice", 10, bank.public_params().clone())
            .expect("mint");
        let err = Merchant::new(params)
            .accept(&coin, &mut FixedChallenge(Side::Left))
            .expect_err("unsigned");
        assert!(matches!(err, AcceptError::Unsigned { .. }));
    }

    #[test]
    fn test_accept_tampered_signature() {
        let params = ProtocolParams::with_k(2);
        let mut parts = signed_coin(&params, "alice").into_parts();
        if let Some(sig) = parts.signature.as_mut() {
            sig.0[0] ^= 0xFF;
        }
        let coin = Coin::from_parts(parts);
        let err = Merchant::new(params)
            .accept(&coin, &mut FixedChallenge(Side::Left))
            .expect_err("tampered");
        assert!(matches!(err, AcceptError::InvalidSignature { .. }));
    }

    #[test]
    fn test_accept_tampered_amount_breaks_signature() {
        let params = ProtocolParams::with_k(2);
        let mut parts = signed_coin(&params, "alice").into_parts();
        parts.record.amount += 1;
        let coin = Coin::from_parts(parts);
        let err = Merchant::new(params)
            .accept(&coin, &mut FixedChallenge(Side::Right))
            .expect_err("tampered");
        assert!(matches!(err, AcceptError::InvalidSignature { .. }));
    }

    #[test]
    fn test_accept_wrong_k_is_malformed() {
        let coin = signed_coin(&ProtocolParams::with_k(3), "alice");
        let err = Merchant::new(ProtocolParams::with_k(4))
            .accept(&coin, &mut FixedChallenge(Side::Left))
            .expect_err("wrong k");
        assert!(matches!(
            err,
            AcceptError::MalformedCoin { source: CoinError::Format { .. }, .. }
        ));
    }

    #[test]
    fn test_accept_foreign_bank_marker_is_malformed() {
        let coin = signed_coin(&ProtocolParams::with_k(2), "alice");
        let merchant = Merchant::new(ProtocolParams {
            bank_marker: "OTHERBANK".to_string(),
            ..ProtocolParams::with_k(2)
        });
        let err = merchant
            .accept(&coin, &mut FixedChallenge(Side::Left))
            .expect_err("marker");
        assert!(matches!(err, AcceptError::MalformedCoin { .. }));
    }

    #[test]
    fn test_accept_swapped_preimage_is_hash_mismatch() {
        let params = ProtocolParams::with_k(3);
        let mut parts = signed_coin(&params, "alice").into_parts();
        parts.left[1] = Preimage::new(vec![0u8; parts.left[1].len()]);
        let coin = Coin::from_parts(parts);
        let merchant = Merchant::new(params);

        let err = merchant
            .accept(&coin, &mut FixedChallenge(Side::Left))
            .expect_err("swapped");
        assert!(matches!(
            err,
            AcceptError::HashMismatch { side: Side::Left, index: 1, .. }
        ));

        // The untouched side still opens.
        merchant
            .accept(&coin, &mut FixedChallenge(Side::Right))
            .expect("right side intact");
    }

    #[test]
    fn test_accept_missing_preimage() {
        let params = ProtocolParams::with_k(3);
        let mut parts = signed_coin(&params, "alice").into_parts();
        parts.right.truncate(2);
        let coin = Coin::from_parts(parts);
        let err = Merchant::new(params)
            .accept(&coin, &mut FixedChallenge(Side::Right))
            .expect_err("missing");
        assert!(matches!(
            err,
            AcceptError::MissingPreimage { side: Side::Right, index: 2, .. }
        ));
    }
}

//! Reveal comparison.
//!
//! ## Rules
//!
//! - Element-wise equal reveals: merchant fraud, nothing to recover
//! - Otherwise XOR the shares index by index; the first plaintext starting
//!   with the identity marker names the owner
//! - No marked plaintext at any index: indeterminate
//!
//! [`Adjudicator::determine_cheater_checked`] additionally opens every share
//! against the coin record before trusting it.

use tessera_coin::{CoinRecord, ProtocolParams, Ris, Side};
use tessera_crypto::otp;

use crate::{CheaterReport, JudgeError, Result};

/// Stateless judge for pairs of reveals.
#[derive(Clone, Debug)]
pub struct Adjudicator {
    params: ProtocolParams,
}

impl Adjudicator {
    pub fn new(params: ProtocolParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    /// Compare two reveals of coin `guid`.
    pub fn determine_cheater(&self, guid: &str, a: &Ris, b: &Ris) -> CheaterReport {
        if a == b {
            tracing::warn!(%guid, "identical reveals deposited twice");
            return CheaterReport::merchant_fraud(guid);
        }

        let marker = self.params.identity_marker.as_bytes();
        for (index, (x, y)) in a.iter().zip(b).enumerate() {
            let Ok(plain) = otp::xor(x.as_bytes(), y.as_bytes()) else {
                continue;
            };
            let Some(rest) = plain.strip_prefix(marker) else {
                continue;
            };
            if let Ok(identity) = String::from_utf8(rest.to_vec()) {
                tracing::warn!(%guid, index, "owner double spend: identity recovered");
                return CheaterReport::owner_double_spend(guid, identity);
            }
        }

        tracing::warn!(%guid, k = a.len(), "no index yielded an identity");
        CheaterReport::indeterminate(guid)
    }

    /// Open both reveals against `record`, then compare them.
    ///
    /// # Errors
    ///
    /// - [`JudgeError::Length`] if the record or either reveal does not hold `k` entries
    /// - [`JudgeError::HashMismatch`] if a share opens neither commitment at its index
    /// - [`JudgeError::MixedSides`] if one reveal mixes left and right shares
    pub fn determine_cheater_checked(
        &self,
        record: &CoinRecord,
        a: &Ris,
        b: &Ris,
    ) -> Result<CheaterReport> {
        self.check_reveal(record, a)?;
        self.check_reveal(record, b)?;
        Ok(self.determine_cheater(&record.guid, a, b))
    }

    /// Open every share of `ris` against `record`, returning the side it implies.
    ///
    /// # Errors
    ///
    /// As for [`Adjudicator::determine_cheater_checked`].
    pub fn check_reveal(&self, record: &CoinRecord, ris: &Ris) -> Result<Side> {
        let guid = &record.guid;
        let k = self.params.k;
        for actual in [record.left.len(), record.right.len(), ris.len()] {
            if actual != k {
                return Err(JudgeError::Length {
                    guid: guid.clone(),
                    expected: k,
                    actual,
                });
            }
        }

        let mut implied: Option<Side> = None;
        for (index, share) in ris.iter().enumerate() {
            let side = if share.opens(&record.left[index]) {
                Side::Left
            } else if share.opens(&record.right[index]) {
                Side::Right
            } else {
                tracing::warn!(%guid, index, "deposited share matches no commitment");
                return Err(JudgeError::HashMismatch {
                    guid: guid.clone(),
                    index,
                });
            };
            match implied {
                None => implied = Some(side),
                Some(s) if s != side => {
                    return Err(JudgeError::MixedSides { guid: guid.clone() });
                }
                Some(_) => {}
            }
        }

        implied.ok_or_else(|| JudgeError::Length {
            guid: guid.clone(),
            expected: k,
            actual: 0,
        })
    }
}

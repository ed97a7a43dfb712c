//! Deposit intake.
//!
//! The desk keeps every distinct reveal deposited per coin. A deposit is only
//! taken once the bank signature on its coin record verifies. The first
//! deposit of a guid is recorded; each later one is checked against the
//! record and compared with every earlier reveal of that coin.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tessera_coin::{CoinRecord, ProtocolParams, Ris};
use tessera_crypto::blind::{BlindSignatureScheme, RsaBlind, Signature};

use crate::{Adjudicator, CheaterReport, JudgeError, Result, Verdict};

/// What a deposit led to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DepositOutcome {
    /// First deposit of this coin.
    Recorded,
    /// The coin had been deposited before.
    Adjudicated(CheaterReport),
}

impl DepositOutcome {
    /// The adjudication report, if there was one.
    pub fn report(&self) -> Option<&CheaterReport> {
        match self {
            DepositOutcome::Recorded => None,
            DepositOutcome::Adjudicated(report) => Some(report),
        }
    }
}

fn severity(verdict: Verdict) -> u8 {
    match verdict {
        Verdict::OwnerDoubleSpend => 2,
        Verdict::MerchantFraud => 1,
        Verdict::Indeterminate => 0,
    }
}

struct Deposits {
    record: CoinRecord,
    reveals: Vec<Ris>,
}

/// Per-coin deposit book for one bank key, backed by an [`Adjudicator`].
pub struct DepositDesk<S: BlindSignatureScheme = RsaBlind> {
    adjudicator: Adjudicator,
    public_params: S::PublicParams,
    deposits: Mutex<HashMap<String, Deposits>>,
}

impl<S: BlindSignatureScheme> DepositDesk<S> {
    /// A desk accepting coins signed under `public_params`.
    pub fn new(params: ProtocolParams, public_params: S::PublicParams) -> Self {
        Self {
            adjudicator: Adjudicator::new(params),
            public_params,
            deposits: Mutex::new(HashMap::new()),
        }
    }

    pub fn adjudicator(&self) -> &Adjudicator {
        &self.adjudicator
    }

    /// Deposit one reveal of the coin described by `record`.
    ///
    /// A repeat deposit is compared with every earlier reveal. An owner
    /// double spend found against any of them wins, then merchant fraud,
    /// then indeterminate. A reveal already held is not stored again.
    ///
    /// # Errors
    ///
    /// - [`JudgeError::InvalidSignature`] if `signature` does not verify over `record`
    /// - [`JudgeError::RecordMismatch`] if `record` differs from the first deposit of its guid
    /// - [`JudgeError::Length`], [`JudgeError::HashMismatch`] or
    ///   [`JudgeError::MixedSides`] if `ris` does not open `record`
    /// - [`JudgeError::LockPoisoned`] if the deposit book lock is poisoned
    pub fn deposit(
        &self,
        record: &CoinRecord,
        signature: &Signature,
        ris: Ris,
    ) -> Result<DepositOutcome> {
        if !S::verify(signature, &record.signing_message(), &self.public_params) {
            tracing::warn!(guid = %record.guid, "deposit without a valid bank signature");
            return Err(JudgeError::InvalidSignature {
                guid: record.guid.clone(),
            });
        }
        self.adjudicator.check_reveal(record, &ris)?;

        let mut deposits = self.lock()?;
        let entry = match deposits.entry(record.guid.clone()) {
            Entry::Vacant(slot) => {
                tracing::debug!(guid = %record.guid, "first deposit recorded");
                slot.insert(Deposits {
                    record: record.clone(),
                    reveals: vec![ris],
                });
                return Ok(DepositOutcome::Recorded);
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };

        if entry.record != *record {
            tracing::warn!(guid = %record.guid, "deposit carries a different coin record");
            return Err(JudgeError::RecordMismatch {
                guid: record.guid.clone(),
            });
        }

        let mut verdict: Option<CheaterReport> = None;
        for earlier in &entry.reveals {
            let report = self
                .adjudicator
                .determine_cheater(&record.guid, earlier, &ris);
            let worse = verdict
                .as_ref()
                .map_or(true, |best| severity(report.verdict) > severity(best.verdict));
            if worse {
                verdict = Some(report);
            }
            if verdict
                .as_ref()
                .is_some_and(|r| r.verdict == Verdict::OwnerDoubleSpend)
            {
                break;
            }
        }
        if !entry.reveals.contains(&ris) {
            entry.reveals.push(ris);
        }

        let report = verdict.unwrap_or_else(|| CheaterReport::indeterminate(&record.guid));
        tracing::info!(
            guid = %report.guid,
            verdict = %report.verdict,
            reveals = entry.reveals.len(),
            "repeat deposit adjudicated"
        );
        Ok(DepositOutcome::Adjudicated(report))
    }

    /// Number of distinct reveals held for `guid`.
    ///
    /// # Errors
    ///
    /// - [`JudgeError::LockPoisoned`] if the deposit book lock is poisoned
    pub fn reveal_count(&self, guid: &str) -> Result<usize> {
        Ok(self.lock()?.get(guid).map_or(0, |d| d.reveals.len()))
    }

    /// Number of distinct coins deposited.
    ///
    /// # Errors
    ///
    /// - [`JudgeError::LockPoisoned`] if the deposit book lock is poisoned
    pub fn coin_count(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Deposits>>> {
        self.deposits.lock().map_err(|_| {
            tracing::warn!("deposit book lock poisoned");
            JudgeError::LockPoisoned
        })
    }
}

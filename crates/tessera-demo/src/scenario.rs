//! Scripted spend scenarios.

use serde::Serialize;
use tessera_coin::{Coin, ProtocolParams, Ris, Side, SigningAuthority};
use tessera_crypto::blind::BlindSignatureScheme;
use tessera_judge::{CheaterReport, DepositDesk, DepositOutcome};
use tessera_merchant::{FixedChallenge, Merchant, RngChallenge};
use tracing::info;

/// What one scenario produced.
#[derive(Debug, Serialize)]
pub struct ScenarioResult {
    pub scenario: &'static str,
    pub guid: String,
    pub deposits: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<CheaterReport>,
}

/// The bank side of the demo: one signing key, one deposit desk.
pub struct Bank<S: BlindSignatureScheme> {
    params: ProtocolParams,
    authority: SigningAuthority<S>,
    desk: DepositDesk<S>,
    amount: u64,
}

impl<S: BlindSignatureScheme> Bank<S> {
    pub fn new(params: ProtocolParams, authority: SigningAuthority<S>, amount: u64) -> Self {
        Self {
            desk: DepositDesk::new(params.clone(), authority.public_params().clone()),
            params,
            authority,
            amount,
        }
    }

    /// Mint a coin for `owner` and run the blind signing exchange.
    fn withdraw(&self, owner: &str) -> anyhow::Result<Coin<S>> {
        let mut coin = Coin::<S>::mint(
            &self.params,
            owner,
            self.amount,
            self.authority.public_params().clone(),
        )?;
        let (blinded, pending) = coin.request_signature()?;
        let blind_signature = self.authority.sign(&blinded)?;
        coin.complete_signature(&blind_signature, pending)?;
        info!(guid = %coin.guid(), "withdrawal complete");
        Ok(coin)
    }

    fn merchant(&self) -> Merchant {
        Merchant::new(self.params.clone())
    }

    /// Hand one reveal of `coin` to the deposit desk.
    fn deposit(&self, coin: &Coin<S>, ris: Ris) -> anyhow::Result<DepositOutcome> {
        let signature = coin
            .signature()
            .ok_or_else(|| anyhow::anyhow!("coin {} was never signed", coin.guid()))?;
        Ok(self.desk.deposit(coin.record(), signature, ris)?)
    }

    fn finish(
        &self,
        scenario: &'static str,
        coin: &Coin<S>,
        last: DepositOutcome,
    ) -> anyhow::Result<ScenarioResult> {
        Ok(ScenarioResult {
            scenario,
            guid: coin.guid().to_string(),
            deposits: self.desk.reveal_count(coin.guid())?,
            report: last.report().cloned(),
        })
    }

    /// One spend, one deposit.
    pub fn honest_spend(&self, owner: &str) -> anyhow::Result<ScenarioResult> {
        let coin = self.withdraw(owner)?;
        let ris = self.merchant().accept(&coin, &mut RngChallenge::os())?;
        let outcome = self.deposit(&coin, ris)?;
        self.finish("honest", &coin, outcome)
    }

    /// The owner spends one coin at two merchants that challenge opposite sides.
    pub fn owner_double_spend(&self, owner: &str) -> anyhow::Result<ScenarioResult> {
        let coin = self.withdraw(owner)?;
        let first = self.merchant().accept(&coin, &mut FixedChallenge(Side::Left))?;
        let second = self.merchant().accept(&coin, &mut FixedChallenge(Side::Right))?;
        self.deposit(&coin, first)?;
        let outcome = self.deposit(&coin, second)?;
        self.finish("owner-double-spend", &coin, outcome)
    }

    /// A merchant deposits the reveal it already cashed.
    pub fn merchant_fraud(&self, owner: &str) -> anyhow::Result<ScenarioResult> {
        let coin = self.withdraw(owner)?;
        let ris = self.merchant().accept(&coin, &mut RngChallenge::os())?;
        self.deposit(&coin, ris.clone())?;
        let outcome = self.deposit(&coin, ris)?;
        self.finish("merchant-fraud", &coin, outcome)
    }
}

//! Integration test: double-spend tracing at the bank.
//!
//! Exercises the cheating paths end to end:
//! 1. An owner spends one coin at two merchants challenging opposite sides;
//!    the second deposit recovers the owner's identity
//! 2. A merchant deposits the same reveal twice and is blamed
//! 3. Two merchants that happen to challenge the same side yield identical
//!    reveals, which the bank cannot tell from a redeposit
//! 4. A forged reveal is refused before it reaches adjudication
//! 5. A record the bank never signed is refused before it is pinned
//! 6. Reports serialize to the JSON shape published to operators

use std::sync::OnceLock;

use tessera_coin::{Coin, Preimage, ProtocolParams, Ris, Side, SigningAuthority};
use tessera_crypto::blind::{RsaBlind, Signature};
use tessera_judge::{Adjudicator, DepositDesk, DepositOutcome, JudgeError, Verdict};
use tessera_merchant::{FixedChallenge, Merchant};

fn bank() -> &'static SigningAuthority<RsaBlind> {
    static BANK: OnceLock<SigningAuthority<RsaBlind>> = OnceLock::new();
    BANK.get_or_init(|| SigningAuthority::generate(2048).expect("bank key"))
}

fn withdraw(params: &ProtocolParams, owner: &str) -> Coin<RsaBlind> {
    let bank = bank();
    let mut coin =
        Coin::<RsaBlind>::mint(params, owner, 10, bank.public_params().clone()).expect("mint");
    bank.issue(&mut coin).expect("issue");
    coin
}

fn desk(params: &ProtocolParams) -> DepositDesk<RsaBlind> {
    DepositDesk::new(params.clone(), bank().public_params().clone())
}

fn deposit(
    desk: &DepositDesk<RsaBlind>,
    coin: &Coin<RsaBlind>,
    ris: Ris,
) -> Result<DepositOutcome, JudgeError> {
    let signature = coin.signature().expect("signed coin");
    desk.deposit(coin.record(), signature, ris)
}

#[test]
fn test_owner_double_spend_reveals_identity() {
    let params = ProtocolParams::with_k(3);
    let coin = withdraw(&params, "alice");
    let desk = desk(&params);

    let first = Merchant::new(params.clone())
        .accept(&coin, &mut FixedChallenge(Side::Left))
        .expect("first spend");
    let second = Merchant::new(params.clone())
        .accept(&coin, &mut FixedChallenge(Side::Right))
        .expect("second spend");

    deposit(&desk, &coin, first).expect("first deposit");
    let outcome = deposit(&desk, &coin, second).expect("second deposit");
    let report = outcome.report().expect("adjudicated");

    assert_eq!(report.guid, coin.guid());
    assert_eq!(report.verdict, Verdict::OwnerDoubleSpend);
    assert_eq!(report.identity(), Some("alice"));
}

#[test]
fn test_identity_with_separators_survives() {
    let params = ProtocolParams::with_k(2);
    let coin = withdraw(&params, "carol-o'neil, esq.");
    let merchant = Merchant::new(params.clone());
    let left = merchant
        .accept(&coin, &mut FixedChallenge(Side::Left))
        .expect("left");
    let right = merchant
        .accept(&coin, &mut FixedChallenge(Side::Right))
        .expect("right");

    let report = Adjudicator::new(params)
        .determine_cheater_checked(coin.record(), &left, &right)
        .expect("checked")
        .conclusive()
        .expect("conclusive");
    assert_eq!(report.identity(), Some("carol-o'neil, esq."));
}

#[test]
fn test_merchant_redeposit_is_blamed_on_merchant() {
    let params = ProtocolParams::with_k(3);
    let coin = withdraw(&params, "alice");
    let desk = desk(&params);

    let ris = Merchant::new(params)
        .accept(&coin, &mut FixedChallenge(Side::Right))
        .expect("spend");
    deposit(&desk, &coin, ris.clone()).expect("first deposit");
    let outcome = deposit(&desk, &coin, ris).expect("redeposit");
    let report = outcome.report().expect("adjudicated");

    assert_eq!(report.verdict, Verdict::MerchantFraud);
    assert_eq!(report.identity(), None);
}

#[test]
fn test_same_side_double_spend_looks_like_merchant_fraud() {
    let params = ProtocolParams::with_k(3);
    let coin = withdraw(&params, "alice");
    let desk = desk(&params);

    let first = Merchant::new(params.clone())
        .accept(&coin, &mut FixedChallenge(Side::Left))
        .expect("first spend");
    let second = Merchant::new(params.clone())
        .accept(&coin, &mut FixedChallenge(Side::Left))
        .expect("second spend");
    let outcome = deposit(&desk, &coin, first).expect("first deposit");
    assert_eq!(outcome, DepositOutcome::Recorded);
    let outcome = deposit(&desk, &coin, second).expect("second deposit");
    assert_eq!(
        outcome.report().map(|r| r.verdict),
        Some(Verdict::MerchantFraud)
    );

    // A third spend on the other side still catches the owner.
    let ris = Merchant::new(params)
        .accept(&coin, &mut FixedChallenge(Side::Right))
        .expect("spend");
    let outcome = deposit(&desk, &coin, ris).expect("deposit");
    assert_eq!(
        outcome.report().map(|r| r.verdict),
        Some(Verdict::OwnerDoubleSpend)
    );
    // Identical reveals are stored once.
    assert_eq!(desk.reveal_count(coin.guid()).expect("count"), 2);
}

#[test]
fn test_forged_reveal_refused_at_deposit() {
    let params = ProtocolParams::with_k(3);
    let coin = withdraw(&params, "alice");
    let victim = withdraw(&params, "bob");
    let desk = desk(&params);

    // A merchant tries to frame the owner with shares from another coin.
    let stolen: Vec<Preimage> = (0..3)
        .map(|i| victim.reveal_side(Side::Right, i).expect("share").clone())
        .collect();
    let err = deposit(&desk, &coin, Ris::new(stolen)).expect_err("forged");
    assert!(matches!(err, JudgeError::HashMismatch { index: 0, .. }));
    assert_eq!(desk.reveal_count(coin.guid()).expect("count"), 0);
}

#[test]
fn test_unissued_record_cannot_frame_owner() {
    let params = ProtocolParams::with_k(3);
    let desk = desk(&params);

    // Mint a coin naming bob but never take it to the bank.
    let forged =
        Coin::<RsaBlind>::mint(&params, "bob", 10, bank().public_params().clone()).expect("mint");
    let reveal = |side| {
        Ris::new(
            (0..3)
                .map(|i| forged.reveal_side(side, i).expect("share").clone())
                .collect::<Vec<Preimage>>(),
        )
    };
    let unsigned = Signature(vec![0u8; 256]);

    for side in [Side::Left, Side::Right] {
        let err = desk
            .deposit(forged.record(), &unsigned, reveal(side))
            .expect_err("unsigned");
        assert!(matches!(err, JudgeError::InvalidSignature { .. }));
    }
    assert_eq!(desk.reveal_count(forged.guid()).expect("count"), 0);
    assert_eq!(desk.coin_count().expect("count"), 0);
}

#[test]
fn test_report_json_shape() {
    let params = ProtocolParams::with_k(2);
    let coin = withdraw(&params, "alice");
    let merchant = Merchant::new(params.clone());
    let left = merchant
        .accept(&coin, &mut FixedChallenge(Side::Left))
        .expect("left");
    let right = merchant
        .accept(&coin, &mut FixedChallenge(Side::Right))
        .expect("right");

    let report = Adjudicator::new(params).determine_cheater(coin.guid(), &left, &right);
    let json: serde_json::Value = serde_json::to_value(&report).expect("json");
    assert_eq!(json["guid"], coin.guid());
    assert_eq!(json["verdict"], "ownerDoubleSpend");
    assert_eq!(json["identity"], "alice");

    let reveal: serde_json::Value = serde_json::to_value(&left).expect("json");
    let first = reveal[0].as_str().expect("hex share");
    assert_eq!(hex::decode(first).expect("hex"), left.shares()[0].as_bytes());
}

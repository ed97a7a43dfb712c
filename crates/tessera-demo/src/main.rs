//! tessera-demo: runs the withdraw, spend and deposit lifecycle end to end.
//!
//! Generates a bank key, then plays an honest spend, an owner double spend
//! and a merchant redeposit, printing one JSON result per scenario.

mod config;
mod scenario;

use tessera_coin::SigningAuthority;
use tessera_crypto::blind::RsaBlind;
use tracing::info;

use crate::config::DemoConfig;
use crate::scenario::Bank;

fn main() -> anyhow::Result<()> {
    let config = DemoConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.logging.level))?,
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        k = config.protocol.k,
        key_bits = config.bank.key_bits,
        "tessera demo starting"
    );

    let authority = SigningAuthority::<RsaBlind>::generate(config.bank.key_bits)?;
    let public = authority.public_params();
    info!(
        modulus_bytes = public.modulus()?.len() / 2,
        exponent = %public.exponent()?,
        "bank key ready"
    );

    let bank = Bank::new(config.protocol.clone(), authority, config.bank.amount);
    let results = [
        bank.honest_spend("alice")?,
        bank.owner_double_spend("bob")?,
        bank.merchant_fraud("carol")?,
    ];

    for result in &results {
        println!("{}", serde_json::to_string_pretty(result)?);
    }

    info!("tessera demo finished");
    Ok(())
}

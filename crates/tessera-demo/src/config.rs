//! Demo configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tessera_coin::ProtocolParams;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "TESSERA_CONFIG";

/// Complete demo configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Protocol parameters shared by every party.
    #[serde(default)]
    pub protocol: ProtocolParams,
    /// Bank key settings.
    #[serde(default)]
    pub bank: BankConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Bank configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankConfig {
    /// RSA modulus size.
    #[serde(default = "default_key_bits")]
    pub key_bits: usize,
    /// Face value of demo coins.
    #[serde(default = "default_amount")]
    pub amount: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter: "trace" | "debug" | "info" | "warn" | "error".
    /// `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_key_bits() -> usize {
    2048
}

fn default_amount() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            key_bits: default_key_bits(),
            amount: default_amount(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl DemoConfig {
    /// Load configuration from the file named by `TESSERA_CONFIG`.
    ///
    /// Falls back to defaults if the variable is unset or the file does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(std::env::var_os(CONFIG_ENV).map(PathBuf::from).as_deref())
    }

    /// Load configuration from `path`, if given and present.
    pub fn load_from(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path)?;
                toml::from_str::<DemoConfig>(&content)?
            }
            _ => Self::default(),
        };
        config.protocol.validate()?;
        Ok(config)
    }
}

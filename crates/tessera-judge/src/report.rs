//! Verdicts and cheater reports.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{JudgeError, Result};

/// Who cheated, as far as two reveals can tell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    /// The same reveal was deposited twice.
    MerchantFraud,
    /// The owner spent the coin twice; their identity is recovered.
    OwnerDoubleSpend,
    /// No index yielded an identity. Points at bad data upstream.
    Indeterminate,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::MerchantFraud => f.write_str("merchant fraud"),
            Verdict::OwnerDoubleSpend => f.write_str("owner double spend"),
            Verdict::Indeterminate => f.write_str("indeterminate"),
        }
    }
}

/// The outcome of comparing two reveals of one coin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheaterReport {
    pub guid: String,
    pub verdict: Verdict,
    /// Set only for [`Verdict::OwnerDoubleSpend`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
}

impl CheaterReport {
    pub fn merchant_fraud(guid: &str) -> Self {
        Self {
            guid: guid.to_string(),
            verdict: Verdict::MerchantFraud,
            identity: None,
        }
    }

    pub fn owner_double_spend(guid: &str, identity: String) -> Self {
        Self {
            guid: guid.to_string(),
            verdict: Verdict::OwnerDoubleSpend,
            identity: Some(identity),
        }
    }

    pub fn indeterminate(guid: &str) -> Self {
        Self {
            guid: guid.to_string(),
            verdict: Verdict::Indeterminate,
            identity: None,
        }
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Turn an indeterminate verdict into an error.
    ///
    /// # Errors
    ///
    /// - [`JudgeError::Indeterminate`] if the verdict is [`Verdict::Indeterminate`]
    pub fn conclusive(self) -> Result<Self> {
        match self.verdict {
            Verdict::Indeterminate => Err(JudgeError::Indeterminate { guid: self.guid }),
            _ => Ok(self),
        }
    }
}

//! The public coin record and its wire format.
//!
//! ```text
//! <bank_marker>-<amount>-<guid>-<left_1,...,left_k>-<right_1,...,right_k>
//! ```
//!
//! Commitments are lowercase hex. The bank signs [`CoinRecord::signing_message`],
//! the same fields without the marker.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tessera_crypto::blake3::DIGEST_LEN;

use crate::params::{FIELD_SEPARATOR, LIST_SEPARATOR};
use crate::{CoinError, ProtocolParams, Result, Side};

/// A one-way commitment to a share preimage.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment(#[serde(with = "hex::serde")] pub [u8; DIGEST_LEN]);

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({self})")
    }
}

impl FromStr for Commitment {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self> {
        let mut out = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut out)
            .map_err(|e| CoinError::format(format!("bad commitment {s:?}: {e}")))?;
        Ok(Self(out))
    }
}

/// Everything about a coin that may leave the owner's hands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinRecord {
    pub bank_marker: String,
    pub amount: u64,
    pub guid: String,
    pub left: Vec<Commitment>,
    pub right: Vec<Commitment>,
}

impl CoinRecord {
    /// Number of share pairs, as declared by the left list.
    pub fn k(&self) -> usize {
        self.left.len()
    }

    /// The commitment list for one side.
    pub fn commitments(&self, side: Side) -> &[Commitment] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// The commitment at `index` on `side`, if present.
    pub fn commitment(&self, side: Side, index: usize) -> Option<&Commitment> {
        self.commitments(side).get(index)
    }

    /// Canonical `amount-guid-left-right` bytes submitted for blind signing.
    pub fn signing_message(&self) -> Vec<u8> {
        format!(
            "{}{sep}{}{sep}{}{sep}{}",
            self.amount,
            self.guid,
            join(&self.left),
            join(&self.right),
            sep = FIELD_SEPARATOR,
        )
        .into_bytes()
    }

    /// Encode to the wire format.
    pub fn serialize(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}{sep}{}{sep}{}",
            self.bank_marker,
            self.amount,
            self.guid,
            join(&self.left),
            join(&self.right),
            sep = FIELD_SEPARATOR,
        )
    }

    /// Decode from the wire format.
    ///
    /// # Errors
    ///
    /// - [`CoinError::Format`] if the marker differs from `params.bank_marker`,
    ///   a field is missing or unparsable, or either list does not hold
    ///   exactly `params.k` commitments
    pub fn parse(params: &ProtocolParams, text: &str) -> Result<Self> {
        let fields: Vec<&str> = text.trim().split(FIELD_SEPARATOR).collect();
        if fields.first() != Some(&params.bank_marker.as_str()) {
            return Err(CoinError::format(format!(
                "leading field is not the bank marker {:?}",
                params.bank_marker
            )));
        }
        let [marker, amount, guid, left, right] = fields[..] else {
            return Err(CoinError::format(format!(
                "expected 5 fields, found {}",
                fields.len()
            )));
        };

        let amount: u64 = amount
            .parse()
            .map_err(|e| CoinError::format(format!("bad amount {amount:?}: {e}")))?;
        if guid.is_empty() {
            return Err(CoinError::format("empty guid"));
        }

        let left = parse_list(left, Side::Left, params.k)?;
        let right = parse_list(right, Side::Right, params.k)?;

        Ok(Self {
            bank_marker: marker.to_string(),
            amount,
            guid: guid.to_string(),
            left,
            right,
        })
    }
}

impl fmt::Display for CoinRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

fn join(list: &[Commitment]) -> String {
    list.iter()
        .map(Commitment::to_string)
        .collect::<Vec<_>>()
        .join(&LIST_SEPARATOR.to_string())
}

fn parse_list(field: &str, side: Side, k: usize) -> Result<Vec<Commitment>> {
    let list = field
        .split(LIST_SEPARATOR)
        .map(Commitment::from_str)
        .collect::<Result<Vec<_>>>()?;
    if list.len() != k {
        return Err(CoinError::format(format!(
            "{side} commitment list has {} entries, expected {k}",
            list.len()
        )));
    }
    Ok(list)
}

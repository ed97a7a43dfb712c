//! Revealed identity share sequences.

use serde::{Deserialize, Serialize};

use crate::Preimage;

/// The `k` preimages, all from one side, disclosed by one acceptance.
///
/// Index order matches the coin's commitment lists. The side is deliberately
/// not recorded; the adjudicator infers it when it needs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ris(Vec<Preimage>);

impl Ris {
    pub fn new(shares: Vec<Preimage>) -> Self {
        Self(shares)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Preimage> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Preimage> {
        self.0.iter()
    }

    pub fn shares(&self) -> &[Preimage] {
        &self.0
    }
}

impl From<Vec<Preimage>> for Ris {
    fn from(shares: Vec<Preimage>) -> Self {
        Self(shares)
    }
}

impl<'a> IntoIterator for &'a Ris {
    type Item = &'a Preimage;
    type IntoIter = std::slice::Iter<'a, Preimage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

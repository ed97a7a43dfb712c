//! Side challenge sources.
//!
//! Each acceptance draws exactly one side for the whole RIS. Production uses
//! [`RngChallenge::os`]; tests pin the outcome with [`FixedChallenge`].

use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use tessera_coin::Side;

/// Something that decides which side the owner must open.
pub trait SideChallenge {
    /// Draw the side for one transaction.
    fn challenge(&mut self) -> Side;
}

/// One fair coin flip per call from any RNG.
pub struct RngChallenge<R> {
    rng: R,
}

impl<R: RngCore> RngChallenge<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngChallenge<OsRng> {
    /// Challenges drawn from the operating system RNG.
    pub fn os() -> Self {
        Self { rng: OsRng }
    }
}

impl<R: RngCore> SideChallenge for RngChallenge<R> {
    fn challenge(&mut self) -> Side {
        if self.rng.gen_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Always the same side.
#[derive(Clone, Copy, Debug)]
pub struct FixedChallenge(pub Side);

impl SideChallenge for FixedChallenge {
    fn challenge(&mut self) -> Side {
        self.0
    }
}

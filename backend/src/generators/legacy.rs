//! Marsaglia's 1999 KISS, kept bit-exact
//!
//! The generator from George Marsaglia's 1999 newsgroup post, which differs
//! from [`Kiss`](super::Kiss) in three places:
//!
//! - the MWC output is `(z << 16) + w` (no rotation)
//! - the congruential constant is 1234567
//! - the shift register uses shifts 17, 13, 5
//!
//! Its SHR3 part has known weaknesses, so it is not offered for general use.
//! It exists because it is what bootstraps the lagged-Fibonacci tables, and
//! those published sequences depend on it. Seeds are only corrected when
//! they would genuinely lock a component up, so historical seeds reproduce
//! the historical sequence exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::cong::CONG_MULT;
use super::mwc::{LOWER_LANE, UPPER_LANE};
use super::{impl_generator_iterator, Generator};
use crate::seed::{flatten, next_or_default, Seed};

const KISS1999_CONG_CONST: u32 = 1_234_567;
const KISS1999_DEFAULT_SEEDS: [u32; 4] = [362_436_069, 521_288_629, 123_456_789, 380_116_160];

/// Marsaglia's 1999 KISS generator
///
/// State order is `(z, w, jsr, jcong)`.
///
/// # Example
/// ```
/// use simplerandom_core_rs::{Generator, Kiss1999};
///
/// let mut kiss = Kiss1999::default();
/// assert_eq!(kiss.advance(), 769445856);
/// assert_eq!(kiss.advance(), 742012328);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct Kiss1999 {
    z: u32,
    w: u32,
    jsr: u32,
    jcong: u32,
}

impl Kiss1999 {
    pub fn new(z: u32, w: u32, jsr: u32, jcong: u32) -> Self {
        let mut kiss = Self { z, w, jsr, jcong };
        kiss.sanitize();
        kiss
    }

    /// Build from up to four seed limbs; missing ones take the 1999 defaults
    ///
    /// Limbs beyond the fourth are ignored.
    pub fn from_seed<S: Into<Seed>>(seed: S) -> Self {
        let seed = seed.into();
        let mut limbs = flatten(&seed);
        let [z, w, jsr, jcong] =
            KISS1999_DEFAULT_SEEDS.map(|default| next_or_default(&mut limbs, default));
        Self::new(z, w, jsr, jcong)
    }

    /// Correct only states that would lock a component up
    pub fn sanitize(&mut self) {
        if UPPER_LANE.is_degenerate(self.z) {
            self.z = UPPER_LANE.sanitize(self.z);
        }
        if LOWER_LANE.is_degenerate(self.w) {
            self.w = LOWER_LANE.sanitize(self.w);
        }
        if self.jsr == 0 {
            log::debug!("KISS1999: jsr 0 replaced with 0xFFFFFFFF");
            self.jsr = 0xFFFF_FFFF;
        }
    }

    fn mwc(&self) -> u32 {
        (self.z << 16).wrapping_add(self.w)
    }
}

impl Default for Kiss1999 {
    fn default() -> Self {
        let [z, w, jsr, jcong] = KISS1999_DEFAULT_SEEDS;
        Self::new(z, w, jsr, jcong)
    }
}

impl Generator for Kiss1999 {
    type State = [u32; 4];
    const NAME: &'static str = "KISS1999";

    fn advance(&mut self) -> u32 {
        self.z = UPPER_LANE.step(self.z);
        self.w = LOWER_LANE.step(self.w);
        self.jcong = CONG_MULT.wrapping_mul(self.jcong).wrapping_add(KISS1999_CONG_CONST);
        self.jsr ^= self.jsr << 17;
        self.jsr ^= self.jsr >> 13;
        self.jsr ^= self.jsr << 5;
        self.current()
    }

    fn current(&self) -> u32 {
        (self.mwc() ^ self.jcong).wrapping_add(self.jsr)
    }

    fn state(&self) -> [u32; 4] {
        [self.z, self.w, self.jsr, self.jcong]
    }

    fn set_state(&mut self, state: [u32; 4]) {
        *self = Self::new(state[0], state[1], state[2], state[3]);
    }
}

impl_generator_iterator!(Kiss1999);

impl From<[u32; 4]> for Kiss1999 {
    fn from(state: [u32; 4]) -> Self {
        Self::new(state[0], state[1], state[2], state[3])
    }
}

impl From<Kiss1999> for [u32; 4] {
    fn from(kiss: Kiss1999) -> Self {
        kiss.state()
    }
}

impl fmt::Display for Kiss1999 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KISS1999({}, {}, {}, {})",
            self.z, self.w, self.jsr, self.jcong
        )
    }
}

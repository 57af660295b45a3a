//! 64-bit multiply-with-carry generator (MWC64)
//!
//! A single lag-1 MWC with a 32-bit multiplier and 64-bit state:
//!
//! ```text
//! s' = 698769069 * (s & 0xFFFFFFFF) + (s >> 32)
//! ```
//!
//! The output is the low word. The recurrence equals
//! `s' = 698769069 * s mod (698769069 * 2^32 - 1)`, so jump-ahead is a single
//! modular exponentiation. Period about 2^60. Much better statistical
//! quality than the two-lane MWC; used as the MWC part of KISS2.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{impl_generator_iterator, Generator, JumpAhead, Seedable};
use crate::maths::{mul_mod_u64, pow_mod_u64, reduce_steps};
use crate::seed::{next_or_default, repeat_last};

const MWC64_MULT: u64 = 698_769_069;
const MWC64_MODULO: u64 = MWC64_MULT * (1 << 32) - 1;
const MWC64_CYCLE_LEN: u64 = MWC64_MULT * (1 << 32) / 2 - 1;
const MWC64_DEFAULT_SEED: u32 = 0xFFFF_FFFF;

/// 64-bit multiply-with-carry generator
///
/// # Example
/// ```
/// use simplerandom_core_rs::{Generator, Mwc64};
///
/// let mut mwc = Mwc64::new(1, 1);
/// assert_eq!(mwc.advance(), 698769069 + 1);
/// assert_eq!(mwc.state(), [0, 698769070]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Mwc64 {
    state: u64,
}

impl Mwc64 {
    /// Create from the upper (carry) and lower (output) words, sanitized
    pub fn new(upper: u32, lower: u32) -> Self {
        let mut mwc = Self {
            state: (u64::from(upper) << 32) | u64::from(lower),
        };
        mwc.sanitize();
        mwc
    }

    /// Upper (carry) word
    pub fn upper(&self) -> u32 {
        (self.state >> 32) as u32
    }

    /// Lower (output) word
    pub fn lower(&self) -> u32 {
        self.state as u32
    }

    /// Overwrite the upper word (sanitized)
    pub fn set_upper(&mut self, value: u32) {
        *self = Self::new(value, self.lower());
    }

    /// Overwrite the lower word (sanitized)
    pub fn set_lower(&mut self, value: u32) {
        *self = Self::new(self.upper(), value);
    }
}

impl Default for Mwc64 {
    fn default() -> Self {
        Self::new(MWC64_DEFAULT_SEED, MWC64_DEFAULT_SEED)
    }
}

impl Generator for Mwc64 {
    type State = [u32; 2];
    const NAME: &'static str = "MWC64";

    #[inline]
    fn advance(&mut self) -> u32 {
        // the carry is below the multiplier once sanitized, so no overflow
        self.state = MWC64_MULT * (self.state & 0xFFFF_FFFF) + (self.state >> 32);
        self.lower()
    }

    fn current(&self) -> u32 {
        self.lower()
    }

    fn state(&self) -> [u32; 2] {
        [self.upper(), self.lower()]
    }

    fn set_state(&mut self, state: [u32; 2]) {
        *self = Self::new(state[0], state[1]);
    }
}

impl Seedable for Mwc64 {
    fn from_limbs<I>(limbs: &mut I) -> Self
    where
        I: Iterator<Item = Option<u32>>,
    {
        let mut repeated = repeat_last(&mut *limbs);
        let upper = next_or_default(&mut repeated, MWC64_DEFAULT_SEED);
        let lower = next_or_default(&mut repeated, MWC64_DEFAULT_SEED);
        Self::new(upper, lower)
    }

    fn sanitize(&mut self) {
        let reduced = self.state % MWC64_MODULO;
        if reduced != 0 {
            self.state = reduced;
            return;
        }
        let inverted = !self.state % MWC64_MODULO;
        log::debug!(
            "MWC64: degenerate state {:#x} replaced with {:#x}",
            self.state,
            inverted
        );
        self.state = inverted;
    }

    fn mix_limb(&mut self, value: u32) {
        if (self.current() >> 24) & 1 == 0 {
            self.state ^= u64::from(value) << 32;
        } else {
            self.state ^= u64::from(value);
        }
        self.sanitize();
        self.advance();
    }
}

impl JumpAhead for Mwc64 {
    fn cycle_len() -> u128 {
        u128::from(MWC64_CYCLE_LEN)
    }

    fn jump_ahead(&mut self, n: i128) {
        let steps = reduce_steps(n, MWC64_CYCLE_LEN);
        log::trace!("MWC64: jump ahead {} steps", steps);
        let mult = pow_mod_u64(MWC64_MULT, steps, MWC64_MODULO);
        self.state = mul_mod_u64(mult, self.state, MWC64_MODULO);
    }
}

impl_generator_iterator!(Mwc64);

impl From<[u32; 2]> for Mwc64 {
    fn from(state: [u32; 2]) -> Self {
        Self::new(state[0], state[1])
    }
}

impl From<Mwc64> for [u32; 2] {
    fn from(mwc: Mwc64) -> Self {
        mwc.state()
    }
}

impl fmt::Display for Mwc64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MWC64({}, {})", self.upper(), self.lower())
    }
}

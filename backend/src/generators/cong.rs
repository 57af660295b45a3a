//! Linear congruential generator
//!
//! `x[n] = 69069 * x[n-1] + 12345 mod 2^32`, period 2^32.
//!
//! The high half of its bits are reasonable; the low bits are very regular.
//! It is kept mainly as a component of KISS and KISS2, where those weaknesses
//! are masked by the other components.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{impl_generator_iterator, Generator, JumpAhead, Seedable};
use crate::maths::{geom_series_u32, reduce_steps};
use crate::seed::next_or_default;

pub(crate) const CONG_MULT: u32 = 69069;
pub(crate) const CONG_CONST: u32 = 12345;
const CONG_CYCLE_LEN: u64 = 1 << 32;
const CONG_DEFAULT_SEED: u32 = 0;

/// Congruential generator with the 69069 multiplier
///
/// # Example
/// ```
/// use simplerandom_core_rs::{Cong, Generator};
///
/// let mut cong = Cong::new(1);
/// assert_eq!(cong.advance(), 69069 + 12345);
/// assert_eq!(cong.current(), 81414);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 1]", into = "[u32; 1]")]
pub struct Cong {
    cong: u32,
}

impl Cong {
    /// Create with an explicit seed (every value is a valid state)
    pub fn new(seed: u32) -> Self {
        Self { cong: seed }
    }

    /// Apply `x' = mult * x + add` for a precomputed `(mult, add)` pair
    pub(crate) fn apply_affine(x: u32, mult: u32, add: u32) -> u32 {
        mult.wrapping_mul(x).wrapping_add(add)
    }

    /// Multiplier and additive constant equivalent to `n` steps
    pub(crate) fn jump_coefficients(constant: u32, n: u64) -> (u32, u32) {
        let steps = (n % CONG_CYCLE_LEN) as u32;
        let mult = CONG_MULT.wrapping_pow(steps);
        let add = geom_series_u32(CONG_MULT, u64::from(steps)).wrapping_mul(constant);
        (mult, add)
    }
}

impl Default for Cong {
    fn default() -> Self {
        Self::new(CONG_DEFAULT_SEED)
    }
}

impl Generator for Cong {
    type State = [u32; 1];
    const NAME: &'static str = "Cong";

    fn advance(&mut self) -> u32 {
        self.cong = Self::apply_affine(self.cong, CONG_MULT, CONG_CONST);
        self.cong
    }

    fn current(&self) -> u32 {
        self.cong
    }

    fn state(&self) -> [u32; 1] {
        [self.cong]
    }

    fn set_state(&mut self, state: [u32; 1]) {
        self.cong = state[0];
    }
}

impl Seedable for Cong {
    fn from_limbs<I>(limbs: &mut I) -> Self
    where
        I: Iterator<Item = Option<u32>>,
    {
        Self::new(next_or_default(limbs, CONG_DEFAULT_SEED))
    }

    fn sanitize(&mut self) {
        // every 32-bit value is a valid state
    }

    fn mix_limb(&mut self, value: u32) {
        self.cong ^= value;
        self.advance();
    }
}

impl JumpAhead for Cong {
    fn cycle_len() -> u128 {
        u128::from(CONG_CYCLE_LEN)
    }

    fn jump_ahead(&mut self, n: i128) {
        let steps = reduce_steps(n, CONG_CYCLE_LEN);
        log::trace!("Cong: jump ahead {} steps", steps);
        let (mult, add) = Self::jump_coefficients(CONG_CONST, steps);
        self.cong = Self::apply_affine(self.cong, mult, add);
    }
}

impl_generator_iterator!(Cong);

impl From<[u32; 1]> for Cong {
    fn from(state: [u32; 1]) -> Self {
        Self::new(state[0])
    }
}

impl From<Cong> for [u32; 1] {
    fn from(cong: Cong) -> Self {
        cong.state()
    }
}

impl fmt::Display for Cong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cong({})", self.cong)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_is_zero() {
        assert_eq!(Cong::default().state(), [0]);
        assert_eq!(Cong::seeded(()).state(), [0]);
    }

    #[test]
    fn test_wraps_modulo_2_32() {
        let mut cong = Cong::new(u32::MAX);
        let expected = (69069u64 * u64::from(u32::MAX) + 12345) as u32;
        assert_eq!(cong.advance(), expected);
    }

    #[test]
    fn test_jump_small_counts_match_stepping() {
        let mut stepped = Cong::new(2051391225);
        for n in 0..200u32 {
            let mut jumped = Cong::new(2051391225);
            jumped.jump_ahead(i128::from(n));
            assert_eq!(jumped, stepped, "n={}", n);
            stepped.advance();
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Cong::new(42)), "Cong(42)");
    }
}

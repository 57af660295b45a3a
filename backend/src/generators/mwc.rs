//! Two-lane multiply-with-carry generators (MWC1, MWC2)
//!
//! Two 16-bit multiply-with-carry lanes:
//!
//! ```text
//! upper' = 36969 * (upper & 0xFFFF) + (upper >> 16)
//! lower' = 18000 * (lower & 0xFFFF) + (lower >> 16)
//! ```
//!
//! Each lane is equivalent to the multiplicative recurrence
//! `lane' = mult * lane mod (mult * 2^16 - 1)`, which is how jump-ahead is
//! computed. The two families differ only in how the lanes become one
//! 32-bit output:
//!
//! - **MWC2** (preferred) rotates the upper lane by 16 bits before adding
//! - **MWC1** (Marsaglia 1999) shifts it, dropping its high half; kept for
//!   compatibility, it fares much worse in TestU01
//!
//! The combining strategy is a zero-sized type parameter, so both share one
//! stepping implementation with no runtime dispatch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use super::{Generator, JumpAhead, Seedable};
use crate::maths::{mul_mod_u64, pow_mod_u64, reduce_steps};
use crate::seed::{next_or_default, repeat_last};

const MWC_DEFAULT_SEED: u32 = 0xFFFF_FFFF;

/// One 16-bit multiply-with-carry lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MwcLane {
    name: &'static str,
    mult: u32,
    modulo: u32,
    cycle_len: u64,
}

pub(crate) const UPPER_LANE: MwcLane = MwcLane {
    name: "upper",
    mult: 36969,
    // 36969 * 2^16 - 1
    modulo: 0x9068_FFFF,
    cycle_len: 36969 * (1 << 16) / 2 - 1,
};

pub(crate) const LOWER_LANE: MwcLane = MwcLane {
    name: "lower",
    mult: 18000,
    // 18000 * 2^16 - 1
    modulo: 0x464F_FFFF,
    cycle_len: 18000 * (1 << 16) / 2 - 1,
};

impl MwcLane {
    #[inline]
    pub(crate) fn step(self, x: u32) -> u32 {
        // mult * 0xFFFF + 0xFFFF stays below 2^32 for both lanes
        self.mult * (x & 0xFFFF) + (x >> 16)
    }

    /// Multiples of the lane modulus are fixed points; map them elsewhere
    pub(crate) fn sanitize(self, x: u32) -> u32 {
        let reduced = x % self.modulo;
        if reduced != 0 {
            return reduced;
        }
        let inverted = (x ^ 0xFFFF_FFFF) % self.modulo;
        log::debug!(
            "MWC {} lane: degenerate state {:#x} replaced with {:#x}",
            self.name,
            x,
            inverted
        );
        inverted
    }

    pub(crate) fn is_degenerate(self, x: u32) -> bool {
        x % self.modulo == 0
    }

    pub(crate) fn jump(self, x: u32, n: i128) -> u32 {
        let steps = reduce_steps(n, self.cycle_len);
        let modulo = u64::from(self.modulo);
        let mult = pow_mod_u64(u64::from(self.mult), steps, modulo);
        mul_mod_u64(mult, u64::from(x), modulo) as u32
    }

    pub(crate) fn cycle_len(self) -> u64 {
        self.cycle_len
    }
}

/// How the two lanes are combined into one output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MwcCombine {
    /// `rotl(upper, 16) + lower`
    Rotated,
    /// `(upper << 16) + lower`
    Concatenated,
}

impl MwcCombine {
    /// Combine lane values into an output word
    #[inline]
    pub fn combine(self, upper: u32, lower: u32) -> u32 {
        match self {
            MwcCombine::Rotated => upper.rotate_left(16).wrapping_add(lower),
            MwcCombine::Concatenated => (upper << 16).wrapping_add(lower),
        }
    }
}

/// Type-level selection of the combining strategy
pub trait MwcVariant:
    Clone + Copy + fmt::Debug + Default + PartialEq + Eq + Hash + Send + Sync + 'static
{
    const COMBINE: MwcCombine;
    const NAME: &'static str;
}

/// Rotated combination (MWC2)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rotated;

/// Concatenated combination (MWC1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Concatenated;

impl MwcVariant for Rotated {
    const COMBINE: MwcCombine = MwcCombine::Rotated;
    const NAME: &'static str = "MWC2";
}

impl MwcVariant for Concatenated {
    const COMBINE: MwcCombine = MwcCombine::Concatenated;
    const NAME: &'static str = "MWC1";
}

/// Two-lane multiply-with-carry generator
///
/// # Example
/// ```
/// use simplerandom_core_rs::{Generator, Mwc1, Mwc2};
///
/// let mut mwc2 = Mwc2::new(12345, 65435);
/// let mut mwc1 = Mwc1::new(12345, 65435);
/// // same lanes, different output mapping
/// assert_eq!(mwc1.state(), mwc2.state());
/// assert_ne!(mwc1.advance(), mwc2.advance());
/// assert_eq!(mwc1.state(), mwc2.state());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]", bound = "")]
pub struct Mwc<V: MwcVariant = Rotated> {
    upper: u32,
    lower: u32,
    variant: PhantomData<V>,
}

/// MWC with rotated lane combination (preferred)
pub type Mwc2 = Mwc<Rotated>;

/// MWC with Marsaglia's original concatenated lane combination
pub type Mwc1 = Mwc<Concatenated>;

impl<V: MwcVariant> Mwc<V> {
    /// Create with explicit lane seeds, sanitized
    pub fn new(upper: u32, lower: u32) -> Self {
        let mut mwc = Self {
            upper,
            lower,
            variant: PhantomData,
        };
        mwc.sanitize();
        mwc
    }

    /// Upper lane value
    pub fn upper(&self) -> u32 {
        self.upper
    }

    /// Lower lane value
    pub fn lower(&self) -> u32 {
        self.lower
    }

    /// Overwrite the upper lane (sanitized)
    pub fn set_upper(&mut self, value: u32) {
        self.upper = UPPER_LANE.sanitize(value);
    }

    /// Overwrite the lower lane (sanitized)
    pub fn set_lower(&mut self, value: u32) {
        self.lower = LOWER_LANE.sanitize(value);
    }

    /// XOR a value into the upper lane, then step only that lane
    pub(crate) fn mix_upper(&mut self, value: u32) {
        self.upper = UPPER_LANE.step(UPPER_LANE.sanitize(self.upper ^ value));
    }

    /// XOR a value into the lower lane, then step only that lane
    pub(crate) fn mix_lower(&mut self, value: u32) {
        self.lower = LOWER_LANE.step(LOWER_LANE.sanitize(self.lower ^ value));
    }
}

impl<V: MwcVariant> Default for Mwc<V> {
    fn default() -> Self {
        Self::new(MWC_DEFAULT_SEED, MWC_DEFAULT_SEED)
    }
}

impl<V: MwcVariant> Generator for Mwc<V> {
    type State = [u32; 2];
    const NAME: &'static str = V::NAME;

    #[inline]
    fn advance(&mut self) -> u32 {
        self.upper = UPPER_LANE.step(self.upper);
        self.lower = LOWER_LANE.step(self.lower);
        self.current()
    }

    #[inline]
    fn current(&self) -> u32 {
        V::COMBINE.combine(self.upper, self.lower)
    }

    fn state(&self) -> [u32; 2] {
        [self.upper, self.lower]
    }

    fn set_state(&mut self, state: [u32; 2]) {
        self.upper = state[0];
        self.lower = state[1];
        self.sanitize();
    }
}

impl<V: MwcVariant> Seedable for Mwc<V> {
    fn from_limbs<I>(limbs: &mut I) -> Self
    where
        I: Iterator<Item = Option<u32>>,
    {
        let mut repeated = repeat_last(&mut *limbs);
        let upper = next_or_default(&mut repeated, MWC_DEFAULT_SEED);
        let lower = next_or_default(&mut repeated, MWC_DEFAULT_SEED);
        Self::new(upper, lower)
    }

    fn sanitize(&mut self) {
        self.upper = UPPER_LANE.sanitize(self.upper);
        self.lower = LOWER_LANE.sanitize(self.lower);
    }

    fn mix_limb(&mut self, value: u32) {
        if (self.current() >> 24) & 1 == 0 {
            self.mix_upper(value);
        } else {
            self.mix_lower(value);
        }
    }
}

impl<V: MwcVariant> JumpAhead for Mwc<V> {
    fn cycle_len() -> u128 {
        u128::from(UPPER_LANE.cycle_len()) * u128::from(LOWER_LANE.cycle_len())
    }

    fn jump_ahead(&mut self, n: i128) {
        log::trace!("{}: jump ahead {} steps", V::NAME, n);
        self.upper = UPPER_LANE.jump(self.upper, n);
        self.lower = LOWER_LANE.jump(self.lower, n);
    }
}

impl<V: MwcVariant> Iterator for Mwc<V> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        Some(self.advance())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<V: MwcVariant> From<[u32; 2]> for Mwc<V> {
    fn from(state: [u32; 2]) -> Self {
        Self::new(state[0], state[1])
    }
}

impl<V: MwcVariant> From<Mwc<V>> for [u32; 2] {
    fn from(mwc: Mwc<V>) -> Self {
        mwc.state()
    }
}

impl<V: MwcVariant> fmt::Display for Mwc<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", V::NAME, self.upper, self.lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_step_equals_modular_multiplication() {
        for lane in [UPPER_LANE, LOWER_LANE] {
            let mut x = lane.sanitize(0xDEAD_BEEF);
            for _ in 0..1000 {
                let expected = (u64::from(lane.mult) * u64::from(x) % u64::from(lane.modulo)) as u32;
                x = lane.step(x);
                assert_eq!(x, expected);
            }
        }
    }

    #[test]
    fn test_default_state_is_reduced_all_ones() {
        let mwc = Mwc2::default();
        assert_eq!(mwc.state(), [0xFFFF_FFFF % 0x9068_FFFF, 0xFFFF_FFFF % 0x464F_FFFF]);
        assert_eq!(mwc.state(), [1872166912, 756023298]);
    }

    #[test]
    fn test_multiple_of_modulus_is_inverted() {
        let mwc = Mwc2::new(0x9068_FFFF, 0);
        assert_eq!(mwc.upper(), (0x9068_FFFFu32 ^ 0xFFFF_FFFF) % 0x9068_FFFF);
        assert_eq!(mwc.lower(), 0xFFFF_FFFF % 0x464F_FFFF);
        assert!(!UPPER_LANE.is_degenerate(mwc.upper()));
        assert!(!LOWER_LANE.is_degenerate(mwc.lower()));
    }

    #[test]
    fn test_single_seed_is_repeated() {
        let a = Mwc2::seeded(777u32);
        let b = Mwc2::new(777, 777);
        assert_eq!(a, b);
    }

    #[test]
    fn test_combine_strategies() {
        assert_eq!(MwcCombine::Rotated.combine(0x1234_5678, 1), 0x5678_1235);
        assert_eq!(MwcCombine::Concatenated.combine(0x1234_5678, 1), 0x5678_0001);
    }

    #[test]
    fn test_display_uses_family_name() {
        assert_eq!(format!("{}", Mwc1::new(1, 2)), "MWC1(1, 2)");
        assert_eq!(format!("{}", Mwc2::new(1, 2)), "MWC2(1, 2)");
    }
}

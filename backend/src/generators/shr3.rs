//! 3-shift-register generator
//!
//! `y[n] = y[n-1](I + L^13)(I + R^17)(I + L^5)`, with `y` viewed as a binary
//! vector, `L` the 32×32 left-shift matrix and `R` its transpose. Period
//! 2^32 - 1; the state must never be zero.
//!
//! Because the step is GF(2)-linear, jump-ahead raises the one-step matrix to
//! the required power.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::{impl_generator_iterator, Generator, JumpAhead, Seedable};
use crate::bitmatrix::BitColumnMatrix;
use crate::maths::reduce_steps;
use crate::seed::next_or_default;

const SHR3_CYCLE_LEN: u64 = (1 << 32) - 1;
const SHR3_DEFAULT_SEED: u32 = 0xFFFF_FFFF;

/// One-step matrix, `(I + L^5) * (I + R^17) * (I + L^13)`
fn shr3_matrix() -> &'static BitColumnMatrix {
    static MATRIX: OnceLock<BitColumnMatrix> = OnceLock::new();
    MATRIX.get_or_init(|| {
        let unity = BitColumnMatrix::unity(32);
        let a = &unity + &BitColumnMatrix::shift(32, 13);
        let b = &unity + &BitColumnMatrix::shift(32, -17);
        let c = &unity + &BitColumnMatrix::shift(32, 5);
        &(&c * &b) * &a
    })
}

/// 3-shift-register generator
///
/// # Example
/// ```
/// use simplerandom_core_rs::{Generator, Seedable, Shr3};
///
/// // zero is a forbidden state and is replaced on seeding
/// let shr3 = Shr3::seeded(0u32);
/// assert_eq!(shr3.current(), 0xFFFF_FFFF);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 1]", into = "[u32; 1]")]
pub struct Shr3 {
    shr3: u32,
}

impl Shr3 {
    /// Create with an explicit seed, sanitized
    pub fn new(seed: u32) -> Self {
        let mut shr3 = Self { shr3: seed };
        shr3.sanitize();
        shr3
    }
}

impl Default for Shr3 {
    fn default() -> Self {
        Self::new(SHR3_DEFAULT_SEED)
    }
}

impl Generator for Shr3 {
    type State = [u32; 1];
    const NAME: &'static str = "SHR3";
    const MIN: u32 = 1;

    fn advance(&mut self) -> u32 {
        let mut y = self.shr3;
        y ^= (y & 0x7FFFF) << 13;
        y ^= y >> 17;
        y ^= (y & 0x7FF_FFFF) << 5;
        self.shr3 = y;
        y
    }

    fn current(&self) -> u32 {
        self.shr3
    }

    fn state(&self) -> [u32; 1] {
        [self.shr3]
    }

    fn set_state(&mut self, state: [u32; 1]) {
        self.shr3 = state[0];
        self.sanitize();
    }
}

impl Seedable for Shr3 {
    fn from_limbs<I>(limbs: &mut I) -> Self
    where
        I: Iterator<Item = Option<u32>>,
    {
        Self::new(next_or_default(limbs, SHR3_DEFAULT_SEED))
    }

    fn sanitize(&mut self) {
        if self.shr3 == 0 {
            log::debug!("SHR3: state 0 replaced with 0xFFFFFFFF");
            self.shr3 = 0xFFFF_FFFF;
        }
    }

    fn mix_limb(&mut self, value: u32) {
        self.shr3 ^= value;
        self.sanitize();
        self.advance();
    }
}

impl JumpAhead for Shr3 {
    fn cycle_len() -> u128 {
        u128::from(SHR3_CYCLE_LEN)
    }

    fn jump_ahead(&mut self, n: i128) {
        let steps = reduce_steps(n, SHR3_CYCLE_LEN);
        log::trace!("SHR3: jump ahead {} steps", steps);
        let matrix = shr3_matrix().pow(u128::from(steps));
        self.shr3 = matrix.mul_vector(u64::from(self.shr3)) as u32;
    }
}

impl_generator_iterator!(Shr3);

impl From<[u32; 1]> for Shr3 {
    fn from(state: [u32; 1]) -> Self {
        Self::new(state[0])
    }
}

impl From<Shr3> for [u32; 1] {
    fn from(shr3: Shr3) -> Self {
        shr3.state()
    }
}

impl fmt::Display for Shr3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHR3({})", self.shr3)
    }
}

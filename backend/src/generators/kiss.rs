//! KISS composite generators
//!
//! "Keep It Simple Stupid": an MWC, a congruential and a 3-shift-register
//! generator stepped in lock-step and combined.
//!
//! - **KISS**: MWC2 + Cong + SHR3, output `(mwc ^ cong) + shr3`, period
//!   about 2^123. Based on, but not identical to, Marsaglia's 1999 KISS (see
//!   [`Kiss1999`](super::Kiss1999) for that one).
//! - **KISS2**: MWC64 + Cong + SHR3, output `mwc + cong + shr3`, period about
//!   2^124. Marsaglia's 2007 recommendation.
//!
//! The constituents are plain fields, reachable through forwarding
//! accessors. Setters re-sanitize, so a composite can never hold a
//! degenerate constituent.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{impl_generator_iterator, Cong, Generator, JumpAhead, Mwc2, Mwc64, Seedable, Shr3};
use crate::seed::repeat_last;

/// Seed the three constituents in order from one shared repeat-last stream
fn seed_constituents<M, I>(limbs: &mut I) -> (M, Cong, Shr3)
where
    M: Seedable,
    I: Iterator<Item = Option<u32>>,
{
    let mut repeated = repeat_last(&mut *limbs);
    let mwc = M::from_limbs(&mut repeated);
    let cong = Cong::from_limbs(&mut repeated);
    let shr3 = Shr3::from_limbs(&mut repeated);
    (mwc, cong, shr3)
}

// ============================================================================
// KISS
// ============================================================================

/// MWC2 + Cong + SHR3 composite
///
/// # Example
/// ```
/// use simplerandom_core_rs::{Generator, Kiss, Seedable};
///
/// let mut kiss = Kiss::seeded((2247183469u32, 99545079u32, 3269400377u32, 3950144837u32));
/// let first = kiss.advance();
/// assert_eq!(kiss.current(), first);
/// assert_eq!(kiss.state()[2], kiss.cong().current());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct Kiss {
    mwc: Mwc2,
    cong: Cong,
    shr3: Shr3,
}

impl Kiss {
    /// Create from explicit constituent seeds
    pub fn new(mwc_upper: u32, mwc_lower: u32, cong: u32, shr3: u32) -> Self {
        Self {
            mwc: Mwc2::new(mwc_upper, mwc_lower),
            cong: Cong::new(cong),
            shr3: Shr3::new(shr3),
        }
    }

    /// The multiply-with-carry component
    pub fn mwc(&self) -> &Mwc2 {
        &self.mwc
    }

    /// The congruential component
    pub fn cong(&self) -> &Cong {
        &self.cong
    }

    /// The SHR3 component
    pub fn shr3(&self) -> &Shr3 {
        &self.shr3
    }

    /// Upper word of the MWC component
    pub fn mwc_upper(&self) -> u32 {
        self.mwc.upper()
    }

    /// Lower word of the MWC component
    pub fn mwc_lower(&self) -> u32 {
        self.mwc.lower()
    }

    /// Overwrite the MWC upper word, re-sanitizing the component
    pub fn set_mwc_upper(&mut self, value: u32) {
        self.mwc.set_upper(value);
    }

    /// Overwrite the MWC lower word, re-sanitizing the component
    pub fn set_mwc_lower(&mut self, value: u32) {
        self.mwc.set_lower(value);
    }

    /// Overwrite the congruential state (any value is valid)
    pub fn set_cong(&mut self, value: u32) {
        self.cong.set_state([value]);
    }

    /// Overwrite the SHR3 state, re-sanitizing it (zero becomes `0xFFFFFFFF`)
    pub fn set_shr3(&mut self, value: u32) {
        self.shr3.set_state([value]);
    }
}

impl Default for Kiss {
    fn default() -> Self {
        Self {
            mwc: Mwc2::default(),
            cong: Cong::default(),
            shr3: Shr3::default(),
        }
    }
}

impl Generator for Kiss {
    type State = [u32; 4];
    const NAME: &'static str = "KISS";

    fn advance(&mut self) -> u32 {
        let mwc = self.mwc.advance();
        let cong = self.cong.advance();
        let shr3 = self.shr3.advance();
        (mwc ^ cong).wrapping_add(shr3)
    }

    fn current(&self) -> u32 {
        (self.mwc.current() ^ self.cong.current()).wrapping_add(self.shr3.current())
    }

    fn state(&self) -> [u32; 4] {
        let [upper, lower] = self.mwc.state();
        [upper, lower, self.cong.current(), self.shr3.current()]
    }

    fn set_state(&mut self, state: [u32; 4]) {
        *self = Self::new(state[0], state[1], state[2], state[3]);
    }
}

impl Seedable for Kiss {
    fn from_limbs<I>(limbs: &mut I) -> Self
    where
        I: Iterator<Item = Option<u32>>,
    {
        let (mwc, cong, shr3) = seed_constituents(limbs);
        Self { mwc, cong, shr3 }
    }

    fn sanitize(&mut self) {
        self.mwc.sanitize();
        self.shr3.sanitize();
    }

    fn mix_limb(&mut self, value: u32) {
        match (self.current() >> 24) & 3 {
            0 => self.mwc.mix_upper(value),
            1 => self.mwc.mix_lower(value),
            2 => self.cong.mix_limb(value),
            _ => self.shr3.mix_limb(value),
        }
    }
}

impl JumpAhead for Kiss {
    fn cycle_len() -> u128 {
        Mwc2::cycle_len() * Cong::cycle_len() * Shr3::cycle_len()
    }

    fn jump_ahead(&mut self, n: i128) {
        self.mwc.jump_ahead(n);
        self.cong.jump_ahead(n);
        self.shr3.jump_ahead(n);
    }
}

// ============================================================================
// KISS2
// ============================================================================

/// MWC64 + Cong + SHR3 composite
///
/// # Example
/// ```
/// use simplerandom_core_rs::{Generator, Kiss2};
///
/// let kiss2 = Kiss2::default();
/// assert_eq!(kiss2.state(), [102352882, 5, 0, 0xFFFF_FFFF]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct Kiss2 {
    mwc: Mwc64,
    cong: Cong,
    shr3: Shr3,
}

impl Kiss2 {
    /// Create from explicit constituent seeds
    pub fn new(mwc_upper: u32, mwc_lower: u32, cong: u32, shr3: u32) -> Self {
        Self {
            mwc: Mwc64::new(mwc_upper, mwc_lower),
            cong: Cong::new(cong),
            shr3: Shr3::new(shr3),
        }
    }

    /// The multiply-with-carry component
    pub fn mwc(&self) -> &Mwc64 {
        &self.mwc
    }

    /// The congruential component
    pub fn cong(&self) -> &Cong {
        &self.cong
    }

    /// The SHR3 component
    pub fn shr3(&self) -> &Shr3 {
        &self.shr3
    }

    /// Upper word of the MWC component
    pub fn mwc_upper(&self) -> u32 {
        self.mwc.upper()
    }

    /// Lower word of the MWC component
    pub fn mwc_lower(&self) -> u32 {
        self.mwc.lower()
    }

    /// Overwrite the MWC upper word, re-sanitizing the component
    pub fn set_mwc_upper(&mut self, value: u32) {
        self.mwc.set_upper(value);
    }

    /// Overwrite the MWC lower word, re-sanitizing the component
    pub fn set_mwc_lower(&mut self, value: u32) {
        self.mwc.set_lower(value);
    }

    /// Overwrite the congruential state (any value is valid)
    pub fn set_cong(&mut self, value: u32) {
        self.cong.set_state([value]);
    }

    /// Overwrite the SHR3 state, re-sanitizing it (zero becomes `0xFFFFFFFF`)
    pub fn set_shr3(&mut self, value: u32) {
        self.shr3.set_state([value]);
    }
}

impl Default for Kiss2 {
    fn default() -> Self {
        Self {
            mwc: Mwc64::default(),
            cong: Cong::default(),
            shr3: Shr3::default(),
        }
    }
}

impl Generator for Kiss2 {
    type State = [u32; 4];
    const NAME: &'static str = "KISS2";

    fn advance(&mut self) -> u32 {
        let mwc = self.mwc.advance();
        let cong = self.cong.advance();
        let shr3 = self.shr3.advance();
        mwc.wrapping_add(cong).wrapping_add(shr3)
    }

    fn current(&self) -> u32 {
        self.mwc
            .current()
            .wrapping_add(self.cong.current())
            .wrapping_add(self.shr3.current())
    }

    fn state(&self) -> [u32; 4] {
        let [upper, lower] = self.mwc.state();
        [upper, lower, self.cong.current(), self.shr3.current()]
    }

    fn set_state(&mut self, state: [u32; 4]) {
        *self = Self::new(state[0], state[1], state[2], state[3]);
    }
}

impl Seedable for Kiss2 {
    fn from_limbs<I>(limbs: &mut I) -> Self
    where
        I: Iterator<Item = Option<u32>>,
    {
        let (mwc, cong, shr3) = seed_constituents(limbs);
        Self { mwc, cong, shr3 }
    }

    fn sanitize(&mut self) {
        self.mwc.sanitize();
        self.shr3.sanitize();
    }

    fn mix_limb(&mut self, value: u32) {
        match (self.current() >> 24) & 3 {
            0 => {
                self.mwc.set_upper(self.mwc.upper() ^ value);
                self.mwc.advance();
            }
            1 => {
                self.mwc.set_lower(self.mwc.lower() ^ value);
                self.mwc.advance();
            }
            2 => self.cong.mix_limb(value),
            _ => self.shr3.mix_limb(value),
        }
    }
}

impl JumpAhead for Kiss2 {
    fn cycle_len() -> u128 {
        Mwc64::cycle_len() * Cong::cycle_len() * Shr3::cycle_len()
    }

    fn jump_ahead(&mut self, n: i128) {
        self.mwc.jump_ahead(n);
        self.cong.jump_ahead(n);
        self.shr3.jump_ahead(n);
    }
}

impl_generator_iterator!(Kiss, Kiss2);

macro_rules! impl_kiss_conversions {
    ($($ty:ident => $display:literal),+ $(,)?) => {
        $(
            impl From<[u32; 4]> for $ty {
                fn from(state: [u32; 4]) -> Self {
                    Self::new(state[0], state[1], state[2], state[3])
                }
            }

            impl From<$ty> for [u32; 4] {
                fn from(kiss: $ty) -> Self {
                    kiss.state()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let [upper, lower, cong, shr3] = self.state();
                    write!(f, "{}({}, {}, {}, {})", $display, upper, lower, cong, shr3)
                }
            }
        )+
    };
}

impl_kiss_conversions!(Kiss => "KISS", Kiss2 => "KISS2");

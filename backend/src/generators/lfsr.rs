//! Combined Tausworthe (LFSR) generators by L'Ecuyer
//!
//! - **LFSR113**: four lanes, period about 2^113
//!   ("Tables of Maximally-Equidistributed Combined LFSR Generators", 1999)
//! - **LFSR88**: three lanes, period about 2^88
//!   ("Maximally Equidistributed Combined Tausworthe Generators", 1996)
//!
//! Each lane steps as
//!
//! ```text
//! b  = ((z << s1) ^ z) >> s2
//! z' = ((z & mask) << s3) ^ b
//! ```
//!
//! and the output is the XOR of all lanes. A lane discards its lowest
//! `min_bits` bits when stepping, so those bits must not be the only ones set.
//!
//! # Critical Invariants
//!
//! 1. Every lane satisfies `z >= 2^min_bits`
//! 2. State snapshots store `z ^ (z << 16)`; restoring one re-runs the seed
//!    spreading, which inverts that transform exactly

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::{impl_generator_iterator, Generator, JumpAhead, Seedable};
use crate::bitmatrix::BitColumnMatrix;
use crate::maths::reduce_steps;
use crate::seed::repeat_last;

/// Parameters of one Tausworthe lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LfsrLane {
    s1: i32,
    s2: i32,
    s3: i32,
    min_bits: u32,
}

impl LfsrLane {
    const fn new(s1: i32, s2: i32, s3: i32, min_bits: u32) -> Self {
        Self {
            s1,
            s2,
            s3,
            min_bits,
        }
    }

    /// Significant bits that survive the `<< s3`
    const fn mask(self) -> u32 {
        (u32::MAX << self.min_bits) & (u32::MAX >> self.s3)
    }

    const fn min_value(self) -> u32 {
        1 << self.min_bits
    }

    fn cycle_len(self) -> u64 {
        (1u64 << (32 - self.min_bits)) - 1
    }

    #[inline]
    fn step(self, z: u32) -> u32 {
        let b = ((z << self.s1) ^ z) >> self.s2;
        ((z & self.mask()) << self.s3) ^ b
    }

    /// Turn a seed value into an initial lane state
    ///
    /// Every input bit influences the result, so seeds differing only in
    /// their low bits (timer values, counters) still give distinct lanes.
    fn spread(self, seed: Option<u32>) -> u32 {
        let Some(seed) = seed else {
            return 0xFFFF_FFFF;
        };
        let mut working = seed ^ (seed << 16);
        if working < self.min_value() {
            working = seed << 24;
            if working < self.min_value() {
                working ^= 0xFFFF_FFFF;
            }
        }
        working
    }

    fn validate(self, z: u32) -> u32 {
        if z < self.min_value() {
            log::debug!(
                "LFSR lane: state {:#x} below 2^{}, inverted",
                z,
                self.min_bits
            );
            z ^ 0xFFFF_FFFF
        } else {
            z
        }
    }

    /// One-step matrix `D*C + B*A`
    fn matrix(self) -> BitColumnMatrix {
        let a = &BitColumnMatrix::unity(32) + &BitColumnMatrix::shift(32, self.s1);
        let b = BitColumnMatrix::shift(32, -self.s2);
        let c = BitColumnMatrix::mask(32, self.min_bits as usize, 32);
        let d = BitColumnMatrix::shift(32, self.s3);
        &(&d * &c) + &(&b * &a)
    }
}

/// Snapshot encoding of a lane
fn state_word(z: u32) -> u32 {
    z ^ (z << 16)
}

const LFSR113_LANES: [LfsrLane; 4] = [
    LfsrLane::new(6, 13, 18, 1),
    LfsrLane::new(2, 27, 2, 3),
    LfsrLane::new(13, 21, 7, 4),
    LfsrLane::new(3, 12, 13, 7),
];

const LFSR88_LANES: [LfsrLane; 3] = [
    LfsrLane::new(13, 19, 12, 1),
    LfsrLane::new(2, 25, 4, 3),
    LfsrLane::new(3, 11, 17, 4),
];

fn lfsr113_selector(current: u32) -> usize {
    ((current >> 30) & 3) as usize
}

fn lfsr88_selector(current: u32) -> usize {
    // thirds of the output range
    if current < 1_431_655_765 {
        0
    } else if current < 2_863_311_531 {
        1
    } else {
        2
    }
}

macro_rules! combined_lfsr {
    (
        $(#[$meta:meta])*
        $name:ident, $display:literal, $lanes:ident, $n:literal, $state_ty:literal, $selector:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = $state_ty, into = $state_ty)]
        pub struct $name {
            z: [u32; $n],
        }

        impl $name {
            fn matrices() -> &'static [BitColumnMatrix; $n] {
                static MATRICES: OnceLock<[BitColumnMatrix; $n]> = OnceLock::new();
                MATRICES.get_or_init(|| $lanes.map(LfsrLane::matrix))
            }

            /// Create from per-lane seed values, spread and validated
            pub fn new(seeds: [u32; $n]) -> Self {
                let mut z = [0; $n];
                for (i, lane) in $lanes.iter().enumerate() {
                    z[i] = lane.spread(Some(seeds[i]));
                }
                Self { z }
            }

            /// Raw lane values (not the snapshot encoding)
            pub fn lanes(&self) -> [u32; $n] {
                self.z
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self { z: [0xFFFF_FFFF; $n] }
            }
        }

        impl Generator for $name {
            type State = [u32; $n];
            const NAME: &'static str = $display;

            fn advance(&mut self) -> u32 {
                for (z, lane) in self.z.iter_mut().zip($lanes.iter()) {
                    *z = lane.step(*z);
                }
                self.current()
            }

            fn current(&self) -> u32 {
                self.z.iter().fold(0, |acc, z| acc ^ z)
            }

            fn state(&self) -> [u32; $n] {
                self.z.map(state_word)
            }

            fn set_state(&mut self, state: [u32; $n]) {
                *self = Self::new(state);
            }
        }

        impl Seedable for $name {
            fn from_limbs<I>(limbs: &mut I) -> Self
            where
                I: Iterator<Item = Option<u32>>,
            {
                let mut repeated = repeat_last(&mut *limbs);
                let mut z = [0; $n];
                for (i, lane) in $lanes.iter().enumerate() {
                    z[i] = lane.spread(repeated.next().flatten());
                }
                Self { z }
            }

            fn sanitize(&mut self) {
                for (z, lane) in self.z.iter_mut().zip($lanes.iter()) {
                    *z = lane.validate(*z);
                }
            }

            fn mix_limb(&mut self, value: u32) {
                let i = $selector(self.current());
                let lane = $lanes[i];
                self.z[i] = lane.step(lane.validate(self.z[i] ^ value));
            }
        }

        impl JumpAhead for $name {
            fn cycle_len() -> u128 {
                $lanes
                    .iter()
                    .map(|lane| u128::from(lane.cycle_len()))
                    .product()
            }

            fn jump_ahead(&mut self, n: i128) {
                log::trace!("{}: jump ahead {} steps", $display, n);
                for (i, lane) in $lanes.iter().enumerate() {
                    let steps = reduce_steps(n, lane.cycle_len());
                    let matrix = Self::matrices()[i].pow(u128::from(steps));
                    self.z[i] = matrix.mul_vector(u64::from(self.z[i])) as u32;
                }
            }
        }

        impl_generator_iterator!($name);

        impl From<[u32; $n]> for $name {
            fn from(state: [u32; $n]) -> Self {
                Self::new(state)
            }
        }

        impl From<$name> for [u32; $n] {
            fn from(lfsr: $name) -> Self {
                lfsr.state()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(", $display)?;
                for (i, word) in self.state().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", word)?;
                }
                write!(f, ")")
            }
        }
    };
}

combined_lfsr!(
    /// Four-lane combined LFSR, period about 2^113
    ///
    /// # Example
    /// ```
    /// use simplerandom_core_rs::{Generator, Lfsr113};
    ///
    /// let lfsr = Lfsr113::default();
    /// assert_eq!(lfsr.state(), [65535; 4]);
    /// ```
    Lfsr113, "LFSR113", LFSR113_LANES, 4, "[u32; 4]", lfsr113_selector
);

combined_lfsr!(
    /// Three-lane combined LFSR, period about 2^88
    Lfsr88, "LFSR88", LFSR88_LANES, 3, "[u32; 3]", lfsr88_selector
);

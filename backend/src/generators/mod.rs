//! Generator families and their shared contract
//!
//! Every generator is a small sequential state machine producing `u32`
//! outputs. The traits here split the contract in three:
//!
//! - [`Generator`]: stepping, the last output, and the state snapshot
//! - [`Seedable`]: construction from a [`Seed`], sanitization and mixing
//! - [`JumpAhead`]: O(log n) fast-forward, for the GF(2)-linear and
//!   multiplicative families
//!
//! # Critical Invariants
//!
//! 1. Same seed → same output sequence, bit for bit
//! 2. `set_state(state())` never changes the continuation
//! 3. No generator ever sits in a forbidden (degenerate) state

pub mod cong;
pub mod kiss;
pub mod legacy;
pub mod lfib;
pub mod lfsr;
pub mod mwc;
pub mod mwc64;
pub mod shr3;

pub use cong::Cong;
pub use kiss::{Kiss, Kiss2};
pub use legacy::Kiss1999;
pub use lfib::{LfibTable, Lfib4, Swb, SwbState, TABLE_LEN};
pub use lfsr::{Lfsr113, Lfsr88};
pub use mwc::{Concatenated, Mwc, Mwc1, Mwc2, MwcCombine, MwcVariant, Rotated};
pub use mwc64::Mwc64;
pub use shr3::Shr3;

use crate::seed::{flatten, Seed};

/// Largest value any generator outputs
pub const SIMPLERANDOM_MAX: u32 = u32::MAX;

/// A deterministic 32-bit generator
///
/// Generators are also infinite iterators: `next()` always returns
/// `Some(self.advance())`.
pub trait Generator: Iterator<Item = u32> {
    /// Snapshot of the internal state, exchanged by `state`/`set_state`
    type State: Clone + PartialEq + std::fmt::Debug;

    /// Display name of the family
    const NAME: &'static str;

    /// Smallest possible output
    const MIN: u32 = 0;

    /// Largest possible output
    const MAX: u32 = SIMPLERANDOM_MAX;

    /// Step the generator and return the new output
    fn advance(&mut self) -> u32;

    /// The most recent output, without stepping
    fn current(&self) -> u32;

    /// Snapshot of the full internal state
    fn state(&self) -> Self::State;

    /// Restore a snapshot, sanitizing it on the way in
    fn set_state(&mut self, state: Self::State);
}

/// Generators built from the generic seeding protocol
pub trait Seedable: Generator + Sized {
    /// Take the limbs this family needs from the front of `limbs`
    ///
    /// Must leave any further limbs in the stream for mixing.
    fn from_limbs<I>(limbs: &mut I) -> Self
    where
        I: Iterator<Item = Option<u32>>;

    /// Replace any forbidden state with a valid one
    fn sanitize(&mut self);

    /// Fold one 32-bit value into the state
    fn mix_limb(&mut self, value: u32);

    /// Build from a seed, ignoring limbs beyond the family's arity
    ///
    /// # Example
    /// ```
    /// use simplerandom_core_rs::{Cong, Generator, Seedable};
    ///
    /// let mut a = Cong::seeded(2051391225u32);
    /// let mut b = Cong::seeded((2051391225u32, 99u32));
    /// assert_eq!(a.advance(), b.advance());
    /// ```
    fn seeded<S: Into<Seed>>(seed: S) -> Self {
        Self::seeded_with(seed, false)
    }

    /// Build from a seed, mixing limbs beyond the family's arity into the state
    fn seeded_mixed<S: Into<Seed>>(seed: S) -> Self {
        Self::seeded_with(seed, true)
    }

    /// Build from a seed, optionally mixing the extra limbs
    fn seeded_with<S: Into<Seed>>(seed: S, mix_extras: bool) -> Self {
        let seed = seed.into();
        let mut limbs = flatten(&seed);
        let mut generator = Self::from_limbs(&mut limbs);
        if mix_extras {
            for value in limbs.flatten() {
                generator.mix_limb(value);
            }
        } else if log::log_enabled!(log::Level::Debug) {
            let ignored = limbs.count();
            if ignored > 0 {
                log::debug!("{}: ignoring {} extra seed limbs", Self::NAME, ignored);
            }
        }
        generator
    }

    /// Re-initialise from a seed, discarding the current state
    fn reseed<S: Into<Seed>>(&mut self, seed: S, mix_extras: bool) {
        *self = Self::seeded_with(seed, mix_extras);
    }

    /// Fold extra seed material into the already-seeded state
    ///
    /// Each limb perturbs one state field chosen from the current output, so
    /// every extra fragment changes the future sequence. Absent markers are
    /// skipped. Returns the current output afterwards.
    ///
    /// # Example
    /// ```
    /// use simplerandom_core_rs::{Generator, Seedable, Shr3};
    ///
    /// let mut plain = Shr3::seeded(1u32);
    /// let mut mixed = Shr3::seeded(1u32);
    /// mixed.mix([0xC0FFEEu32]);
    /// assert_ne!(plain.advance(), mixed.advance());
    /// ```
    fn mix<I>(&mut self, extras: I) -> u32
    where
        I: IntoIterator,
        I::Item: Into<Seed>,
    {
        for extra in extras {
            let extra = extra.into();
            for value in flatten(&extra).flatten() {
                self.mix_limb(value);
            }
        }
        self.current()
    }
}

/// Fast-forward support
pub trait JumpAhead {
    /// Number of steps after which the state returns to itself
    fn cycle_len() -> u128;

    /// Advance the state by `n` steps (negative `n` steps backwards)
    ///
    /// Equivalent to calling `advance` `n mod cycle_len()` times, in
    /// O(log n) work.
    fn jump_ahead(&mut self, n: i128);
}

/// Implement `Iterator` by stepping the generator forever
macro_rules! impl_generator_iterator {
    ($($ty:ty),+ $(,)?) => {
        $(impl Iterator for $ty {
            type Item = u32;

            fn next(&mut self) -> Option<u32> {
                Some($crate::generators::Generator::advance(self))
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                (usize::MAX, None)
            }
        })+
    };
}

pub(crate) use impl_generator_iterator;

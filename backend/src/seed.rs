//! Seed fragments and the seeding protocol
//!
//! Callers hand generators a [`Seed`]: a tree of integers of any width up to
//! 128 bits, "absent" markers and nested sequences. Generators never see the
//! tree. They pull 32-bit limbs from a flattened stream, one per state field,
//! falling back to a per-field default when the stream runs dry.
//!
//! # Flattening rules
//!
//! - Sequences are walked depth-first, lazily.
//! - Each integer produces its 32-bit limbs least-significant first. A
//!   negative integer behaves like two's complement with infinitely many
//!   leading ones, so it stops once the remaining value is `0` or `-1`. Every
//!   integer yields at least one limb.
//! - `Seed::Absent` yields `None`, which selects the field default.
//!
//! # Example
//! ```
//! use simplerandom_core_rs::{seed, Seed};
//! use simplerandom_core_rs::seed::flatten;
//!
//! let s = seed![1u32, 0x1_0000_0002u64, -1i32, None::<u32>, vec![7u8, 8u8]];
//! let limbs: Vec<Option<u32>> = flatten(&s).collect();
//! assert_eq!(
//!     limbs,
//!     vec![Some(1), Some(2), Some(1), Some(0xFFFF_FFFF), None, Some(7), Some(8)]
//! );
//! ```

use std::slice;

use crate::error::RngError;

/// One seed fragment, possibly nested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    /// Signed integer, split into limbs two's-complement style
    Int(i128),
    /// Unsigned integer, split into limbs until the remainder is zero
    Uint(u128),
    /// Explicit "use the default for this field"
    Absent,
    /// Nested fragments, flattened depth-first
    Seq(Vec<Seed>),
}

impl Default for Seed {
    fn default() -> Self {
        Seed::Seq(Vec::new())
    }
}

impl Seed {
    /// No seed at all: every field takes its default
    pub fn none() -> Self {
        Seed::Seq(Vec::new())
    }

    /// Parse a decimal integer, for seeds wider than 64 bits in text formats
    ///
    /// # Errors
    /// Returns `RngError::InvalidSeed` if the text is not a decimal integer
    /// that fits in 128 bits.
    pub fn parse_decimal(text: &str) -> Result<Self, RngError> {
        let trimmed = text.trim();
        if let Ok(value) = trimmed.parse::<u128>() {
            return Ok(Seed::Uint(value));
        }
        trimmed
            .parse::<i128>()
            .map(Seed::Int)
            .map_err(|_| RngError::InvalidSeed(text.to_string()))
    }
}

macro_rules! seed_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Seed {
            fn from(value: $t) -> Self {
                Seed::Uint(value as u128)
            }
        })*
    };
}

macro_rules! seed_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Seed {
            fn from(value: $t) -> Self {
                Seed::Int(value as i128)
            }
        })*
    };
}

seed_from_unsigned!(u8, u16, u32, u64, u128, usize);
seed_from_signed!(i8, i16, i32, i64, i128, isize);

impl<T: Into<Seed>> From<Option<T>> for Seed {
    fn from(value: Option<T>) -> Self {
        value.map_or(Seed::Absent, Into::into)
    }
}

impl<T: Into<Seed>> From<Vec<T>> for Seed {
    fn from(values: Vec<T>) -> Self {
        Seed::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Seed>> From<&[T]> for Seed {
    fn from(values: &[T]) -> Self {
        Seed::Seq(values.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Seed>, const N: usize> From<[T; N]> for Seed {
    fn from(values: [T; N]) -> Self {
        Seed::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl From<()> for Seed {
    fn from(_: ()) -> Self {
        Seed::none()
    }
}

impl From<&Seed> for Seed {
    fn from(seed: &Seed) -> Self {
        seed.clone()
    }
}

macro_rules! seed_from_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<Seed>),+> From<($($name,)+)> for Seed {
            #[allow(non_snake_case)]
            fn from(($($name,)+): ($($name,)+)) -> Self {
                Seed::Seq(vec![$($name.into()),+])
            }
        }
    };
}

seed_from_tuple!(A);
seed_from_tuple!(A, B);
seed_from_tuple!(A, B, C);
seed_from_tuple!(A, B, C, D);
seed_from_tuple!(A, B, C, D, E);

/// Build a [`Seed`] sequence from heterogeneous fragments
///
/// # Example
/// ```
/// use simplerandom_core_rs::{seed, Seed};
///
/// let s = seed![12345u32, -1i64, vec![1u8, 2u8]];
/// assert!(matches!(s, Seed::Seq(ref items) if items.len() == 3));
/// assert_eq!(seed![], Seed::none());
/// ```
#[macro_export]
macro_rules! seed {
    () => {
        $crate::Seed::Seq(::std::vec::Vec::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Seed::Seq(::std::vec![$($crate::Seed::from($item)),+])
    };
}

// ============================================================================
// Flattening
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum PendingLimbs {
    Signed(i128),
    Unsigned(u128),
}

impl PendingLimbs {
    /// Split off the lowest limb, returning what remains to be emitted
    fn split(self) -> (u32, Option<PendingLimbs>) {
        match self {
            PendingLimbs::Signed(value) => {
                let rest = value >> 32;
                let rest = if rest == 0 || rest == -1 {
                    None
                } else {
                    Some(PendingLimbs::Signed(rest))
                };
                (value as u32, rest)
            }
            PendingLimbs::Unsigned(value) => {
                let rest = value >> 32;
                let rest = if rest == 0 {
                    None
                } else {
                    Some(PendingLimbs::Unsigned(rest))
                };
                (value as u32, rest)
            }
        }
    }
}

/// Lazy depth-first stream of 32-bit limbs from a [`Seed`] tree
///
/// Yields `Some(limb)` for integer limbs and `None` for absent markers.
#[derive(Debug, Clone)]
pub struct Limbs<'a> {
    stack: Vec<slice::Iter<'a, Seed>>,
    pending: Option<PendingLimbs>,
}

impl<'a> Iterator for Limbs<'a> {
    type Item = Option<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pending) = self.pending.take() {
                let (limb, rest) = pending.split();
                self.pending = rest;
                return Some(Some(limb));
            }

            let item = loop {
                let top = self.stack.last_mut()?;
                match top.next() {
                    Some(item) => break item,
                    None => {
                        self.stack.pop();
                    }
                }
            };

            match item {
                Seed::Int(value) => self.pending = Some(PendingLimbs::Signed(*value)),
                Seed::Uint(value) => self.pending = Some(PendingLimbs::Unsigned(*value)),
                Seed::Absent => return Some(None),
                Seed::Seq(items) => self.stack.push(items.iter()),
            }
        }
    }
}

/// Flatten a seed tree into its limb stream
pub fn flatten(seed: &Seed) -> Limbs<'_> {
    Limbs {
        stack: vec![slice::from_ref(seed).iter()],
        pending: None,
    }
}

/// Pull one limb, or `default` if the stream is exhausted or the limb is absent
///
/// # Example
/// ```
/// use simplerandom_core_rs::seed::next_or_default;
///
/// let mut stream = vec![Some(5u32), None].into_iter();
/// assert_eq!(next_or_default(&mut stream, 9), 5);
/// assert_eq!(next_or_default(&mut stream, 9), 9);
/// assert_eq!(next_or_default(&mut stream, 9), 9);
/// ```
pub fn next_or_default<I>(stream: &mut I, default: u32) -> u32
where
    I: Iterator<Item = Option<u32>>,
{
    stream.next().flatten().unwrap_or(default)
}

/// Iterator adapter that repeats the last item forever once `inner` ends
///
/// Seeding a multi-field generator with a single value then sets every field
/// from that value rather than from the fixed defaults, so two generators
/// given different short seeds differ in all fields.
pub struct RepeatLast<I: Iterator> {
    inner: I,
    last: Option<I::Item>,
    exhausted: bool,
}

impl<I> Iterator for RepeatLast<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if !self.exhausted {
            match self.inner.next() {
                Some(item) => {
                    self.last = Some(item.clone());
                    return Some(item);
                }
                None => self.exhausted = true,
            }
        }
        self.last.clone()
    }
}

/// Wrap `inner` so that its final item repeats indefinitely
///
/// An empty stream stays empty.
///
/// # Example
/// ```
/// use simplerandom_core_rs::seed::repeat_last;
///
/// let taken: Vec<u32> = repeat_last(vec![1u32, 2].into_iter()).take(4).collect();
/// assert_eq!(taken, vec![1, 2, 2, 2]);
/// assert_eq!(repeat_last(Vec::<u32>::new().into_iter()).next(), None);
/// ```
pub fn repeat_last<I: Iterator>(inner: I) -> RepeatLast<I> {
    RepeatLast {
        inner,
        last: None,
        exhausted: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limbs(seed: &Seed) -> Vec<Option<u32>> {
        flatten(seed).collect()
    }

    #[test]
    fn test_zero_and_minus_one_yield_one_limb() {
        assert_eq!(limbs(&Seed::from(0u32)), vec![Some(0)]);
        assert_eq!(limbs(&Seed::from(0i32)), vec![Some(0)]);
        assert_eq!(limbs(&Seed::from(-1i64)), vec![Some(0xFFFF_FFFF)]);
    }

    #[test]
    fn test_negative_wide_value() {
        // -2^32 is ...FFFF_FFFF_0000_0000: the remainder after one limb is -1
        assert_eq!(limbs(&Seed::from(-(1i64 << 32))), vec![Some(0)]);
        // -2^32 - 1 stops after the second limb because the remainder is -1
        assert_eq!(
            limbs(&Seed::from(-(1i64 << 32) - 1)),
            vec![Some(0xFFFF_FFFF), Some(0xFFFF_FFFE)]
        );
    }

    #[test]
    fn test_u128_limbs() {
        let value: u128 = (3u128 << 96) | (2u128 << 64) | 1;
        assert_eq!(
            limbs(&Seed::from(value)),
            vec![Some(1), Some(0), Some(2), Some(3)]
        );
    }

    #[test]
    fn test_deep_nesting() {
        let s = Seed::Seq(vec![
            Seed::Seq(vec![Seed::Seq(vec![Seed::from(1u8)]), Seed::Seq(vec![])]),
            Seed::Absent,
            Seed::from(vec![2u16, 3u16]),
        ]);
        assert_eq!(limbs(&s), vec![Some(1), None, Some(2), Some(3)]);
    }

    #[test]
    fn test_empty_seed() {
        assert!(limbs(&Seed::none()).is_empty());
        assert!(limbs(&Seed::default()).is_empty());
        assert!(limbs(&Seed::from(())).is_empty());
    }

    #[test]
    fn test_tuple_and_array_conversions() {
        assert_eq!(
            limbs(&Seed::from((1u32, -1i8, Some(4u64)))),
            vec![Some(1), Some(0xFFFF_FFFF), Some(4)]
        );
        assert_eq!(limbs(&Seed::from([5u32, 6, 7])), vec![Some(5), Some(6), Some(7)]);
        let slice: &[u32] = &[8, 9];
        assert_eq!(limbs(&Seed::from(slice)), vec![Some(8), Some(9)]);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(
            Seed::parse_decimal("340282366920938463463374607431768211455"),
            Ok(Seed::Uint(u128::MAX))
        );
        assert_eq!(Seed::parse_decimal("-5"), Ok(Seed::Int(-5)));
        assert!(matches!(
            Seed::parse_decimal("0x10"),
            Err(RngError::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_repeat_last_repeats_absent_marker() {
        let mut stream = repeat_last(vec![Some(1u32), None].into_iter());
        assert_eq!(next_or_default(&mut stream, 7), 1);
        assert_eq!(next_or_default(&mut stream, 7), 7);
        assert_eq!(next_or_default(&mut stream, 7), 7);
    }

    #[test]
    fn test_repeat_last_leaves_rest_of_stream_for_caller() {
        let s = seed![1u32, 2u32, 3u32];
        let mut stream = flatten(&s);
        {
            let mut repeated = repeat_last(stream.by_ref());
            assert_eq!(next_or_default(&mut repeated, 0), 1);
        }
        assert_eq!(stream.collect::<Vec<_>>(), vec![Some(2), Some(3)]);
    }
}

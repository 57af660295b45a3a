//! Lagged-Fibonacci generators over a 256-word ring buffer (LFIB4, SWB)
//!
//! - **LFIB4**: `x[n] = x[n-256] + x[n-179] + x[n-119] + x[n-55] mod 2^32`,
//!   period 2^31 * (2^256 - 1)
//! - **SWB**: subtract-with-borrow, `x[n] = x[n-222] - x[n-237] - borrow
//!   mod 2^32`, period about 2^7578
//!
//! Both need a full 256-word table as seed. Without one, the table is
//! bootstrapped from the first 256 outputs of
//! `Kiss1999(12345, 65435, 34221, 12345)`, reproducing the published
//! reference sequences.
//!
//! # Critical Invariants
//!
//! 1. The table always holds exactly [`TABLE_LEN`] words
//! 2. State snapshots are rotated so that index 0 is the slot under the
//!    cursor; restoring a snapshot resets the cursor to 0 without changing
//!    the continuation
//!
//! Neither recurrence is a fixed-size linear map on a small state, so there
//! is no jump-ahead.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{impl_generator_iterator, Generator, Kiss1999};
use crate::error::RngError;
use crate::seed::{flatten, Seed};

/// Number of words in a lagged-Fibonacci table
pub const TABLE_LEN: usize = 256;

const BOOTSTRAP_SEEDS: [u32; 4] = [12345, 65435, 34221, 12345];

/// Exactly [`TABLE_LEN`] words
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct LfibTable(Box<[u32; TABLE_LEN]>);

impl LfibTable {
    /// Table drawn from the 1999 KISS with the bootstrap seeds
    pub fn bootstrap() -> Self {
        let [z, w, jsr, jcong] = BOOTSTRAP_SEEDS;
        let mut kiss = Kiss1999::new(z, w, jsr, jcong);
        let mut table = Box::new([0u32; TABLE_LEN]);
        for slot in table.iter_mut() {
            *slot = kiss.advance();
        }
        Self(table)
    }

    /// Build from a seed tree that flattens to exactly [`TABLE_LEN`] limbs
    ///
    /// An empty seed gives the bootstrap table.
    pub fn from_seed(seed: &Seed) -> Result<Self, RngError> {
        let limbs = flatten(seed)
            .map(|limb| limb.ok_or_else(|| RngError::InvalidSeed("None in table seed".into())))
            .collect::<Result<Vec<u32>, _>>()?;
        if limbs.is_empty() {
            return Ok(Self::bootstrap());
        }
        Self::try_from(limbs)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0[..]
    }

    /// Copy with index 0 moved to `start`
    fn rotated(&self, start: u8) -> Self {
        let mut table = self.0.clone();
        table.rotate_left(usize::from(start));
        Self(table)
    }
}

impl TryFrom<Vec<u32>> for LfibTable {
    type Error = RngError;

    fn try_from(words: Vec<u32>) -> Result<Self, RngError> {
        let actual = words.len();
        let table: Box<[u32; TABLE_LEN]> = words
            .into_boxed_slice()
            .try_into()
            .map_err(|_| RngError::SeedLength {
                expected: TABLE_LEN,
                actual,
            })?;
        Ok(Self(table))
    }
}

impl TryFrom<&[u32]> for LfibTable {
    type Error = RngError;

    fn try_from(words: &[u32]) -> Result<Self, RngError> {
        Self::try_from(words.to_vec())
    }
}

impl From<LfibTable> for Vec<u32> {
    fn from(table: LfibTable) -> Self {
        table.0.to_vec()
    }
}

// ============================================================================
// LFIB4
// ============================================================================

/// Four-lag additive lagged-Fibonacci generator
///
/// # Example
/// ```
/// use simplerandom_core_rs::{Generator, Lfib4};
///
/// let words: Vec<u32> = (0..256).collect();
/// let mut lfib = Lfib4::from_table(&words).unwrap();
/// // slot 1 + slot 59 + slot 120 + slot 179
/// assert_eq!(lfib.advance(), 1 + 59 + 120 + 179);
/// assert!(Lfib4::from_table(&words[..10]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "LfibTable", into = "LfibTable")]
pub struct Lfib4 {
    table: LfibTable,
    cursor: u8,
}

impl Lfib4 {
    /// Start from an explicit table, cursor at 0
    pub fn new(table: LfibTable) -> Self {
        Self { table, cursor: 0 }
    }

    /// Start from exactly [`TABLE_LEN`] words
    pub fn from_table(words: &[u32]) -> Result<Self, RngError> {
        Ok(Self::new(LfibTable::try_from(words)?))
    }

    /// Start from a seed tree; see [`LfibTable::from_seed`]
    pub fn from_seed<S: Into<Seed>>(seed: S) -> Result<Self, RngError> {
        Ok(Self::new(LfibTable::from_seed(&seed.into())?))
    }

    #[inline]
    fn at(&self, offset: u8) -> u32 {
        self.table.0[usize::from(self.cursor.wrapping_add(offset))]
    }
}

impl Default for Lfib4 {
    fn default() -> Self {
        Self::new(LfibTable::bootstrap())
    }
}

impl Generator for Lfib4 {
    type State = LfibTable;
    const NAME: &'static str = "LFIB4";

    fn advance(&mut self) -> u32 {
        self.cursor = self.cursor.wrapping_add(1);
        let value = self
            .at(0)
            .wrapping_add(self.at(58))
            .wrapping_add(self.at(119))
            .wrapping_add(self.at(178));
        self.table.0[usize::from(self.cursor)] = value;
        value
    }

    fn current(&self) -> u32 {
        self.at(0)
    }

    fn state(&self) -> LfibTable {
        self.table.rotated(self.cursor)
    }

    fn set_state(&mut self, state: LfibTable) {
        *self = Self::new(state);
    }
}

impl From<LfibTable> for Lfib4 {
    fn from(table: LfibTable) -> Self {
        Self::new(table)
    }
}

impl From<Lfib4> for LfibTable {
    fn from(lfib: Lfib4) -> Self {
        lfib.state()
    }
}

// ============================================================================
// SWB
// ============================================================================

/// Snapshot of an SWB generator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwbState {
    pub table: LfibTable,
    pub borrow: bool,
}

/// Subtract-with-borrow generator
///
/// # Example
/// ```
/// use simplerandom_core_rs::{Generator, Lfib4, Swb};
///
/// let mut lfib = Lfib4::default();
/// lfib.advance();
/// // continue on the same table and cursor
/// let swb = Swb::from(lfib.clone());
/// assert_eq!(swb.state().table, lfib.state());
/// assert!(!swb.state().borrow);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SwbState", into = "SwbState")]
pub struct Swb {
    table: LfibTable,
    cursor: u8,
    borrow: bool,
}

impl Swb {
    /// Start from an explicit table, cursor at 0 and no borrow
    pub fn new(table: LfibTable) -> Self {
        Self {
            table,
            cursor: 0,
            borrow: false,
        }
    }

    /// Start from exactly [`TABLE_LEN`] words
    pub fn from_table(words: &[u32]) -> Result<Self, RngError> {
        Ok(Self::new(LfibTable::try_from(words)?))
    }

    /// Start from a seed tree; see [`LfibTable::from_seed`]
    pub fn from_seed<S: Into<Seed>>(seed: S) -> Result<Self, RngError> {
        Ok(Self::new(LfibTable::from_seed(&seed.into())?))
    }

    #[inline]
    fn at(&self, offset: u8) -> u32 {
        self.table.0[usize::from(self.cursor.wrapping_add(offset))]
    }
}

impl Default for Swb {
    fn default() -> Self {
        Self::new(LfibTable::bootstrap())
    }
}

impl From<Lfib4> for Swb {
    fn from(lfib: Lfib4) -> Self {
        Self {
            table: lfib.table,
            cursor: lfib.cursor,
            borrow: false,
        }
    }
}

impl Generator for Swb {
    type State = SwbState;
    const NAME: &'static str = "SWB";

    fn advance(&mut self) -> u32 {
        self.cursor = self.cursor.wrapping_add(1);
        let x = self.at(34);
        let y = self.at(19).wrapping_add(u32::from(self.borrow));
        let value = x.wrapping_sub(y);
        self.table.0[usize::from(self.cursor)] = value;
        self.borrow = x < y;
        value
    }

    fn current(&self) -> u32 {
        self.at(0)
    }

    fn state(&self) -> SwbState {
        SwbState {
            table: self.table.rotated(self.cursor),
            borrow: self.borrow,
        }
    }

    fn set_state(&mut self, state: SwbState) {
        *self = Self::from(state);
    }
}

impl From<SwbState> for Swb {
    fn from(state: SwbState) -> Self {
        Self {
            table: state.table,
            cursor: 0,
            borrow: state.borrow,
        }
    }
}

impl From<Swb> for SwbState {
    fn from(swb: Swb) -> Self {
        swb.state()
    }
}

impl_generator_iterator!(Lfib4, Swb);

impl fmt::Display for LfibTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, ..., {}]", self.0[0], self.0[1], self.0[TABLE_LEN - 1])
    }
}

impl fmt::Display for Lfib4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LFIB4({})", self.state())
    }
}

impl fmt::Display for Swb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        write!(f, "SWB({}, {})", state.table, u8::from(state.borrow))
    }
}

//! Bit-column matrices over GF(2)
//!
//! An n×n matrix over GF(2) is stored as n words, one per column; bit r of
//! column c is the matrix entry at row r, column c. Addition is XOR,
//! multiplication is AND followed by XOR-accumulation.
//!
//! Every shift/XOR recurrence in this crate is linear over GF(2), so one step
//! of a generator can be written as a matrix `M`, and n steps as `M^n`. The
//! power is computed by repeated squaring, which is what makes jump-ahead
//! O(log n).
//!
//! # Composition order
//!
//! `a * b` is "apply `b`, then apply `a`". Step matrices are therefore built
//! right-to-left relative to the order of the source statements:
//!
//! ```
//! use simplerandom_core_rs::BitColumnMatrix;
//!
//! // y ^= y << 13; y ^= y >> 17; y ^= y << 5;
//! let a = &BitColumnMatrix::unity(32) + &BitColumnMatrix::shift(32, 13);
//! let b = &BitColumnMatrix::unity(32) + &BitColumnMatrix::shift(32, -17);
//! let c = &BitColumnMatrix::unity(32) + &BitColumnMatrix::shift(32, 5);
//! let step = &(&c * &b) * &a;
//!
//! let mut y: u32 = 3360276411;
//! y ^= y << 13;
//! y ^= y >> 17;
//! y ^= y << 5;
//! assert_eq!(&step * 3360276411u64, u64::from(y));
//! ```

use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::error::RngError;

/// Largest supported matrix width (one `u64` per column)
pub const MAX_WIDTH: usize = 64;

/// Square matrix over GF(2), stored column by column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitColumnMatrix {
    columns: Vec<u64>,
}

impl BitColumnMatrix {
    /// Identity matrix of width `n`
    ///
    /// # Panics
    /// Panics if `n` is 0 or greater than 64
    ///
    /// # Example
    /// ```
    /// use simplerandom_core_rs::BitColumnMatrix;
    ///
    /// let unity = BitColumnMatrix::unity(32);
    /// assert_eq!(&unity * 0xDEADBEEFu64, 0xDEADBEEF);
    /// ```
    pub fn unity(n: usize) -> Self {
        assert_width(n);
        Self {
            columns: (0..n).map(|i| 1u64 << i).collect(),
        }
    }

    /// Matrix that shifts a vector left by `shift` bits
    ///
    /// Negative `shift` shifts right by `|shift|`. Bits moved past either end
    /// are lost, exactly as with unsigned integer shifts.
    ///
    /// # Panics
    /// Panics if `n` is 0 or greater than 64
    ///
    /// # Example
    /// ```
    /// use simplerandom_core_rs::BitColumnMatrix;
    ///
    /// let left = BitColumnMatrix::shift(32, 4);
    /// let right = BitColumnMatrix::shift(32, -4);
    /// assert_eq!(&left * 0xF000_0001u64, 0x0000_0010);
    /// assert_eq!(&right * 0xF000_0001u64, 0x0F00_0000);
    /// ```
    pub fn shift(n: usize, shift: i32) -> Self {
        assert_width(n);
        let columns = (0..n as i64)
            .map(|i| {
                let target = i + i64::from(shift);
                if (0..n as i64).contains(&target) {
                    1u64 << target
                } else {
                    0
                }
            })
            .collect();
        Self { columns }
    }

    /// Diagonal matrix keeping only a range of bit positions
    ///
    /// If `start <= end` the bits in `[start, end)` are kept. If `end < start`
    /// the range wraps: bits in `[0, end)` and `[start, n)` are kept, bits in
    /// `[end, start)` are cleared.
    ///
    /// # Panics
    /// Panics if `n` is 0 or greater than 64
    ///
    /// # Example
    /// ```
    /// use simplerandom_core_rs::BitColumnMatrix;
    ///
    /// let keep_high = BitColumnMatrix::mask(32, 7, 32);
    /// assert_eq!(&keep_high * 0xFFFF_FFFFu64, 0xFFFF_FF80);
    ///
    /// let wrapped = BitColumnMatrix::mask(8, 6, 2);
    /// assert_eq!(&wrapped * 0xFFu64, 0b1100_0011);
    /// ```
    pub fn mask(n: usize, start: usize, end: usize) -> Self {
        assert_width(n);
        let columns = (0..n)
            .map(|i| {
                let keep = if start <= end {
                    start <= i && i < end
                } else {
                    start <= i || i < end
                };
                if keep {
                    1u64 << i
                } else {
                    0
                }
            })
            .collect();
        Self { columns }
    }

    /// Build a matrix from explicit columns
    ///
    /// Column `i` is the image of input bit `i`. Bits at or above the width
    /// are discarded.
    ///
    /// # Errors
    /// Returns `RngError::UnsupportedWidth` if the column count is 0 or
    /// greater than 64.
    pub fn from_columns(columns: Vec<u64>) -> Result<Self, RngError> {
        let n = columns.len();
        if n == 0 || n > MAX_WIDTH {
            return Err(RngError::UnsupportedWidth(n));
        }
        let keep = width_mask(n);
        Ok(Self {
            columns: columns.into_iter().map(|c| c & keep).collect(),
        })
    }

    /// Matrix width (number of columns, equal to number of rows)
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// The column words, least significant input bit first
    pub fn columns(&self) -> &[u64] {
        &self.columns
    }

    /// Column-wise XOR
    ///
    /// # Errors
    /// Returns `RngError::WidthMismatch` if the widths differ.
    pub fn checked_add(&self, other: &Self) -> Result<Self, RngError> {
        self.check_width(other)?;
        Ok(Self {
            columns: self
                .columns
                .iter()
                .zip(&other.columns)
                .map(|(a, b)| a ^ b)
                .collect(),
        })
    }

    /// Subtraction, which over GF(2) is the same as addition
    pub fn checked_sub(&self, other: &Self) -> Result<Self, RngError> {
        self.checked_add(other)
    }

    /// Matrix product `self * other`: apply `other`, then `self`
    ///
    /// # Errors
    /// Returns `RngError::WidthMismatch` if the widths differ.
    pub fn checked_mul(&self, other: &Self) -> Result<Self, RngError> {
        self.check_width(other)?;
        Ok(Self {
            columns: other.columns.iter().map(|&c| self.mul_vector(c)).collect(),
        })
    }

    /// Matrix-vector product
    ///
    /// XORs together the columns selected by the set bits of `x`. Bits of `x`
    /// at or above the width are ignored.
    pub fn mul_vector(&self, x: u64) -> u64 {
        let mut x = x;
        let mut value = 0;
        for column in &self.columns {
            if x & 1 != 0 {
                value ^= column;
            }
            x >>= 1;
        }
        value
    }

    /// Raise the matrix to a non-negative power by repeated squaring
    ///
    /// `pow(0)` is the identity matrix.
    ///
    /// # Example
    /// ```
    /// use simplerandom_core_rs::BitColumnMatrix;
    ///
    /// let m = &BitColumnMatrix::unity(16) + &BitColumnMatrix::shift(16, 3);
    /// let naive = &(&m * &m) * &m;
    /// assert_eq!(m.pow(3), naive);
    /// assert_eq!(m.pow(0), BitColumnMatrix::unity(16));
    /// ```
    pub fn pow(&self, exponent: u128) -> Self {
        let mut n = exponent;
        let mut result = Self::unity(self.width());
        let mut square = self.clone();
        loop {
            if n & 1 != 0 {
                result = square.mul_same_width(&result);
            }
            n >>= 1;
            if n == 0 {
                break;
            }
            square = square.mul_same_width(&square);
        }
        result
    }

    fn mul_same_width(&self, other: &Self) -> Self {
        Self {
            columns: other.columns.iter().map(|&c| self.mul_vector(c)).collect(),
        }
    }

    fn check_width(&self, other: &Self) -> Result<(), RngError> {
        if self.width() != other.width() {
            return Err(RngError::WidthMismatch {
                left: self.width(),
                right: other.width(),
            });
        }
        Ok(())
    }
}

fn assert_width(n: usize) {
    assert!(
        (1..=MAX_WIDTH).contains(&n),
        "matrix width must be in 1..=64"
    );
}

fn width_mask(n: usize) -> u64 {
    u64::MAX >> (MAX_WIDTH - n)
}

impl Add for &BitColumnMatrix {
    type Output = BitColumnMatrix;

    /// # Panics
    /// Panics if the widths differ; use `checked_add` to get an error instead.
    fn add(self, other: &BitColumnMatrix) -> BitColumnMatrix {
        match self.checked_add(other) {
            Ok(sum) => sum,
            Err(err) => panic!("{}", err),
        }
    }
}

impl Sub for &BitColumnMatrix {
    type Output = BitColumnMatrix;

    fn sub(self, other: &BitColumnMatrix) -> BitColumnMatrix {
        self + other
    }
}

impl Mul for &BitColumnMatrix {
    type Output = BitColumnMatrix;

    /// # Panics
    /// Panics if the widths differ; use `checked_mul` to get an error instead.
    fn mul(self, other: &BitColumnMatrix) -> BitColumnMatrix {
        match self.checked_mul(other) {
            Ok(product) => product,
            Err(err) => panic!("{}", err),
        }
    }
}

impl Mul<u64> for &BitColumnMatrix {
    type Output = u64;

    fn mul(self, x: u64) -> u64 {
        self.mul_vector(x)
    }
}

impl fmt::Display for BitColumnMatrix {
    /// Bit grid with the most significant row and column first
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.width();
        for row in (0..n).rev() {
            let bits: Vec<&str> = self
                .columns
                .iter()
                .rev()
                .map(|column| if (column >> row) & 1 != 0 { "1" } else { "0" })
                .collect();
            write!(f, "{}", bits.join(" "))?;
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

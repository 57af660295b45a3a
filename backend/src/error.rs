//! Error types for the generator library
//!
//! Only configuration mistakes are errors. Degenerate generator states are
//! never reported: they are sanitized in place (see each family's
//! `sanitize`).

use thiserror::Error;

/// Errors produced while building matrices, seeding or configuring generators
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RngError {
    /// Two bit matrices (or a matrix and a column set) have different widths
    #[error("Matrices are not of same width: {left} vs {right}")]
    WidthMismatch { left: usize, right: usize },

    /// Bit matrices hold one `u64` per column, so widths are limited to 1..=64
    #[error("Matrix width {0} is outside the supported range 1..=64")]
    UnsupportedWidth(usize),

    /// A fixed-arity seed (lagged-Fibonacci table) had the wrong length
    #[error("Seed length must be {expected}, got {actual}")]
    SeedLength { expected: usize, actual: usize },

    /// A flat state vector had the wrong number of words for its family
    #[error("State for {family} must have {expected} words, got {actual}")]
    StateLength {
        family: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A seed fragment could not be interpreted as an integer
    #[error("Invalid seed fragment: {0}")]
    InvalidSeed(String),

    /// Configuration validation error (including unknown options)
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Generator family name not recognised
    #[error("Unknown generator family: {0}")]
    UnknownFamily(String),

    /// The family's recurrence has no jump-ahead implementation
    #[error("Jump-ahead is not supported for {0}")]
    JumpAheadUnsupported(&'static str),

    /// The family has no mixing procedure (its seed is a full table)
    #[error("Mixing extra seed material is not supported for {0}")]
    MixUnsupported(&'static str),
}

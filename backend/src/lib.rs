//! Simple Random Core - Rust Engine
//!
//! Small, fast pseudo-random number generators with reproducible output,
//! mostly from George Marsaglia and Pierre L'Ecuyer.
//!
//! # Architecture
//!
//! - **bitmatrix**: GF(2) bit-column matrices, used for jump-ahead of the
//!   shift-register families
//! - **maths**: modular exponentiation and geometric series helpers
//! - **seed**: seed fragments and the limb-stream seeding protocol
//! - **generators**: the generator families
//! - **config**: runtime family selection and JSON configuration
//!
//! # Critical Invariants
//!
//! 1. All generator arithmetic is modulo 2^32 (or the family's modulus)
//! 2. Same seed → same sequence, on every platform
//! 3. Generators never hold a degenerate state; bad seeds are sanitized,
//!    never rejected
//!
//! # Example
//! ```
//! use simplerandom_core_rs::{Generator, JumpAhead, Kiss2, Seedable};
//!
//! let mut rng = Kiss2::seeded((12345u32, 67890u32));
//! let ahead: Vec<u32> = rng.clone().take(1000).collect();
//!
//! rng.jump_ahead(999);
//! assert_eq!(rng.advance(), ahead[999]);
//! ```

pub mod bitmatrix;
pub mod config;
pub mod error;
pub mod generators;
pub mod maths;
pub mod seed;

pub use bitmatrix::BitColumnMatrix;
pub use config::{AnyGenerator, Family, GeneratorConfig};
pub use error::RngError;
pub use generators::{
    Concatenated, Cong, Generator, JumpAhead, Kiss, Kiss1999, Kiss2, Lfib4, LfibTable, Lfsr113,
    Lfsr88, Mwc, Mwc1, Mwc2, Mwc64, MwcCombine, MwcVariant, Rotated, Seedable, Shr3, Swb,
    SwbState, SIMPLERANDOM_MAX, TABLE_LEN,
};
pub use seed::Seed;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn simplerandom_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    ffi::register(m)
}

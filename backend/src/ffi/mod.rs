//! PyO3 bindings
//!
//! One Python class per generator family, each an infinite iterator:
//!
//! ```python
//! from simplerandom_core_rs import KISS
//!
//! rng = KISS(2247183469, 99545079, 3269400377, 3950144837)
//! values = [next(rng) for _ in range(10)]
//! state = rng.getstate()
//! rng.jumpahead(-10)
//! ```
//!
//! Seeds are passed positionally and may be ints of any size up to 128
//! bits, `None` (field default), or iterables of those. `mix_extras=True`
//! mixes seed values beyond the family's arity into the state. Any other
//! keyword argument raises `TypeError`.

use pyo3::exceptions::{PyNotImplementedError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyLong, PyString, PyTuple};

use crate::config::{AnyGenerator, Family};
use crate::error::RngError;
use crate::seed::Seed;

impl From<RngError> for PyErr {
    fn from(err: RngError) -> PyErr {
        match err {
            RngError::JumpAheadUnsupported(_) | RngError::MixUnsupported(_) => {
                PyNotImplementedError::new_err(err.to_string())
            }
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Convert a Python seed fragment into a [`Seed`]
fn seed_from_py(obj: &Bound<'_, PyAny>) -> PyResult<Seed> {
    if obj.is_none() {
        return Ok(Seed::Absent);
    }
    if obj.is_instance_of::<PyLong>() {
        if let Ok(value) = obj.extract::<u128>() {
            return Ok(Seed::Uint(value));
        }
        return obj.extract::<i128>().map(Seed::Int).map_err(|_| {
            PyValueError::new_err("seed integers must fit in 128 bits")
        });
    }
    if obj.is_instance_of::<PyString>() {
        return Err(PyTypeError::new_err("seed values must be int, None or iterable"));
    }
    let items = obj
        .iter()
        .map_err(|_| PyTypeError::new_err("seed values must be int, None or iterable"))?;
    let mut seeds = Vec::new();
    for item in items {
        seeds.push(seed_from_py(&item?)?);
    }
    Ok(Seed::Seq(seeds))
}

fn seed_from_args(args: &Bound<'_, PyTuple>) -> PyResult<Seed> {
    let mut seeds = Vec::with_capacity(args.len());
    for arg in args.iter() {
        seeds.push(seed_from_py(&arg)?);
    }
    Ok(Seed::Seq(seeds))
}

macro_rules! py_generators {
    ($($(#[$meta:meta])* $py:ident => $name:literal, $family:expr;)+) => {
        $(
            $(#[$meta])*
            #[pyclass(name = $name, module = "simplerandom_core_rs")]
            pub struct $py {
                inner: AnyGenerator,
            }

            #[pymethods]
            impl $py {
                #[new]
                #[pyo3(signature = (*args, mix_extras = false))]
                fn new(args: &Bound<'_, PyTuple>, mix_extras: bool) -> PyResult<Self> {
                    let inner = AnyGenerator::new($family, seed_from_args(args)?, mix_extras)?;
                    Ok(Self { inner })
                }

                /// Re-seed in place
                #[pyo3(signature = (*args, mix_extras = false))]
                fn seed(&mut self, args: &Bound<'_, PyTuple>, mix_extras: bool) -> PyResult<()> {
                    self.inner = AnyGenerator::new($family, seed_from_args(args)?, mix_extras)?;
                    Ok(())
                }

                #[staticmethod]
                fn min() -> u32 {
                    if $family == Family::Shr3 {
                        1
                    } else {
                        0
                    }
                }

                #[staticmethod]
                fn max() -> u32 {
                    u32::MAX
                }

                fn __iter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
                    slf
                }

                fn __next__(&mut self) -> u32 {
                    self.inner.advance()
                }

                fn current(&self) -> u32 {
                    self.inner.current()
                }

                /// Mix extra seed values into the state; returns `current()`
                #[pyo3(signature = (*args))]
                fn mix(&mut self, args: &Bound<'_, PyTuple>) -> PyResult<u32> {
                    Ok(self.inner.mix(seed_from_args(args)?)?)
                }

                /// Flat tuple of state words
                fn getstate<'py>(&self, py: Python<'py>) -> Bound<'py, PyTuple> {
                    PyTuple::new_bound(py, self.inner.state_words())
                }

                fn setstate(&mut self, state: Vec<u32>) -> PyResult<()> {
                    Ok(self.inner.set_state_words(&state)?)
                }

                fn jumpahead(&mut self, n: i128) -> PyResult<()> {
                    Ok(self.inner.jump_ahead(n)?)
                }

                fn __repr__(&self) -> String {
                    self.inner.to_string()
                }
            }
        )+

        /// Register every generator class on the module
        pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
            $(m.add_class::<$py>()?;)+
            Ok(())
        }
    };
}

py_generators! {
    /// Congruential generator, `x' = 69069x + 12345`
    PyCong => "Cong", Family::Cong;
    /// 3-shift-register generator
    PyShr3 => "SHR3", Family::Shr3;
    /// Two-lane MWC, concatenated output (legacy)
    PyMwc1 => "MWC1", Family::Mwc1;
    /// Two-lane MWC, rotated output
    PyMwc2 => "MWC2", Family::Mwc2;
    /// 64-bit MWC
    PyMwc64 => "MWC64", Family::Mwc64;
    /// MWC2 + Cong + SHR3
    PyKiss => "KISS", Family::Kiss;
    /// MWC64 + Cong + SHR3
    PyKiss2 => "KISS2", Family::Kiss2;
    /// L'Ecuyer four-lane combined LFSR
    PyLfsr113 => "LFSR113", Family::Lfsr113;
    /// L'Ecuyer three-lane combined LFSR
    PyLfsr88 => "LFSR88", Family::Lfsr88;
    /// Four-lag lagged Fibonacci over 256 words
    PyLfib4 => "LFIB4", Family::Lfib4;
    /// Subtract-with-borrow over 256 words
    PySwb => "SWB", Family::Swb;
}

//! Runtime generator selection and JSON configuration
//!
//! The generator types are static; this module is the dynamic surface on top
//! of them. A [`GeneratorConfig`] names a [`Family`], a seed and whether to
//! mix extra seed material, and builds an [`AnyGenerator`].
//!
//! ```json
//! {"family": "kiss2", "seed": [12345, null, "340282366920938463463374607431768211455"], "mix_extras": true}
//! ```
//!
//! Seed fragments may be JSON integers, `null` (use the field default),
//! nested arrays, or decimal strings for integers wider than 64 bits.
//! Unknown fields are rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::RngError;
use crate::generators::{
    Cong, Generator, JumpAhead, Kiss, Kiss1999, Kiss2, Lfib4, LfibTable, Lfsr113, Lfsr88, Mwc1,
    Mwc2, Mwc64, Seedable, Shr3, Swb, SwbState, TABLE_LEN,
};
use crate::seed::Seed;

// ============================================================================
// Family
// ============================================================================

/// Generator family selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Cong,
    Shr3,
    Mwc1,
    Mwc2,
    Mwc64,
    Kiss,
    Kiss2,
    Lfsr113,
    Lfsr88,
    Kiss1999,
    Lfib4,
    Swb,
}

impl Family {
    /// Every family, in declaration order
    pub const ALL: [Family; 12] = [
        Family::Cong,
        Family::Shr3,
        Family::Mwc1,
        Family::Mwc2,
        Family::Mwc64,
        Family::Kiss,
        Family::Kiss2,
        Family::Lfsr113,
        Family::Lfsr88,
        Family::Kiss1999,
        Family::Lfib4,
        Family::Swb,
    ];

    /// Lower-case configuration key
    pub fn key(self) -> &'static str {
        match self {
            Family::Cong => "cong",
            Family::Shr3 => "shr3",
            Family::Mwc1 => "mwc1",
            Family::Mwc2 => "mwc2",
            Family::Mwc64 => "mwc64",
            Family::Kiss => "kiss",
            Family::Kiss2 => "kiss2",
            Family::Lfsr113 => "lfsr113",
            Family::Lfsr88 => "lfsr88",
            Family::Kiss1999 => "kiss1999",
            Family::Lfib4 => "lfib4",
            Family::Swb => "swb",
        }
    }

    /// Display name, as used by each generator's `Display`
    pub fn name(self) -> &'static str {
        match self {
            Family::Cong => Cong::NAME,
            Family::Shr3 => Shr3::NAME,
            Family::Mwc1 => Mwc1::NAME,
            Family::Mwc2 => Mwc2::NAME,
            Family::Mwc64 => Mwc64::NAME,
            Family::Kiss => Kiss::NAME,
            Family::Kiss2 => Kiss2::NAME,
            Family::Lfsr113 => Lfsr113::NAME,
            Family::Lfsr88 => Lfsr88::NAME,
            Family::Kiss1999 => Kiss1999::NAME,
            Family::Lfib4 => Lfib4::NAME,
            Family::Swb => Swb::NAME,
        }
    }

    /// Number of words in the flat state vector
    pub fn state_len(self) -> usize {
        match self {
            Family::Cong | Family::Shr3 => 1,
            Family::Mwc1 | Family::Mwc2 | Family::Mwc64 => 2,
            Family::Lfsr88 => 3,
            Family::Kiss | Family::Kiss2 | Family::Lfsr113 | Family::Kiss1999 => 4,
            Family::Lfib4 => TABLE_LEN,
            // table followed by the borrow flag
            Family::Swb => TABLE_LEN + 1,
        }
    }

    /// Whether the family implements the generic seeding/mixing protocol
    pub fn is_seedable(self) -> bool {
        !matches!(self, Family::Kiss1999 | Family::Lfib4 | Family::Swb)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = RngError;

    /// Case-insensitive family key (`"kiss2"`, `"KISS2"`, `" Lfsr113 "`)
    fn from_str(s: &str) -> Result<Self, RngError> {
        let wanted = s.trim().to_ascii_lowercase();
        Family::ALL
            .into_iter()
            .find(|family| family.key() == wanted)
            .ok_or_else(|| RngError::UnknownFamily(s.to_string()))
    }
}

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Declarative generator construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Which generator to build
    pub family: Family,

    /// Seed fragments, flattened in order; empty means all defaults
    #[serde(default)]
    pub seed: Vec<Value>,

    /// Mix seed limbs beyond the family's arity into the state
    #[serde(default)]
    pub mix_extras: bool,
}

impl GeneratorConfig {
    /// Config for a family with default seeds
    pub fn new(family: Family) -> Self {
        Self {
            family,
            seed: Vec::new(),
            mix_extras: false,
        }
    }

    /// Parse from JSON text
    ///
    /// # Errors
    /// Returns `RngError::InvalidConfig` for malformed JSON, unknown fields
    /// or unknown family names.
    pub fn from_json(text: &str) -> Result<Self, RngError> {
        serde_json::from_str(text).map_err(|e| RngError::InvalidConfig(e.to_string()))
    }

    /// Convert the JSON seed fragments into a [`Seed`]
    pub fn seed(&self) -> Result<Seed, RngError> {
        self.seed
            .iter()
            .map(seed_from_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Seed::Seq)
    }

    /// Build the configured generator
    ///
    /// # Example
    /// ```
    /// use simplerandom_core_rs::GeneratorConfig;
    ///
    /// let config = GeneratorConfig::from_json(r#"{"family": "cong", "seed": [2051391225]}"#)?;
    /// let mut rng = config.build()?;
    /// let first = rng.advance();
    /// assert_eq!(first, 2051391225u32.wrapping_mul(69069).wrapping_add(12345));
    /// # Ok::<(), simplerandom_core_rs::RngError>(())
    /// ```
    pub fn build(&self) -> Result<AnyGenerator, RngError> {
        AnyGenerator::new(self.family, self.seed()?, self.mix_extras)
    }
}

fn seed_from_json(value: &Value) -> Result<Seed, RngError> {
    match value {
        Value::Null => Ok(Seed::Absent),
        Value::Number(number) => {
            if let Some(unsigned) = number.as_u64() {
                Ok(Seed::from(unsigned))
            } else if let Some(signed) = number.as_i64() {
                Ok(Seed::from(signed))
            } else {
                Err(RngError::InvalidConfig(format!(
                    "seed fragment {} is not an integer",
                    number
                )))
            }
        }
        Value::String(text) => Seed::parse_decimal(text),
        Value::Array(items) => items
            .iter()
            .map(seed_from_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Seed::Seq),
        other => Err(RngError::InvalidConfig(format!(
            "unsupported seed fragment: {}",
            other
        ))),
    }
}

// ============================================================================
// AnyGenerator
// ============================================================================

/// A generator of any family, selected at runtime
///
/// Serializes as `{"family": ..., "state": ...}` using each family's
/// snapshot format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", content = "state", rename_all = "lowercase")]
pub enum AnyGenerator {
    Cong(Cong),
    Shr3(Shr3),
    Mwc1(Mwc1),
    Mwc2(Mwc2),
    Mwc64(Mwc64),
    Kiss(Kiss),
    Kiss2(Kiss2),
    Lfsr113(Lfsr113),
    Lfsr88(Lfsr88),
    Kiss1999(Kiss1999),
    Lfib4(Lfib4),
    Swb(Swb),
}

/// Run `$body` with `$g` bound to the inner generator, whatever its family
macro_rules! dispatch {
    ($value:expr, $g:ident => $body:expr) => {
        match $value {
            AnyGenerator::Cong($g) => $body,
            AnyGenerator::Shr3($g) => $body,
            AnyGenerator::Mwc1($g) => $body,
            AnyGenerator::Mwc2($g) => $body,
            AnyGenerator::Mwc64($g) => $body,
            AnyGenerator::Kiss($g) => $body,
            AnyGenerator::Kiss2($g) => $body,
            AnyGenerator::Lfsr113($g) => $body,
            AnyGenerator::Lfsr88($g) => $body,
            AnyGenerator::Kiss1999($g) => $body,
            AnyGenerator::Lfib4($g) => $body,
            AnyGenerator::Swb($g) => $body,
        }
    };
}

/// Same as `dispatch!`, restricted to the families with the seeding protocol
macro_rules! dispatch_seedable {
    ($value:expr, $g:ident => $body:expr, $other:ident => $fallback:expr) => {
        match $value {
            AnyGenerator::Cong($g) => $body,
            AnyGenerator::Shr3($g) => $body,
            AnyGenerator::Mwc1($g) => $body,
            AnyGenerator::Mwc2($g) => $body,
            AnyGenerator::Mwc64($g) => $body,
            AnyGenerator::Kiss($g) => $body,
            AnyGenerator::Kiss2($g) => $body,
            AnyGenerator::Lfsr113($g) => $body,
            AnyGenerator::Lfsr88($g) => $body,
            $other => $fallback,
        }
    };
}

fn fixed_state<const N: usize>(family: Family, words: &[u32]) -> Result<[u32; N], RngError> {
    <[u32; N]>::try_from(words).map_err(|_| RngError::StateLength {
        family: family.name(),
        expected: N,
        actual: words.len(),
    })
}

impl AnyGenerator {
    /// Build a generator of `family` from `seed`
    ///
    /// # Errors
    /// - `RngError::SeedLength` / `RngError::InvalidSeed` for a bad
    ///   lagged-Fibonacci table
    /// - `RngError::MixUnsupported` when `mix_extras` is requested for a
    ///   family without a mixing procedure
    pub fn new<S: Into<Seed>>(family: Family, seed: S, mix_extras: bool) -> Result<Self, RngError> {
        let seed = seed.into();
        if mix_extras && !family.is_seedable() {
            return Err(RngError::MixUnsupported(family.name()));
        }
        Ok(match family {
            Family::Cong => AnyGenerator::Cong(Cong::seeded_with(seed, mix_extras)),
            Family::Shr3 => AnyGenerator::Shr3(Shr3::seeded_with(seed, mix_extras)),
            Family::Mwc1 => AnyGenerator::Mwc1(Mwc1::seeded_with(seed, mix_extras)),
            Family::Mwc2 => AnyGenerator::Mwc2(Mwc2::seeded_with(seed, mix_extras)),
            Family::Mwc64 => AnyGenerator::Mwc64(Mwc64::seeded_with(seed, mix_extras)),
            Family::Kiss => AnyGenerator::Kiss(Kiss::seeded_with(seed, mix_extras)),
            Family::Kiss2 => AnyGenerator::Kiss2(Kiss2::seeded_with(seed, mix_extras)),
            Family::Lfsr113 => AnyGenerator::Lfsr113(Lfsr113::seeded_with(seed, mix_extras)),
            Family::Lfsr88 => AnyGenerator::Lfsr88(Lfsr88::seeded_with(seed, mix_extras)),
            Family::Kiss1999 => AnyGenerator::Kiss1999(Kiss1999::from_seed(seed)),
            Family::Lfib4 => AnyGenerator::Lfib4(Lfib4::from_seed(seed)?),
            Family::Swb => AnyGenerator::Swb(Swb::from_seed(seed)?),
        })
    }

    /// Generator of `family` with its default seeds
    pub fn default_for(family: Family) -> Self {
        match family {
            Family::Cong => AnyGenerator::Cong(Cong::default()),
            Family::Shr3 => AnyGenerator::Shr3(Shr3::default()),
            Family::Mwc1 => AnyGenerator::Mwc1(Mwc1::default()),
            Family::Mwc2 => AnyGenerator::Mwc2(Mwc2::default()),
            Family::Mwc64 => AnyGenerator::Mwc64(Mwc64::default()),
            Family::Kiss => AnyGenerator::Kiss(Kiss::default()),
            Family::Kiss2 => AnyGenerator::Kiss2(Kiss2::default()),
            Family::Lfsr113 => AnyGenerator::Lfsr113(Lfsr113::default()),
            Family::Lfsr88 => AnyGenerator::Lfsr88(Lfsr88::default()),
            Family::Kiss1999 => AnyGenerator::Kiss1999(Kiss1999::default()),
            Family::Lfib4 => AnyGenerator::Lfib4(Lfib4::default()),
            Family::Swb => AnyGenerator::Swb(Swb::default()),
        }
    }

    pub fn family(&self) -> Family {
        match self {
            AnyGenerator::Cong(_) => Family::Cong,
            AnyGenerator::Shr3(_) => Family::Shr3,
            AnyGenerator::Mwc1(_) => Family::Mwc1,
            AnyGenerator::Mwc2(_) => Family::Mwc2,
            AnyGenerator::Mwc64(_) => Family::Mwc64,
            AnyGenerator::Kiss(_) => Family::Kiss,
            AnyGenerator::Kiss2(_) => Family::Kiss2,
            AnyGenerator::Lfsr113(_) => Family::Lfsr113,
            AnyGenerator::Lfsr88(_) => Family::Lfsr88,
            AnyGenerator::Kiss1999(_) => Family::Kiss1999,
            AnyGenerator::Lfib4(_) => Family::Lfib4,
            AnyGenerator::Swb(_) => Family::Swb,
        }
    }

    pub fn advance(&mut self) -> u32 {
        dispatch!(self, g => g.advance())
    }

    pub fn current(&self) -> u32 {
        dispatch!(self, g => g.current())
    }

    /// Flat state vector, [`Family::state_len`] words long
    pub fn state_words(&self) -> Vec<u32> {
        match self {
            AnyGenerator::Cong(g) => g.state().to_vec(),
            AnyGenerator::Shr3(g) => g.state().to_vec(),
            AnyGenerator::Mwc1(g) => g.state().to_vec(),
            AnyGenerator::Mwc2(g) => g.state().to_vec(),
            AnyGenerator::Mwc64(g) => g.state().to_vec(),
            AnyGenerator::Kiss(g) => g.state().to_vec(),
            AnyGenerator::Kiss2(g) => g.state().to_vec(),
            AnyGenerator::Lfsr113(g) => g.state().to_vec(),
            AnyGenerator::Lfsr88(g) => g.state().to_vec(),
            AnyGenerator::Kiss1999(g) => g.state().to_vec(),
            AnyGenerator::Lfib4(g) => g.state().into(),
            AnyGenerator::Swb(g) => {
                let SwbState { table, borrow } = g.state();
                let mut words: Vec<u32> = table.into();
                words.push(u32::from(borrow));
                words
            }
        }
    }

    /// Restore a flat state vector (sanitized on the way in)
    ///
    /// # Errors
    /// Returns `RngError::StateLength` if `words` is not exactly
    /// [`Family::state_len`] words long. The generator is unchanged then.
    pub fn set_state_words(&mut self, words: &[u32]) -> Result<(), RngError> {
        let family = self.family();
        match self {
            AnyGenerator::Cong(g) => g.set_state(fixed_state(family, words)?),
            AnyGenerator::Shr3(g) => g.set_state(fixed_state(family, words)?),
            AnyGenerator::Mwc1(g) => g.set_state(fixed_state(family, words)?),
            AnyGenerator::Mwc2(g) => g.set_state(fixed_state(family, words)?),
            AnyGenerator::Mwc64(g) => g.set_state(fixed_state(family, words)?),
            AnyGenerator::Kiss(g) => g.set_state(fixed_state(family, words)?),
            AnyGenerator::Kiss2(g) => g.set_state(fixed_state(family, words)?),
            AnyGenerator::Lfsr113(g) => g.set_state(fixed_state(family, words)?),
            AnyGenerator::Lfsr88(g) => g.set_state(fixed_state(family, words)?),
            AnyGenerator::Kiss1999(g) => g.set_state(fixed_state(family, words)?),
            AnyGenerator::Lfib4(g) => {
                let words: [u32; TABLE_LEN] = fixed_state(family, words)?;
                g.set_state(LfibTable::try_from(words.to_vec())?);
            }
            AnyGenerator::Swb(g) => {
                let words: [u32; TABLE_LEN + 1] = fixed_state(family, words)?;
                let (table, borrow) = words.split_at(TABLE_LEN);
                g.set_state(SwbState {
                    table: LfibTable::try_from(table)?,
                    borrow: borrow[0] != 0,
                });
            }
        }
        Ok(())
    }

    /// Mix extra seed material into the state, returning the current output
    ///
    /// # Errors
    /// Returns `RngError::MixUnsupported` for LFIB4, SWB and KISS1999.
    pub fn mix<S: Into<Seed>>(&mut self, extras: S) -> Result<u32, RngError> {
        let extras = extras.into();
        dispatch_seedable!(
            self,
            g => Ok(g.mix([&extras])),
            other => Err(RngError::MixUnsupported(other.family().name()))
        )
    }

    /// Fast-forward (or rewind, for negative `n`) by `n` steps
    ///
    /// # Errors
    /// Returns `RngError::JumpAheadUnsupported` for LFIB4, SWB and KISS1999.
    pub fn jump_ahead(&mut self, n: i128) -> Result<(), RngError> {
        dispatch_seedable!(
            self,
            g => {
                g.jump_ahead(n);
                Ok(())
            },
            other => Err(RngError::JumpAheadUnsupported(other.family().name()))
        )
    }
}

impl Iterator for AnyGenerator {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        Some(self.advance())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl fmt::Display for AnyGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, g => fmt::Display::fmt(g, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_from_str() {
        assert_eq!("KISS2".parse::<Family>().unwrap(), Family::Kiss2);
        assert_eq!(" lfsr88 ".parse::<Family>().unwrap(), Family::Lfsr88);
        assert_eq!(
            "mt19937".parse::<Family>(),
            Err(RngError::UnknownFamily("mt19937".to_string()))
        );
    }

    #[test]
    fn test_family_keys_match_serde_names() {
        for family in Family::ALL {
            let json = serde_json::to_string(&family).unwrap();
            assert_eq!(json, format!("\"{}\"", family.key()));
        }
    }

    #[test]
    fn test_state_len_matches_state_words() {
        for family in Family::ALL {
            let rng = AnyGenerator::default_for(family);
            assert_eq!(rng.state_words().len(), family.state_len(), "{}", family);
            assert_eq!(rng.family(), family);
        }
    }

    #[test]
    fn test_seed_fragments_from_json() {
        let config = GeneratorConfig::from_json(
            r#"{"family": "mwc2", "seed": [-1, null, [3], "18446744073709551616"]}"#,
        )
        .unwrap();
        assert_eq!(
            config.seed().unwrap(),
            Seed::Seq(vec![
                Seed::Int(-1),
                Seed::Absent,
                Seed::Seq(vec![Seed::Uint(3)]),
                Seed::Uint(1 << 64),
            ])
        );
    }

    #[test]
    fn test_float_seed_rejected() {
        let config = GeneratorConfig::from_json(r#"{"family": "cong", "seed": [1.5]}"#).unwrap();
        assert!(matches!(config.build(), Err(RngError::InvalidConfig(_))));
    }

    #[test]
    fn test_mix_extras_rejected_for_table_families() {
        assert_eq!(
            AnyGenerator::new(Family::Lfib4, Seed::none(), true),
            Err(RngError::MixUnsupported("LFIB4"))
        );
    }
}

//! Seeding Protocol Tests
//!
//! How seed fragments become generator state:
//! - wide and negative integers split into 32-bit limbs
//! - short seeds repeat their last limb across the remaining fields
//! - absent fragments select field defaults
//! - extra limbs are ignored, or mixed in when requested
//! - degenerate seeds are sanitized, never rejected

use simplerandom_core_rs::seed::flatten;
use simplerandom_core_rs::{
    seed, Cong, Generator, Kiss, Kiss2, Lfsr113, Lfsr88, Mwc1, Mwc2, Mwc64, Seed, Seedable, Shr3,
};

// ============================================================================
// Limb streams
// ============================================================================

#[test]
fn test_wide_integer_limbs_least_significant_first() {
    let limbs: Vec<Option<u32>> = flatten(&Seed::from((1u128 << 96) + 5)).collect();
    assert_eq!(limbs, vec![Some(5), Some(0), Some(0), Some(1)]);
}

#[test]
fn test_negative_integer_limbs() {
    let limbs: Vec<Option<u32>> = flatten(&Seed::from(-2i64)).collect();
    assert_eq!(limbs, vec![Some(0xFFFF_FFFE)]);

    let limbs: Vec<Option<u32>> = flatten(&Seed::from(-(1i128 << 40))).collect();
    assert_eq!(limbs, vec![Some(0), Some(0xFFFF_FF00)]);
}

#[test]
fn test_zero_yields_one_limb() {
    let limbs: Vec<Option<u32>> = flatten(&Seed::from(0u64)).collect();
    assert_eq!(limbs, vec![Some(0)]);
}

#[test]
fn test_nested_sequences_flatten_depth_first() {
    let s = seed![1u32, vec![seed![2u32, 3u32], Seed::from(4u32)], 5u32];
    let limbs: Vec<u32> = flatten(&s).flatten().collect();
    assert_eq!(limbs, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_parse_decimal() {
    assert_eq!(
        Seed::parse_decimal("340282366920938463463374607431768211455").unwrap(),
        Seed::Uint(u128::MAX)
    );
    assert_eq!(Seed::parse_decimal("-7").unwrap(), Seed::Int(-7));
    assert!(Seed::parse_decimal("0x10").is_err());
}

// ============================================================================
// Field assignment
// ============================================================================

#[test]
fn test_single_seed_repeats_across_fields() {
    assert_eq!(Kiss::seeded(1u32).state(), [1, 1, 1, 1]);
    assert_eq!(Mwc64::seeded(12345u32).state(), [12345, 12345]);
}

#[test]
fn test_absent_field_takes_default() {
    let rng = Mwc2::seeded(seed![None::<u32>, 7u32]);
    assert_eq!(rng.state(), [1872166912, 7]);
}

#[test]
fn test_negative_seed_is_twos_complement() {
    assert_eq!(Shr3::seeded(-1i32).state(), [0xFFFF_FFFF]);
    assert_eq!(Cong::seeded(-2i64).state(), [0xFFFF_FFFE]);
}

#[test]
fn test_wide_seed_spreads_over_fields() {
    // limbs 5, 0, 0, 1
    let rng = Lfsr113::seeded((1u128 << 96) + 5);
    assert_eq!(rng.state(), [5, 65535, 65535, 1]);
}

#[test]
fn test_zero_seeds_are_sanitized() {
    assert_eq!(Shr3::seeded(0u32).state(), [0xFFFF_FFFF]);
    assert_eq!(Lfsr88::seeded(0u32).lanes(), [0xFFFF_FFFF; 3]);
    let mwc = Mwc1::seeded((0u32, 0u32));
    assert_ne!(mwc.state(), [0, 0]);
}

// ============================================================================
// Extra limbs
// ============================================================================

#[test]
fn test_extra_limbs_ignored_by_default() {
    let plain = Kiss2::seeded([1u32, 2, 3, 4, 5, 6]);
    assert_eq!(plain.state(), [1, 2, 3, 4]);
}

#[test]
fn test_extra_limbs_mixed_when_requested() {
    let mut mixed = Kiss2::seeded_mixed([1u32, 2, 3, 4, 5, 6]);
    assert_eq!(mixed.state(), [0, 1397538142, 3, 540738]);
    assert_eq!(mixed.advance(), 1499226664);
}

#[test]
fn test_wide_seed_extra_limbs_mixed() {
    // limbs 7 and 256: the second is mixed in
    let mut cong = Cong::seeded_mixed((1u64 << 40) + 7);
    assert_eq!(cong.state(), [18177492]);
    assert_eq!(cong.advance(), 1370756861);
}

#[test]
fn test_mixed_without_extras_equals_plain() {
    let mut lfsr = Lfsr113::seeded_mixed((1u128 << 96) + 5);
    assert_eq!(lfsr, Lfsr113::seeded((1u128 << 96) + 5));
    assert_eq!(lfsr.advance(), 537922904);
}

#[test]
fn test_mix_skips_absent_fragments() {
    let mut with_gaps = Kiss::default();
    with_gaps.mix([seed![1u32, None::<u32>, 2u32]]);
    let mut without = Kiss::default();
    without.mix([1u32, 2u32]);
    assert_eq!(with_gaps, without);
}

#[test]
fn test_reseed_discards_state() {
    let mut rng = Mwc64::seeded(99u32);
    rng.advance();
    rng.reseed(99u32, false);
    assert_eq!(rng, Mwc64::seeded(99u32));
}

#[test]
fn test_seeded_with_flag() {
    let seed = seed![1u32, 2u32, 3u32];
    assert_eq!(Cong::seeded_with(&seed, false), Cong::seeded(&seed));
    assert_eq!(Cong::seeded_with(&seed, true), Cong::seeded_mixed(&seed));
    assert_ne!(Cong::seeded(&seed), Cong::seeded_mixed(&seed));
}

#[test]
fn test_sanitize_is_idempotent() {
    fn check<G: Seedable + Clone + PartialEq + std::fmt::Debug>(seed: [u32; 4]) {
        let mut rng = G::seeded(seed);
        let once = rng.clone();
        rng.sanitize();
        assert_eq!(rng, once, "{}", G::NAME);
    }
    for seed in [[0u32; 4], [u32::MAX; 4], [0x9068_FFFF, 0x464F_FFFF, 0, 0]] {
        check::<Cong>(seed);
        check::<Shr3>(seed);
        check::<Mwc1>(seed);
        check::<Mwc2>(seed);
        check::<Mwc64>(seed);
        check::<Kiss>(seed);
        check::<Kiss2>(seed);
        check::<Lfsr113>(seed);
        check::<Lfsr88>(seed);
    }
}

//! Jump-Ahead Tests
//!
//! `jump_ahead(n)` must land exactly where `n` calls to `advance` would:
//! - small counts checked against stepping, for every jumpable family
//! - jumps compose additively and wrap at the cycle length
//! - negative counts step backwards
//! - published far-jump values for KISS and LFSR113

use proptest::prelude::*;
use simplerandom_core_rs::{
    AnyGenerator, Cong, Family, Generator, JumpAhead, Kiss, Kiss2, Lfsr113, Lfsr88, Mwc1, Mwc2,
    Mwc64, RngError, Seedable, Shr3,
};
use std::fmt::Debug;

trait Jumpable: Seedable + JumpAhead + Clone + PartialEq + Debug {}
impl<G: Seedable + JumpAhead + Clone + PartialEq + Debug> Jumpable for G {}

fn stepped<G: Jumpable>(rng: &G, n: usize) -> G {
    let mut rng = rng.clone();
    for _ in 0..n {
        rng.advance();
    }
    rng
}

fn jumped<G: Jumpable>(rng: &G, n: i128) -> G {
    let mut rng = rng.clone();
    rng.jump_ahead(n);
    rng
}

fn check_matches_stepping<G: Jumpable>(seed: [u32; 4]) {
    let start = G::seeded(seed);
    for n in [0usize, 1, 2, 3, 17, 100, 1000] {
        let expected = stepped(&start, n);
        let actual = jumped(&start, n as i128);
        assert_eq!(actual, expected, "{} jump {}", G::NAME, n);
        assert_eq!(actual.current(), expected.current(), "{} jump {}", G::NAME, n);
    }
}

/// A seeded state stepped once, so LFSR lanes hold only reachable low bits
fn reachable<G: Jumpable>(seed: [u32; 4]) -> G {
    stepped(&G::seeded(seed), 1)
}

fn check_full_cycle<G: Jumpable>(seed: [u32; 4]) {
    let start = reachable::<G>(seed);
    let cycle = i128::try_from(G::cycle_len()).unwrap();
    assert_eq!(jumped(&start, cycle).state(), start.state(), "{}", G::NAME);
}

fn check_backwards<G: Jumpable>(seed: [u32; 4]) {
    let start = reachable::<G>(seed);
    let ahead = stepped(&start, 500);
    assert_eq!(jumped(&ahead, -500).state(), start.state(), "{}", G::NAME);
    assert_eq!(jumped(&ahead, -1).state(), stepped(&start, 499).state(), "{}", G::NAME);
}

const SEED: [u32; 4] = [2247183469, 99545079, 3269400377, 3950144837];

// ============================================================================
// Agreement with stepping
// ============================================================================

#[test]
fn test_jump_matches_stepping_all_families() {
    check_matches_stepping::<Cong>(SEED);
    check_matches_stepping::<Shr3>(SEED);
    check_matches_stepping::<Mwc1>(SEED);
    check_matches_stepping::<Mwc2>(SEED);
    check_matches_stepping::<Mwc64>(SEED);
    check_matches_stepping::<Kiss>(SEED);
    check_matches_stepping::<Kiss2>(SEED);
    check_matches_stepping::<Lfsr113>(SEED);
    check_matches_stepping::<Lfsr88>(SEED);
}

#[test]
fn test_full_cycle_is_identity() {
    check_full_cycle::<Cong>(SEED);
    check_full_cycle::<Shr3>(SEED);
    check_full_cycle::<Mwc1>(SEED);
    check_full_cycle::<Mwc2>(SEED);
    check_full_cycle::<Mwc64>(SEED);
    check_full_cycle::<Kiss>(SEED);
    check_full_cycle::<Kiss2>(SEED);
    check_full_cycle::<Lfsr113>(SEED);
    check_full_cycle::<Lfsr88>(SEED);
}

#[test]
fn test_negative_jump_steps_backwards() {
    check_backwards::<Cong>(SEED);
    check_backwards::<Shr3>(SEED);
    check_backwards::<Mwc1>(SEED);
    check_backwards::<Mwc2>(SEED);
    check_backwards::<Mwc64>(SEED);
    check_backwards::<Kiss>(SEED);
    check_backwards::<Kiss2>(SEED);
    check_backwards::<Lfsr113>(SEED);
    check_backwards::<Lfsr88>(SEED);
}

#[test]
fn test_cycle_lengths() {
    assert_eq!(Cong::cycle_len(), 1 << 32);
    assert_eq!(Shr3::cycle_len(), (1 << 32) - 1);
    assert_eq!(Mwc2::cycle_len(), 1211400191 * 589823999);
    assert_eq!(Mwc1::cycle_len(), Mwc2::cycle_len());
    assert_eq!(
        Kiss::cycle_len(),
        Mwc2::cycle_len() * Cong::cycle_len() * Shr3::cycle_len()
    );
}

// ============================================================================
// Published values
// ============================================================================

#[test]
fn test_kiss_far_jump() {
    let mut rng = Kiss::new(SEED[0], SEED[1], SEED[2], SEED[3]);
    rng.jump_ahead(10i128.pow(30));
    assert_eq!(rng.state(), [767358716, 726909964, 2195658553, 1856241861]);
    assert_eq!(rng.advance(), 2183402675);
}

#[test]
fn test_lfsr113_backwards_jump() {
    let mut rng = Lfsr113::new([1, 2, 3, 4]);
    rng.jump_ahead(-12345);
    assert_eq!(rng.state(), [2226068909, 243400409, 384840734, 564118268]);
    assert_eq!(rng.advance(), 3096494003);
}

#[test]
fn test_lfsr_fresh_seed_low_bits() {
    let fresh = Lfsr88::seeded(SEED);
    assert_eq!(fresh.lanes(), [3382463597, 3927568375, 3588626233]);

    // lanes wrap independently, so a whole cycle is a no-op even here
    let cycle = i128::try_from(Lfsr88::cycle_len()).unwrap();
    assert_eq!(jumped(&fresh, cycle), fresh);

    // stepping back lands on the reachable predecessor, not the seed
    let back = jumped(&stepped(&fresh, 1), -1);
    assert_eq!(back.lanes(), [3382463596, 3927568370, 3588626231]);
    assert_ne!(back, fresh);
    assert_eq!(stepped(&back, 1), stepped(&fresh, 1));
}

// ============================================================================
// Runtime surface
// ============================================================================

#[test]
fn test_any_generator_jump_matches_static() {
    let mut dynamic = AnyGenerator::new(Family::Kiss2, SEED, false).unwrap();
    dynamic.jump_ahead(123_456_789).unwrap();
    let mut fixed = Kiss2::seeded(SEED);
    fixed.jump_ahead(123_456_789);
    assert_eq!(dynamic.state_words(), fixed.state().to_vec());
}

#[test]
fn test_any_generator_jump_unsupported() {
    for (family, name) in [
        (Family::Lfib4, "LFIB4"),
        (Family::Swb, "SWB"),
        (Family::Kiss1999, "KISS1999"),
    ] {
        let mut rng = AnyGenerator::default_for(family);
        let before = rng.clone();
        assert_eq!(rng.jump_ahead(10), Err(RngError::JumpAheadUnsupported(name)));
        assert_eq!(rng, before);
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: jump(a) then jump(b) equals jump(a + b).
    #[test]
    fn prop_jumps_compose(seed in any::<[u32; 4]>(), a in -(1i128 << 100)..(1i128 << 100), b in -(1i128 << 100)..(1i128 << 100)) {
        let start = Kiss2::seeded(seed);
        let mut twice = start.clone();
        twice.jump_ahead(a);
        twice.jump_ahead(b);
        prop_assert_eq!(twice, jumped(&start, a + b));

        let start = reachable::<Lfsr88>(seed);
        let mut twice = start.clone();
        twice.jump_ahead(a);
        twice.jump_ahead(b);
        prop_assert_eq!(twice, jumped(&start, a + b));
    }

    /// Property: jumping n then -n returns to the start.
    #[test]
    fn prop_jump_round_trip(seed in any::<[u32; 4]>(), n in any::<i64>()) {
        let start = Kiss::seeded(seed);
        let there = jumped(&start, i128::from(n));
        prop_assert_eq!(jumped(&there, -i128::from(n)).state(), start.state());
    }
}

//! Configuration Tests
//!
//! JSON configs and runtime family selection:
//! - family parsing and naming
//! - seed fragments in JSON (integers, null, nested, decimal strings)
//! - rejection of unknown fields and bad fragments
//! - `AnyGenerator` agreeing with the static types

use simplerandom_core_rs::{
    AnyGenerator, Cong, Family, GeneratorConfig, Generator, Kiss2, Lfsr113, Mwc64, RngError, Seed,
    Seedable,
};

// ============================================================================
// Family
// ============================================================================

#[test]
fn test_family_round_trip_through_str() {
    for family in Family::ALL {
        assert_eq!(family.key().parse::<Family>().unwrap(), family);
        assert_eq!(family.name().parse::<Family>().unwrap(), family);
        assert_eq!(family.to_string(), family.name());
    }
}

#[test]
fn test_family_parse_ignores_case_and_padding() {
    assert_eq!("KISS2".parse::<Family>().unwrap(), Family::Kiss2);
    assert_eq!(" Lfsr113 ".parse::<Family>().unwrap(), Family::Lfsr113);
    assert!("kiss 2".parse::<Family>().is_err());
}

#[test]
fn test_unknown_family() {
    assert_eq!(
        "xorshift".parse::<Family>(),
        Err(RngError::UnknownFamily("xorshift".to_string()))
    );
    let err = GeneratorConfig::from_json(r#"{"family": "xorshift"}"#).unwrap_err();
    assert!(matches!(err, RngError::InvalidConfig(_)));
}

#[test]
fn test_seedable_families() {
    let unseedable: Vec<Family> = Family::ALL
        .into_iter()
        .filter(|family| !family.is_seedable())
        .collect();
    assert_eq!(unseedable, vec![Family::Kiss1999, Family::Lfib4, Family::Swb]);
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_minimal_config_uses_defaults() {
    let config = GeneratorConfig::from_json(r#"{"family": "kiss2"}"#).unwrap();
    assert_eq!(config, GeneratorConfig::new(Family::Kiss2));
    assert_eq!(config.build().unwrap(), AnyGenerator::Kiss2(Kiss2::default()));
}

#[test]
fn test_unknown_field_rejected() {
    let err = GeneratorConfig::from_json(r#"{"family": "cong", "sed": [1]}"#).unwrap_err();
    match err {
        RngError::InvalidConfig(message) => assert!(message.contains("sed"), "{}", message),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_malformed_json_rejected() {
    assert!(matches!(
        GeneratorConfig::from_json("{\"family\": "),
        Err(RngError::InvalidConfig(_))
    ));
}

#[test]
fn test_decimal_string_seed() {
    let config = GeneratorConfig::from_json(
        r#"{"family": "lfsr113", "seed": ["79228162514264337593543950341"]}"#,
    )
    .unwrap();
    // 2^96 + 5
    assert_eq!(
        config.build().unwrap(),
        AnyGenerator::Lfsr113(Lfsr113::seeded((1u128 << 96) + 5))
    );
}

#[test]
fn test_bad_decimal_string_rejected() {
    let config =
        GeneratorConfig::from_json(r#"{"family": "cong", "seed": ["twelve"]}"#).unwrap();
    assert!(config.build().is_err());
}

#[test]
fn test_object_seed_fragment_rejected() {
    let config =
        GeneratorConfig::from_json(r#"{"family": "cong", "seed": [{"a": 1}]}"#).unwrap();
    assert!(matches!(config.build(), Err(RngError::InvalidConfig(_))));
}

#[test]
fn test_null_fragment_takes_default() {
    let config =
        GeneratorConfig::from_json(r#"{"family": "mwc64", "seed": [null, 7]}"#).unwrap();
    let expected = Mwc64::seeded(Seed::Seq(vec![Seed::Absent, Seed::from(7u32)]));
    assert_eq!(config.build().unwrap(), AnyGenerator::Mwc64(expected));
}

#[test]
fn test_mix_extras_flag() {
    let config = GeneratorConfig::from_json(
        r#"{"family": "kiss2", "seed": [1, 2, 3, 4, 5, 6], "mix_extras": true}"#,
    )
    .unwrap();
    let mut rng = config.build().unwrap();
    assert_eq!(rng.state_words(), vec![0, 1397538142, 3, 540738]);
    assert_eq!(rng.advance(), 1499226664);
}

#[test]
fn test_config_json_round_trip() {
    let mut config = GeneratorConfig::new(Family::Lfsr88);
    config.seed = vec![serde_json::json!(1), serde_json::json!([2, 3])];
    config.mix_extras = true;
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(GeneratorConfig::from_json(&json).unwrap(), config);
}

// ============================================================================
// AnyGenerator
// ============================================================================

#[test]
fn test_any_generator_matches_static_type() {
    let mut dynamic = AnyGenerator::new(Family::Cong, 2051391225u32, false).unwrap();
    let mut fixed = Cong::seeded(2051391225u32);
    for _ in 0..100 {
        assert_eq!(dynamic.advance(), fixed.advance());
    }
    assert_eq!(dynamic.current(), fixed.current());
}

#[test]
fn test_any_generator_iterator_and_display() {
    let rng = AnyGenerator::default_for(Family::Kiss2);
    assert_eq!(rng.to_string(), "KISS2(102352882, 5, 0, 4294967295)");
    let outputs: Vec<u32> = rng.take(3).collect();
    let expected: Vec<u32> = Kiss2::default().take(3).collect();
    assert_eq!(outputs, expected);
}

#[test]
fn test_any_generator_mix() {
    let mut dynamic = AnyGenerator::default_for(Family::Lfsr113);
    let returned = dynamic.mix([1u32, 2, 3]).unwrap();
    let mut fixed = Lfsr113::default();
    assert_eq!(returned, fixed.mix([1u32, 2, 3]));
    assert_eq!(dynamic.state_words(), fixed.state().to_vec());
}

#[test]
fn test_mix_unsupported_families() {
    let mut rng = AnyGenerator::default_for(Family::Swb);
    assert_eq!(rng.mix(5u32), Err(RngError::MixUnsupported("SWB")));

    assert_eq!(
        AnyGenerator::new(Family::Kiss1999, Seed::none(), true),
        Err(RngError::MixUnsupported("KISS1999"))
    );
}

#[test]
fn test_state_length_error() {
    let mut rng = AnyGenerator::default_for(Family::Mwc64);
    assert_eq!(
        rng.set_state_words(&[1, 2, 3]),
        Err(RngError::StateLength {
            family: "MWC64",
            expected: 2,
            actual: 3
        })
    );
}

#[test]
fn test_every_family_builds_from_empty_config() {
    for family in Family::ALL {
        let built = GeneratorConfig::new(family).build().unwrap();
        assert_eq!(built, AnyGenerator::default_for(family), "{}", family);
    }
}

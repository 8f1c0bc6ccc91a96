use super::*;

#[test]
fn test_default_profile_is_neutral() {
    let rules = ScoringRules::default_v1();
    assert_eq!(rules.flags, FlagMultipliers::neutral());
    assert_eq!(rules.static_score_default.get(Category::Academic), 250.0);
    assert_eq!(rules.static_score_default.get(Category::Clubs), 0.0);
    assert_eq!(rules.leader_limits.get(Category::Academic), 10);
    assert_eq!(rules.leader_limits.get(Category::Clubs), 3);
    assert_eq!(rules.altitude.get(Category::Academic).apply(71.357), 71.357);
}

#[test]
fn test_strict_profile_only_changes_flags() {
    let base = ScoringRules::default_v1();
    let strict = base.clone().with_strict_flags();
    assert_eq!(strict.flags.external_pilot, 0.75);
    assert_eq!(strict.flags.illegal_flight, 0.0);
    assert_eq!(strict.flags.crash_landing, 0.5);
    assert_eq!(strict.altitude, base.altitude);
    assert_eq!(strict.static_score_default, base.static_score_default);
}

#[test]
fn test_altitude_ceil_and_cap() {
    let rule = AltitudeRule {
        rounding: AltitudeRounding::CeilTenth,
        cap: None,
    };
    assert!((rule.apply(71.357) - 71.4).abs() < 1e-9);

    let capped = AltitudeRule {
        rounding: AltitudeRounding::CeilTenth,
        cap: Some(50.0),
    };
    assert_eq!(capped.apply(71.357), 50.0);
}

#[test]
fn test_partial_json_profile_keeps_defaults() {
    let json = r#"{
        "altitude": {
            "academic": {"rounding": "ceil_tenth", "cap": 100.0},
            "clubs": {}
        },
        "flags": {"crash_landing": 0.5}
    }"#;
    let rules: ScoringRules = serde_json::from_str(json).unwrap();
    assert_eq!(
        rules.altitude.get(Category::Academic).rounding,
        AltitudeRounding::CeilTenth
    );
    assert_eq!(rules.altitude.get(Category::Clubs), AltitudeRule::default());
    assert_eq!(rules.flags.crash_landing, 0.5);
    assert_eq!(rules.flags.external_pilot, 1.0);
    assert_eq!(rules.static_score_default.get(Category::Academic), 250.0);
}

#[test]
fn test_single_category_profile() {
    let rules: ScoringRules =
        serde_json::from_str(r#"{"altitude": {"academic": {"cap": 50.0}}}"#).unwrap();
    assert_eq!(rules.altitude.get(Category::Academic).cap, Some(50.0));
    assert_eq!(rules.altitude.get(Category::Clubs), AltitudeRule::default());
    assert_eq!(rules.flags, FlagMultipliers::neutral());

    let rules: ScoringRules =
        serde_json::from_str(r#"{"static_score_default": {"academic": 300.0}}"#).unwrap();
    assert_eq!(rules.static_score_default.get(Category::Academic), 300.0);
    assert_eq!(rules.static_score_default.get(Category::Clubs), 0.0);
    assert_eq!(rules.leader_limits.get(Category::Clubs), 3);
}

#[test]
fn test_empty_profile_is_default() {
    let rules: ScoringRules = serde_json::from_str("{}").unwrap();
    assert_eq!(rules, ScoringRules::default_v1());
}

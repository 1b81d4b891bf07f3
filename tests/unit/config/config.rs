use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = EngineConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, EngineConfig::default());
    cfg.validate().unwrap();
    assert_eq!(cfg.timeline.initial_clips, 16);
    assert_eq!(cfg.layout.rates.medium, 1.0 / 200.0);
    assert_eq!(cfg.layout.markup_large.period, 12);
    assert_eq!(cfg.layout.markup_compact.semicolon, 4);
    assert_eq!(cfg.seed, None);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let cfg = EngineConfig::from_json_str(
        r##"{
            "layout": {"rates": {"medium": 0.0025}},
            "palette": {"grey": "#336699"},
            "seed": 42
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.layout.rates.medium, 0.0025);
    assert_eq!(cfg.layout.rates.slow, 1.0 / 20.0);
    assert_eq!(cfg.palette.grey.to_rgba8_premul(), [0x33, 0x66, 0x99, 0xff]);
    assert_eq!(cfg.palette.black, Color::BLACK);
    assert_eq!(cfg.seed, Some(42));
}

#[test]
fn unknown_fields_are_rejected() {
    let err = EngineConfig::from_json_str(r#"{"timeline": {"initial_dealy": 3}}"#).unwrap_err();
    assert!(matches!(err, KinetypeError::Serde(_)));
}

#[test]
fn validation_rejects_zero_rates() {
    let mut cfg = EngineConfig::default();
    cfg.layout.rates.fast = 0.0;
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("layout.rates.fast"));
}

#[test]
fn validation_rejects_inverted_breakpoints() {
    let mut cfg = EngineConfig::default();
    cfg.layout.breakpoints.large = 10;
    assert!(cfg.validate().is_err());
}

#[test]
fn serializes_back_to_loadable_json() {
    let cfg = EngineConfig::default();
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(EngineConfig::from_json_str(&json).unwrap(), cfg);
}

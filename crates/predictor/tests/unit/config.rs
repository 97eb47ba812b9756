//! # Configuration Tests
//!
//! Tests for configuration structures, JSON deserialization, defaults, and
//! validation.

use bpsim_core::common::{ConfigError, MAX_TABLE_BITS};
use bpsim_core::config::*;
use rstest::rstest;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.branch_predictor, BranchPredictor::Static);
    assert!(!config.verbose);
    assert!(config.validate().is_ok());
}

#[test]
fn test_gshare_config_defaults() {
    assert_eq!(GshareConfig::default().ghistory_bits, 17);
}

#[test]
fn test_tournament_config_defaults() {
    let tournament = TournamentConfig::default();
    assert_eq!(tournament.ghistory_bits, 17);
    assert_eq!(tournament.lhistory_bits, 17);
    assert_eq!(tournament.chooser_bits, 17);
}

#[test]
fn test_custom_config_defaults() {
    let custom = CustomConfig::default();
    assert_eq!(custom.ghistory_bits, 13);
    assert_eq!(custom.lhistory_bits, 12);
    assert_eq!(custom.chooser_bits, 13);
    assert_eq!(custom.num_perceptrons, 256);
    assert_eq!(custom.history_length, 24);
    assert_eq!(custom.threshold, None);
    assert_eq!(custom.gate_threshold, 60);
}

#[test]
fn test_effective_threshold() {
    let mut custom = CustomConfig::default();
    // floor(1.93 * 24 + 14) = 60
    assert_eq!(custom.effective_threshold(), 60);

    custom.history_length = 62;
    // floor(1.93 * 62 + 14) = 133
    assert_eq!(custom.effective_threshold(), 133);

    custom.threshold = Some(9);
    assert_eq!(custom.effective_threshold(), 9);
}

#[test]
fn test_empty_json_uses_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.branch_predictor, BranchPredictor::Static);
    assert_eq!(config.gshare.ghistory_bits, 17);
    assert_eq!(config.custom.history_length, 24);
}

#[test]
fn test_partial_section_fills_defaults() {
    let json = r#"{
        "branch_predictor": "Custom",
        "verbose": true,
        "custom": { "num_perceptrons": 100, "gate_threshold": 128 }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.branch_predictor, BranchPredictor::Custom);
    assert!(config.verbose);
    assert_eq!(config.custom.num_perceptrons, 100);
    assert_eq!(config.custom.gate_threshold, 128);
    assert_eq!(config.custom.ghistory_bits, 13);
    assert_eq!(config.custom.history_length, 24);
}

#[rstest]
#[case("\"Static\"", BranchPredictor::Static)]
#[case("\"Gshare\"", BranchPredictor::Gshare)]
#[case("\"GShare\"", BranchPredictor::Gshare)]
#[case("\"GSHARE\"", BranchPredictor::Gshare)]
#[case("\"Tournament\"", BranchPredictor::Tournament)]
#[case("\"Custom\"", BranchPredictor::Custom)]
fn test_predictor_names_deserialize(#[case] json: &str, #[case] expected: BranchPredictor) {
    let bp: BranchPredictor = serde_json::from_str(json).unwrap();
    assert_eq!(bp, expected);
}

#[test]
fn test_unknown_predictor_name_is_parse_error() {
    let err = Config::from_json(r#"{ "branch_predictor": "Tage" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let err = Config::from_json("{ \"gshare\": ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("failed to parse predictor configuration"));
}

#[rstest]
#[case(0, Some(BranchPredictor::Static))]
#[case(1, Some(BranchPredictor::Gshare))]
#[case(2, Some(BranchPredictor::Tournament))]
#[case(3, Some(BranchPredictor::Custom))]
#[case(4, None)]
#[case(u32::MAX, None)]
fn test_from_raw_tag(#[case] tag: u32, #[case] expected: Option<BranchPredictor>) {
    assert_eq!(BranchPredictor::from_raw(tag), expected);
}

#[test]
fn test_predictor_display_names() {
    let names: Vec<String> = [
        BranchPredictor::Static,
        BranchPredictor::Gshare,
        BranchPredictor::Tournament,
        BranchPredictor::Custom,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    assert_eq!(names, ["Static", "Gshare", "Tournament", "Custom"]);
}

#[rstest]
#[case(0)]
#[case(MAX_TABLE_BITS + 1)]
fn test_gshare_width_out_of_range(#[case] bits: usize) {
    let config = Config {
        branch_predictor: BranchPredictor::Gshare,
        gshare: GshareConfig { ghistory_bits: bits },
        ..Config::default()
    };
    match config.validate() {
        Err(ConfigError::TableBits { field, bits: got }) => {
            assert_eq!(field, "gshare.ghistory_bits");
            assert_eq!(got, bits);
        }
        other => panic!("expected TableBits error, got {other:?}"),
    }
}

#[test]
fn test_tournament_reports_offending_field() {
    let json = r#"{
        "branch_predictor": "Tournament",
        "tournament": { "chooser_bits": 40 }
    }"#;
    let err = Config::from_json(json).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("tournament.chooser_bits must be in 1..={MAX_TABLE_BITS}, got 40")
    );
}

#[test]
fn test_custom_validation_errors() {
    let base = Config::with_predictor(BranchPredictor::Custom);

    let mut config = base.clone();
    config.custom.num_perceptrons = 0;
    assert!(matches!(config.validate(), Err(ConfigError::NoPerceptrons)));

    let mut config = base.clone();
    config.custom.history_length = 64;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PerceptronHistory(64))
    ));

    let mut config = base.clone();
    config.custom.history_length = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PerceptronHistory(0))
    ));

    let mut config = base.clone();
    config.custom.threshold = Some(-1);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NegativeThreshold(-1))
    ));

    let mut config = base.clone();
    config.custom.gate_threshold = 256;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::GateThreshold(256))
    ));

    let mut config = base;
    config.custom.lhistory_bits = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::TableBits {
            field: "custom.lhistory_bits",
            bits: 0
        })
    ));
}

/// Sections belonging to other strategies are not validated.
#[test]
fn test_unselected_sections_are_ignored() {
    let mut config = Config::with_predictor(BranchPredictor::Gshare);
    config.custom.history_length = 0;
    config.tournament.ghistory_bits = 0;
    assert!(config.validate().is_ok());
}

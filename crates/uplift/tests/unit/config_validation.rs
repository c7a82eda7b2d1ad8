//! Tests for configuration validation.
//!
//! These tests verify that invalid configuration values are rejected
//! by the builder methods with appropriate panic messages.

use uplift::{Analyzer, Config};

// =============================================================================
// ALPHA / POWER / CONFIDENCE
// =============================================================================

#[test]
#[should_panic(expected = "alpha must be in (0, 1)")]
fn alpha_zero_panics() {
    let _ = Analyzer::new().alpha(0.0);
}

#[test]
#[should_panic(expected = "alpha must be in (0, 1)")]
fn alpha_one_panics() {
    let _ = Analyzer::new().alpha(1.0);
}

#[test]
#[should_panic(expected = "alpha must be in (0, 1)")]
fn alpha_nan_panics() {
    let _ = Analyzer::new().alpha(f64::NAN);
}

#[test]
fn alpha_valid() {
    let analyzer = Analyzer::new().alpha(0.001);
    assert_eq!(analyzer.config().alpha, 0.001);
}

#[test]
#[should_panic(expected = "power must be in (0, 1)")]
fn power_one_panics() {
    let _ = Analyzer::new().power(1.0);
}

#[test]
fn power_valid() {
    let analyzer = Analyzer::new().power(0.95);
    assert_eq!(analyzer.config().power, 0.95);
}

#[test]
#[should_panic(expected = "confidence must be in (0, 1)")]
fn confidence_negative_panics() {
    let _ = Analyzer::new().confidence(-0.95);
}

// =============================================================================
// TRAFFIC SPLIT
// =============================================================================

#[test]
#[should_panic(expected = "expected_treatment_ratio must be in (0, 1)")]
fn treatment_ratio_one_panics() {
    let _ = Analyzer::new().expected_treatment_ratio(1.0);
}

#[test]
#[should_panic(expected = "srm_critical_value must be > 0")]
fn srm_critical_value_zero_panics() {
    let _ = Analyzer::new().srm_critical_value(0.0);
}

#[test]
#[should_panic(expected = "srm_critical_value must be > 0")]
fn srm_critical_value_infinite_panics() {
    let _ = Analyzer::new().srm_critical_value(f64::INFINITY);
}

// =============================================================================
// DECISION AND PLANNING THRESHOLDS
// =============================================================================

#[test]
#[should_panic(expected = "small_effect_threshold must be >= 0")]
fn small_effect_threshold_negative_panics() {
    let _ = Analyzer::new().small_effect_threshold(-0.01);
}

#[test]
fn small_effect_threshold_zero_valid() {
    // Zero disables the small-effect flag.
    let analyzer = Analyzer::new().small_effect_threshold(0.0);
    assert_eq!(analyzer.config().small_effect_threshold, 0.0);
}

#[test]
#[should_panic(expected = "minimum_detectable_effect must be non-zero")]
fn mde_zero_panics() {
    let _ = Analyzer::new().minimum_detectable_effect(0.0);
}

#[test]
fn mde_negative_valid() {
    let analyzer = Analyzer::new().minimum_detectable_effect(-0.05);
    assert_eq!(analyzer.config().minimum_detectable_effect, Some(-0.05));
}

#[test]
#[should_panic(expected = "sample_size_buffer must be >= 0")]
fn buffer_negative_panics() {
    let _ = Analyzer::new().sample_size_buffer(-0.1);
}

// =============================================================================
// PRESETS AND ENVIRONMENT
// =============================================================================

#[test]
fn presets_round_trip_through_analyzer() {
    assert_eq!(Analyzer::strict().config(), &Config::strict());
    assert_eq!(Analyzer::exploratory().config(), &Config::exploratory());
    assert_eq!(Analyzer::default().config(), &Config::default());
}

#[test]
fn builder_chain_keeps_earlier_settings() {
    let analyzer = Analyzer::strict()
        .expected_treatment_ratio(0.2)
        .minimum_detectable_effect(0.03);
    let config = analyzer.config();
    assert_eq!(config.alpha, 0.01);
    assert_eq!(config.expected_treatment_ratio, 0.2);
    assert_eq!(config.minimum_detectable_effect, Some(0.03));
}

#[test]
fn env_overrides_are_applied_and_validated() {
    // The only test in this binary that touches UPLIFT_* variables.
    std::env::set_var(uplift::ENV_ALPHA, "0.01");
    std::env::set_var(uplift::ENV_POWER, "2.0");
    std::env::set_var(uplift::ENV_SRM_CRITICAL_VALUE, "6.635");
    std::env::set_var(uplift::ENV_SMALL_EFFECT_THRESHOLD, "not a number");

    let config = Config::from_env_or(Config::default());

    std::env::remove_var(uplift::ENV_ALPHA);
    std::env::remove_var(uplift::ENV_POWER);
    std::env::remove_var(uplift::ENV_SRM_CRITICAL_VALUE);
    std::env::remove_var(uplift::ENV_SMALL_EFFECT_THRESHOLD);

    assert_eq!(config.alpha, 0.01);
    assert_eq!(config.power, 0.8, "out-of-range power must be ignored");
    assert_eq!(config.srm_critical_value, 6.635);
    assert_eq!(config.small_effect_threshold, 0.01, "garbage must be ignored");
    assert_eq!(config.confidence, 0.95);
}

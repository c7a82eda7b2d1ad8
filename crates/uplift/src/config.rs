//! Configuration for experiment planning and analysis.

use uplift_core::constants::{
    DEFAULT_ALPHA, DEFAULT_CONFIDENCE, DEFAULT_POWER, DEFAULT_SAMPLE_SIZE_BUFFER,
    DEFAULT_SMALL_EFFECT_THRESHOLD, DEFAULT_TREATMENT_RATIO, SRM_CRITICAL_VALUE,
};
use uplift_core::ClassifierConfig;

/// Environment variable overriding [`Config::alpha`].
pub const ENV_ALPHA: &str = "UPLIFT_ALPHA";
/// Environment variable overriding [`Config::power`].
pub const ENV_POWER: &str = "UPLIFT_POWER";
/// Environment variable overriding [`Config::confidence`].
pub const ENV_CONFIDENCE: &str = "UPLIFT_CONFIDENCE";
/// Environment variable overriding [`Config::srm_critical_value`].
pub const ENV_SRM_CRITICAL_VALUE: &str = "UPLIFT_SRM_CRITICAL_VALUE";
/// Environment variable overriding [`Config::small_effect_threshold`].
pub const ENV_SMALL_EFFECT_THRESHOLD: &str = "UPLIFT_SMALL_EFFECT_THRESHOLD";

/// Configuration options for [`Analyzer`](crate::Analyzer).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // =========================================================================
    // Significance and power
    // =========================================================================
    /// Two-sided significance level for the proportion test and the planner.
    ///
    /// Default: 0.05.
    pub alpha: f64,

    /// Power used when planning sample sizes and judging inconclusive results.
    ///
    /// Default: 0.8.
    pub power: f64,

    /// Confidence level of the uplift interval.
    ///
    /// Default: 0.95.
    pub confidence: f64,

    // =========================================================================
    // Traffic split
    // =========================================================================
    /// Share of traffic intended for treatment.
    ///
    /// Default: 0.5.
    pub expected_treatment_ratio: f64,

    /// Chi-square threshold (1 df) for sample ratio mismatch.
    ///
    /// Default: 10.828 (α = 0.001).
    pub srm_critical_value: f64,

    // =========================================================================
    // Decision thresholds
    // =========================================================================
    /// Relative uplift below which a significant win is flagged as small.
    ///
    /// Default: 0.01 (1%).
    pub small_effect_threshold: f64,

    /// Relative effect the test was designed to detect.
    ///
    /// Used by the planner shortcut and for low-power flags on inconclusive
    /// results. Default: None.
    pub minimum_detectable_effect: Option<f64>,

    // =========================================================================
    // Planning
    // =========================================================================
    /// Safety buffer applied to planned sample sizes.
    ///
    /// Default: 0.10 (10%).
    pub sample_size_buffer: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            power: DEFAULT_POWER,
            confidence: DEFAULT_CONFIDENCE,
            expected_treatment_ratio: DEFAULT_TREATMENT_RATIO,
            srm_critical_value: SRM_CRITICAL_VALUE,
            small_effect_threshold: DEFAULT_SMALL_EFFECT_THRESHOLD,
            minimum_detectable_effect: None,
            sample_size_buffer: DEFAULT_SAMPLE_SIZE_BUFFER,
        }
    }
}

impl Config {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Conservative settings for high-stakes launches.
    ///
    /// - α = 0.01, 99% intervals
    /// - 90% power
    /// - 2% small-effect threshold
    pub fn strict() -> Self {
        Self {
            alpha: 0.01,
            power: 0.9,
            confidence: 0.99,
            small_effect_threshold: 0.02,
            ..Default::default()
        }
    }

    /// Permissive settings for early, low-risk exploration.
    ///
    /// - α = 0.10, 90% intervals
    /// - no safety buffer on planned sizes
    pub fn exploratory() -> Self {
        Self {
            alpha: 0.10,
            confidence: 0.90,
            sample_size_buffer: 0.0,
            ..Default::default()
        }
    }

    /// Apply overrides from `UPLIFT_*` environment variables on top of `default`.
    ///
    /// Values that do not parse or fall outside their valid range are ignored
    /// and logged at warn level.
    pub fn from_env_or(default: Self) -> Self {
        let mut config = default;
        if let Some(v) = read_env(ENV_ALPHA, is_open_unit) {
            config.alpha = v;
        }
        if let Some(v) = read_env(ENV_POWER, is_open_unit) {
            config.power = v;
        }
        if let Some(v) = read_env(ENV_CONFIDENCE, is_open_unit) {
            config.confidence = v;
        }
        if let Some(v) = read_env(ENV_SRM_CRITICAL_VALUE, |v| v.is_finite() && v > 0.0) {
            config.srm_critical_value = v;
        }
        if let Some(v) = read_env(ENV_SMALL_EFFECT_THRESHOLD, |v| v.is_finite() && v >= 0.0) {
            config.small_effect_threshold = v;
        }
        config
    }

    /// Thresholds handed to the decision classifier.
    pub fn classifier(&self) -> ClassifierConfig {
        ClassifierConfig {
            alpha: self.alpha,
            small_effect_threshold: self.small_effect_threshold,
            minimum_detectable_effect: self.minimum_detectable_effect,
            target_power: self.power,
        }
    }
}

fn is_open_unit(v: f64) -> bool {
    v > 0.0 && v < 1.0
}

fn read_env(name: &str, valid: impl Fn(f64) -> bool) -> Option<f64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<f64>() {
        Ok(v) if valid(v) => Some(v),
        _ => {
            tracing::warn!(variable = name, value = %raw, "ignoring invalid override");
            None
        }
    }
}

//! `Analyzer` entry point and builder.

use serde::{Deserialize, Serialize};
use uplift_core::analysis::{achieved_power, effect_size, evaluate};
use uplift_core::decision::classify_with;
use uplift_core::planning::plan_with_buffer;
use uplift_core::srm::check_with_critical_value;
use uplift_core::{
    EffectSize, GuardrailMetric, ProportionTestResult, SampleSizePlan, SrmResult, StatsError,
    VariantObservation, Verdict,
};

use crate::config::Config;
use crate::engine::{log_srm, log_verdict};

/// Everything computed for one finished experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Traffic split check.
    pub srm: SrmResult,

    /// Two-proportion z-test.
    pub test: ProportionTestResult,

    /// Standardized effect size.
    pub effect_size: EffectSize,

    /// Power against the configured design effect, if one was set.
    pub achieved_power: Option<f64>,

    /// Recommendation and rationale.
    pub verdict: Verdict,
}

/// Main entry point for planning and analyzing experiments.
///
/// Use the builder pattern to configure thresholds, then call [`plan`] before
/// the test or [`analyze`] after it.
///
/// # Example
///
/// ```ignore
/// use uplift::{Analyzer, VariantObservation};
///
/// let control = VariantObservation::new("control", 10_000, 1_000)?;
/// let treatment = VariantObservation::new("treatment", 10_000, 1_120)?;
///
/// let analysis = Analyzer::new()
///     .alpha(0.05)
///     .minimum_detectable_effect(0.1)
///     .analyze(&control, &treatment, &[])?;
///
/// println!("{}", analysis.verdict);
/// ```
///
/// [`plan`]: Analyzer::plan
/// [`analyze`]: Analyzer::analyze
#[derive(Debug, Clone, PartialEq)]
pub struct Analyzer {
    config: Config,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create with [`Config::strict`] settings.
    pub fn strict() -> Self {
        Self::with_config(Config::strict())
    }

    /// Create with [`Config::exploratory`] settings.
    pub fn exploratory() -> Self {
        Self::with_config(Config::exploratory())
    }

    /// Create from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the significance level.
    ///
    /// # Panics
    ///
    /// Panics if `alpha` is not in (0, 1).
    pub fn alpha(mut self, alpha: f64) -> Self {
        assert!(
            alpha > 0.0 && alpha < 1.0,
            "alpha must be in (0, 1), got {}",
            alpha
        );
        self.config.alpha = alpha;
        self
    }

    /// Set the target power.
    ///
    /// # Panics
    ///
    /// Panics if `power` is not in (0, 1).
    pub fn power(mut self, power: f64) -> Self {
        assert!(
            power > 0.0 && power < 1.0,
            "power must be in (0, 1), got {}",
            power
        );
        self.config.power = power;
        self
    }

    /// Set the confidence level of the uplift interval.
    ///
    /// # Panics
    ///
    /// Panics if `confidence` is not in (0, 1).
    pub fn confidence(mut self, confidence: f64) -> Self {
        assert!(
            confidence > 0.0 && confidence < 1.0,
            "confidence must be in (0, 1), got {}",
            confidence
        );
        self.config.confidence = confidence;
        self
    }

    /// Set the intended share of traffic in treatment.
    ///
    /// # Panics
    ///
    /// Panics if `ratio` is not in (0, 1).
    pub fn expected_treatment_ratio(mut self, ratio: f64) -> Self {
        assert!(
            ratio > 0.0 && ratio < 1.0,
            "expected_treatment_ratio must be in (0, 1), got {}",
            ratio
        );
        self.config.expected_treatment_ratio = ratio;
        self
    }

    /// Set the chi-square threshold for sample ratio mismatch.
    ///
    /// # Panics
    ///
    /// Panics if `critical_value` is not positive and finite.
    pub fn srm_critical_value(mut self, critical_value: f64) -> Self {
        assert!(
            critical_value.is_finite() && critical_value > 0.0,
            "srm_critical_value must be > 0, got {}",
            critical_value
        );
        self.config.srm_critical_value = critical_value;
        self
    }

    /// Set the relative uplift below which a win is flagged as small.
    ///
    /// # Panics
    ///
    /// Panics if `threshold` is negative or not finite.
    pub fn small_effect_threshold(mut self, threshold: f64) -> Self {
        assert!(
            threshold.is_finite() && threshold >= 0.0,
            "small_effect_threshold must be >= 0, got {}",
            threshold
        );
        self.config.small_effect_threshold = threshold;
        self
    }

    /// Set the relative effect the test is designed to detect.
    ///
    /// # Panics
    ///
    /// Panics if `mde` is zero or not finite.
    pub fn minimum_detectable_effect(mut self, mde: f64) -> Self {
        assert!(
            mde.is_finite() && mde != 0.0,
            "minimum_detectable_effect must be non-zero, got {}",
            mde
        );
        self.config.minimum_detectable_effect = Some(mde);
        self
    }

    /// Set the safety buffer applied to planned sample sizes.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is negative or not finite.
    pub fn sample_size_buffer(mut self, buffer: f64) -> Self {
        assert!(
            buffer.is_finite() && buffer >= 0.0,
            "sample_size_buffer must be >= 0, got {}",
            buffer
        );
        self.config.sample_size_buffer = buffer;
        self
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Plan a test at `baseline_rate` for a relative effect of `mde`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Range`] for inputs outside their documented domain.
    pub fn plan(&self, baseline_rate: f64, mde: f64) -> Result<SampleSizePlan, StatsError> {
        let plan = plan_with_buffer(
            baseline_rate,
            mde,
            self.config.alpha,
            self.config.power,
            self.config.sample_size_buffer,
        )?;
        tracing::debug!(
            baseline_rate,
            mde,
            per_variant = plan.per_variant,
            total = plan.total,
            "planned sample size"
        );
        Ok(plan)
    }

    /// Run the full pipeline: SRM gate, z-test, effect size, classification.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Range`] if either arm is empty, the control rate
    /// is zero, or a configured threshold is invalid.
    pub fn analyze(
        &self,
        control: &VariantObservation,
        treatment: &VariantObservation,
        guardrails: &[GuardrailMetric],
    ) -> Result<Analysis, StatsError> {
        let span = tracing::debug_span!(
            "analyze",
            control = control.name(),
            treatment = treatment.name()
        );
        let _enter = span.enter();

        let srm = check_with_critical_value(
            control,
            treatment,
            self.config.expected_treatment_ratio,
            self.config.srm_critical_value,
        )?;
        log_srm(control, treatment, &srm);

        let test = evaluate(control, treatment, self.config.confidence)?;
        let effect_size = effect_size(control, treatment)?;
        let achieved_power = self
            .config
            .minimum_detectable_effect
            .map(|mde| achieved_power(&test, mde, self.config.alpha))
            .transpose()?;

        let verdict = classify_with(&test, &srm, guardrails, &self.config.classifier())?;
        log_verdict(guardrails, &verdict);

        Ok(Analysis {
            srm,
            test,
            effect_size,
            achieved_power,
            verdict,
        })
    }
}

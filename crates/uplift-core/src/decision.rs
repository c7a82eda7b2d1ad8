//! Ship / iterate / stop classification.
//!
//! Rules are evaluated in strict priority order and the first match decides:
//!
//! 1. Sample ratio mismatch → Stop
//! 2. Any guardrail regressed beyond its tolerance → Stop
//! 3. Significant at α with positive uplift → Ship (flag small effects)
//! 4. Significant at α with negative uplift → Stop
//! 5. Otherwise → Iterate (flag low power when a design MDE is known)
//!
//! Every rule that fires contributes a reason, not only the deciding one, so
//! a caller can explain the full picture (e.g. a significant win that is
//! nonetheless blocked by SRM).

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::analysis::achieved_power;
use crate::constants::{DEFAULT_ALPHA, DEFAULT_POWER, DEFAULT_SMALL_EFFECT_THRESHOLD};
use crate::error::{ensure_open_unit, StatsError};
use crate::math;
use crate::result::{Decision, ProportionTestResult, RiskFlag, SrmResult, Verdict};
use crate::types::GuardrailMetric;

/// Reason recorded when the traffic split is broken.
pub const REASON_SRM: &str = "sample ratio mismatch invalidates comparison";

/// Reason recorded for a significant negative result.
pub const REASON_SIGNIFICANT_REGRESSION: &str = "statistically significant regression";

/// Reason recorded when neither a win nor a loss can be established.
pub const REASON_INCONCLUSIVE: &str = "inconclusive: insufficient evidence at configured alpha";

/// Thresholds used by the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Two-sided significance level. Default: 0.05.
    pub alpha: f64,

    /// Relative uplift below which a significant win is flagged `SmallEffect`.
    /// Default: 0.01 (1%).
    pub small_effect_threshold: f64,

    /// Relative effect the test was designed to detect.
    ///
    /// When set, an inconclusive result is checked for `LowPower`.
    /// Default: None.
    pub minimum_detectable_effect: Option<f64>,

    /// Power below which an inconclusive test is flagged `LowPower`.
    /// Default: 0.8.
    pub target_power: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            small_effect_threshold: DEFAULT_SMALL_EFFECT_THRESHOLD,
            minimum_detectable_effect: None,
            target_power: DEFAULT_POWER,
        }
    }
}

impl ClassifierConfig {
    /// Default thresholds with the given significance level.
    pub fn with_alpha(alpha: f64) -> Self {
        Self {
            alpha,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), StatsError> {
        ensure_open_unit("alpha", self.alpha)?;
        ensure_open_unit("target_power", self.target_power)?;
        if !(self.small_effect_threshold.is_finite() && self.small_effect_threshold >= 0.0) {
            return Err(StatsError::range(
                "small_effect_threshold",
                format!("must be finite and >= 0, got {}", self.small_effect_threshold),
            ));
        }
        if let Some(mde) = self.minimum_detectable_effect {
            if !mde.is_finite() || mde == 0.0 {
                return Err(StatsError::range(
                    "minimum_detectable_effect",
                    format!("must be finite and non-zero, got {}", mde),
                ));
            }
        }
        Ok(())
    }
}

/// Classify with default thresholds at significance level `alpha`.
///
/// # Errors
///
/// Returns [`StatsError::Range`] if `alpha` is outside `(0, 1)`.
pub fn classify(
    test_result: &ProportionTestResult,
    srm: &SrmResult,
    guardrails: &[GuardrailMetric],
    alpha: f64,
) -> Result<Verdict, StatsError> {
    classify_with(
        test_result,
        srm,
        guardrails,
        &ClassifierConfig::with_alpha(alpha),
    )
}

/// Classify with explicit thresholds.
///
/// # Errors
///
/// Returns [`StatsError::Range`] if any threshold in `config` is invalid.
pub fn classify_with(
    test_result: &ProportionTestResult,
    srm: &SrmResult,
    guardrails: &[GuardrailMetric],
    config: &ClassifierConfig,
) -> Result<Verdict, StatsError> {
    config.validate()?;

    let mut rules = RuleTrace::default();

    // Rule 1
    if srm.has_mismatch {
        rules.fire(Decision::Stop, REASON_SRM.to_string());
        rules.flag(RiskFlag::Srm);
    }

    // Rule 2
    for guardrail in guardrails.iter().filter(|g| g.is_breached()) {
        rules.fire(
            Decision::Stop,
            format!(
                "guardrail '{}' regressed by {:.2}% ({}), beyond the allowed {:.2}%",
                guardrail.name(),
                guardrail.regression() * 100.0,
                guardrail.direction(),
                guardrail.max_allowed_regression() * 100.0
            ),
        );
        rules.flag(RiskFlag::GuardrailRegression);
    }

    let significant = test_result.p_value < config.alpha;

    if significant && test_result.absolute_uplift > 0.0 {
        // Rule 3
        rules.fire(
            Decision::Ship,
            format!(
                "statistically significant improvement: p = {:.4} < alpha = {}, relative uplift {:+.2}%",
                test_result.p_value,
                config.alpha,
                test_result.relative_uplift * 100.0
            ),
        );
        if math::abs(test_result.relative_uplift) < config.small_effect_threshold {
            rules.note(format!(
                "relative uplift {:+.2}% is below the small-effect threshold of {:.2}%",
                test_result.relative_uplift * 100.0,
                config.small_effect_threshold * 100.0
            ));
            rules.flag(RiskFlag::SmallEffect);
        }
    } else if significant && test_result.absolute_uplift < 0.0 {
        // Rule 4
        rules.fire(Decision::Stop, REASON_SIGNIFICANT_REGRESSION.to_string());
    } else {
        // Rule 5
        rules.fire(Decision::Iterate, REASON_INCONCLUSIVE.to_string());
        if let Some(mde) = config.minimum_detectable_effect {
            let power = achieved_power(test_result, mde, config.alpha)?;
            if power < config.target_power {
                rules.note(format!(
                    "achieved power {:.0}% against a {:.1}% effect is below the {:.0}% target",
                    power * 100.0,
                    mde * 100.0,
                    config.target_power * 100.0
                ));
                rules.flag(RiskFlag::LowPower);
            }
        }
    }

    Ok(rules.into_verdict())
}

/// Accumulates fired rules; the first one to fire owns the decision.
#[derive(Default)]
struct RuleTrace {
    decision: Option<Decision>,
    reasons: Vec<String>,
    risk_flags: BTreeSet<RiskFlag>,
}

impl RuleTrace {
    fn fire(&mut self, decision: Decision, reason: String) {
        self.decision.get_or_insert(decision);
        self.reasons.push(reason);
    }

    fn note(&mut self, reason: String) {
        self.reasons.push(reason);
    }

    fn flag(&mut self, flag: RiskFlag) {
        self.risk_flags.insert(flag);
    }

    fn into_verdict(self) -> Verdict {
        Verdict {
            // Rule 5 always fires when 3 and 4 do not, so a decision exists.
            decision: self.decision.unwrap_or(Decision::Iterate),
            reasons: self.reasons,
            risk_flags: self.risk_flags,
        }
    }
}

//! Result types produced by the planner, the guards and the classifier.
//!
//! All of these are output-only value objects: built fresh on every call,
//! never mutated, and serializable so callers can persist or render them.

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::math;

// ============================================================================
// SampleSizePlan
// ============================================================================

/// Required sample size for a planned two-arm test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSizePlan {
    /// Users needed in each arm (buffer applied, rounded up).
    pub per_variant: u64,

    /// Users needed across both arms (`2 * per_variant`).
    pub total: u64,

    /// Current conversion rate of control.
    pub baseline_rate: f64,

    /// Conversion rate the treatment must reach, `baseline * (1 + mde)`.
    pub target_rate: f64,

    /// Minimum detectable effect, relative to the baseline.
    pub mde: f64,

    /// Two-sided significance level.
    pub alpha: f64,

    /// Probability of detecting an effect of size `mde`.
    pub power: f64,

    /// Safety buffer applied on top of the closed-form size (0.10 = 10%).
    pub buffer: f64,
}

impl SampleSizePlan {
    /// Days needed to reach `total` given the number of eligible users per day.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Range`] if `daily_traffic` is zero.
    pub fn duration_days(&self, daily_traffic: u64) -> Result<u64, StatsError> {
        if daily_traffic == 0 {
            return Err(StatsError::range("daily_traffic", "must be > 0"));
        }
        Ok(self.total.div_ceil(daily_traffic))
    }
}

// ============================================================================
// SrmResult
// ============================================================================

/// Outcome of the sample ratio mismatch check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SrmResult {
    /// Share of users observed in treatment.
    pub observed_ratio: f64,

    /// Share of users intended for treatment.
    pub expected_ratio: f64,

    /// Goodness-of-fit statistic (1 df).
    pub chi_square: f64,

    /// Threshold above which the split is declared broken.
    pub critical_value: f64,

    /// P-value of the goodness-of-fit test.
    pub p_value: f64,

    /// Whether the observed split is incompatible with the intended one.
    pub has_mismatch: bool,
}

// ============================================================================
// ProportionTestResult
// ============================================================================

/// Two-proportion z-test of treatment against control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProportionTestResult {
    /// Control conversion rate.
    pub p_control: f64,

    /// Treatment conversion rate.
    pub p_treatment: f64,

    /// `p_treatment - p_control`.
    pub absolute_uplift: f64,

    /// `absolute_uplift / p_control`.
    pub relative_uplift: f64,

    /// Unpooled standard error of the difference, used for the interval.
    pub standard_error: f64,

    /// Pooled standard error, valid under the null and used for `z_score`.
    pub pooled_standard_error: f64,

    /// Test statistic. Infinite only when the pooled SE is zero and the rates differ.
    pub z_score: f64,

    /// Two-sided p-value.
    pub p_value: f64,

    /// Interval for `absolute_uplift` at `confidence`.
    pub confidence_interval: (f64, f64),

    /// Confidence level of the interval.
    pub confidence: f64,
}

impl ProportionTestResult {
    /// Whether the difference is significant at `alpha`.
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }

    /// Whether the interval excludes zero.
    pub fn interval_excludes_zero(&self) -> bool {
        let (lo, hi) = self.confidence_interval;
        lo > 0.0 || hi < 0.0
    }
}

// ============================================================================
// EffectSize
// ============================================================================

/// Standardized effect size between two proportions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSize {
    /// Cohen's h, `2·asin(√p_t) - 2·asin(√p_c)`.
    pub cohens_h: f64,

    /// Conventional magnitude class of |h|.
    pub interpretation: EffectSizeClass,

    /// `p_treatment / p_control`.
    pub relative_risk: f64,

    /// Odds ratio, `None` when either rate is 0 or 1.
    pub odds_ratio: Option<f64>,
}

/// Cohen's conventional magnitude classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectSizeClass {
    /// |h| < 0.2
    Negligible,
    /// 0.2 <= |h| < 0.5
    Small,
    /// 0.5 <= |h| < 0.8
    Medium,
    /// |h| >= 0.8
    Large,
}

impl EffectSizeClass {
    /// Classify a Cohen's h value by magnitude.
    pub fn from_cohens_h(h: f64) -> Self {
        use crate::constants::{COHENS_H_LARGE, COHENS_H_MEDIUM, COHENS_H_SMALL};

        let h = math::abs(h);
        if h < COHENS_H_SMALL {
            EffectSizeClass::Negligible
        } else if h < COHENS_H_MEDIUM {
            EffectSizeClass::Small
        } else if h < COHENS_H_LARGE {
            EffectSizeClass::Medium
        } else {
            EffectSizeClass::Large
        }
    }
}

impl fmt::Display for EffectSizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectSizeClass::Negligible => write!(f, "negligible"),
            EffectSizeClass::Small => write!(f, "small"),
            EffectSizeClass::Medium => write!(f, "medium"),
            EffectSizeClass::Large => write!(f, "large"),
        }
    }
}

// ============================================================================
// Verdict
// ============================================================================

/// Recommendation for what to do with a finished experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Clear win: roll the treatment out.
    Ship,
    /// Inconclusive: refine and run again.
    Iterate,
    /// Loss or invalid data: do not ship.
    Stop,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Ship => write!(f, "ship"),
            Decision::Iterate => write!(f, "iterate"),
            Decision::Stop => write!(f, "stop"),
        }
    }
}

/// Caveat attached to a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    /// Traffic split does not match the intended split.
    Srm,
    /// A guardrail metric regressed beyond its tolerance.
    GuardrailRegression,
    /// The test was underpowered for the effect it was designed to detect.
    LowPower,
    /// Significant, but the relative uplift is below the small-effect threshold.
    SmallEffect,
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskFlag::Srm => write!(f, "srm"),
            RiskFlag::GuardrailRegression => write!(f, "guardrail_regression"),
            RiskFlag::LowPower => write!(f, "low_power"),
            RiskFlag::SmallEffect => write!(f, "small_effect"),
        }
    }
}

/// Classified outcome of an experiment with the rationale behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// The recommendation.
    pub decision: Decision,

    /// Every rule that fired, in priority order.
    pub reasons: Vec<String>,

    /// Caveats the caller should surface alongside the decision.
    pub risk_flags: BTreeSet<RiskFlag>,
}

impl Verdict {
    /// Whether the recommendation is to ship.
    pub fn should_ship(&self) -> bool {
        self.decision == Decision::Ship
    }

    /// Whether the recommendation is ship or stop.
    pub fn is_conclusive(&self) -> bool {
        matches!(self.decision, Decision::Ship | Decision::Stop)
    }

    /// Whether `flag` was raised.
    pub fn has_flag(&self, flag: RiskFlag) -> bool {
        self.risk_flags.contains(&flag)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.decision)?;
        if !self.risk_flags.is_empty() {
            write!(f, " [")?;
            for (i, flag) in self.risk_flags.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", flag)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

//! Input value objects: per-arm observations and guardrail metrics.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::math;

/// Exposure and conversion counts for one arm of an experiment.
///
/// The invariant `conversions <= users` is enforced at construction, including
/// when deserializing. Instances are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawVariantObservation")]
pub struct VariantObservation {
    name: String,
    users: u64,
    conversions: u64,
}

#[derive(Deserialize)]
struct RawVariantObservation {
    name: String,
    users: u64,
    conversions: u64,
}

impl TryFrom<RawVariantObservation> for VariantObservation {
    type Error = StatsError;

    fn try_from(raw: RawVariantObservation) -> Result<Self, Self::Error> {
        VariantObservation::new(raw.name, raw.users, raw.conversions)
    }
}

impl VariantObservation {
    /// Create an observation for the arm called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Range`] if `conversions > users`.
    pub fn new(name: impl Into<String>, users: u64, conversions: u64) -> Result<Self, StatsError> {
        let name = name.into();
        if conversions > users {
            return Err(StatsError::range(
                "conversions",
                format!(
                    "arm '{}' has {} conversions but only {} users",
                    name, conversions, users
                ),
            ));
        }
        Ok(Self {
            name,
            users,
            conversions,
        })
    }

    /// Arm label, e.g. `"control"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of exposed users.
    pub fn users(&self) -> u64 {
        self.users
    }

    /// Number of converting users.
    pub fn conversions(&self) -> u64 {
        self.conversions
    }

    /// Observed conversion rate, or `None` for an arm with no users.
    pub fn conversion_rate(&self) -> Option<f64> {
        if self.users == 0 {
            None
        } else {
            Some(self.conversions as f64 / self.users as f64)
        }
    }
}

/// Which way a guardrail metric is allowed to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Larger values are better (e.g. retention).
    HigherIsBetter,
    /// Smaller values are better (e.g. latency, error rate).
    LowerIsBetter,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::HigherIsBetter => write!(f, "higher is better"),
            Direction::LowerIsBetter => write!(f, "lower is better"),
        }
    }
}

/// A secondary metric that must not regress beyond a tolerance.
///
/// `max_allowed_regression` is a fraction of the control value (0.05 allows a
/// 5% move in the bad direction). When the control value is exactly zero the
/// tolerance is applied to the absolute difference instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGuardrailMetric")]
pub struct GuardrailMetric {
    name: String,
    control_value: f64,
    treatment_value: f64,
    direction: Direction,
    max_allowed_regression: f64,
}

#[derive(Deserialize)]
struct RawGuardrailMetric {
    name: String,
    control_value: f64,
    treatment_value: f64,
    direction: Direction,
    max_allowed_regression: f64,
}

impl TryFrom<RawGuardrailMetric> for GuardrailMetric {
    type Error = StatsError;

    fn try_from(raw: RawGuardrailMetric) -> Result<Self, Self::Error> {
        GuardrailMetric::new(
            raw.name,
            raw.control_value,
            raw.treatment_value,
            raw.direction,
            raw.max_allowed_regression,
        )
    }
}

impl GuardrailMetric {
    /// Create a guardrail.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Range`] if either value is not finite or the
    /// tolerance is negative or not finite.
    pub fn new(
        name: impl Into<String>,
        control_value: f64,
        treatment_value: f64,
        direction: Direction,
        max_allowed_regression: f64,
    ) -> Result<Self, StatsError> {
        let name = name.into();
        if !control_value.is_finite() || !treatment_value.is_finite() {
            return Err(StatsError::range(
                "guardrail",
                format!(
                    "guardrail '{}' has non-finite values (control {}, treatment {})",
                    name, control_value, treatment_value
                ),
            ));
        }
        if !(max_allowed_regression.is_finite() && max_allowed_regression >= 0.0) {
            return Err(StatsError::range(
                "max_allowed_regression",
                format!(
                    "guardrail '{}' tolerance must be finite and >= 0, got {}",
                    name, max_allowed_regression
                ),
            ));
        }
        Ok(Self {
            name,
            control_value,
            treatment_value,
            direction,
            max_allowed_regression,
        })
    }

    /// Metric name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value observed in control.
    pub fn control_value(&self) -> f64 {
        self.control_value
    }

    /// Value observed in treatment.
    pub fn treatment_value(&self) -> f64 {
        self.treatment_value
    }

    /// Good direction for this metric.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Tolerated regression.
    pub fn max_allowed_regression(&self) -> f64 {
        self.max_allowed_regression
    }

    /// Regression of treatment relative to control in the bad direction.
    ///
    /// Positive values are regressions, negative values are improvements.
    pub fn regression(&self) -> f64 {
        let worse_by = match self.direction {
            Direction::HigherIsBetter => self.control_value - self.treatment_value,
            Direction::LowerIsBetter => self.treatment_value - self.control_value,
        };
        if self.control_value == 0.0 {
            worse_by
        } else {
            worse_by / math::abs(self.control_value)
        }
    }

    /// Whether the regression exceeds the tolerance.
    pub fn is_breached(&self) -> bool {
        self.regression() > self.max_allowed_regression
    }
}

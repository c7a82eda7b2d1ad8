//! Two-proportion z-test.
//!
//! The test statistic uses the pooled standard error, which is only valid
//! under the null hypothesis of equal rates:
//!
//! ```text
//! p̄  = (x₁ + x₂) / (n₁ + n₂)
//! SE₀ = sqrt(p̄(1-p̄)(1/n₁ + 1/n₂))
//! z   = (p₂ - p₁) / SE₀
//! ```
//!
//! The interval around the observed difference uses the unpooled standard
//! error `sqrt(p₁(1-p₁)/n₁ + p₂(1-p₂)/n₂)`. The pooled SE is never reused for
//! the interval.

extern crate alloc;

use alloc::format;

use crate::error::{ensure_open_unit, StatsError};
use crate::math;
use crate::result::ProportionTestResult;
use crate::types::VariantObservation;

/// Compare treatment against control.
///
/// # Degenerate case
///
/// When the pooled standard error is zero, the p-value is `1.0` with
/// `z_score = 0.0` if the rates are equal (both arms at 100%), and `0.0`
/// with `z_score = ±∞` otherwise. Unequal rates reach this branch only when
/// one arm is so large that the pooled rate rounds to exactly 1.0 in `f64`.
/// This is defined behavior, not an error.
///
/// # Errors
///
/// Returns [`StatsError::Range`] if either arm has no users, if the control
/// rate is zero (relative uplift is undefined), or if `confidence` is outside
/// `(0, 1)`.
pub fn evaluate(
    control: &VariantObservation,
    treatment: &VariantObservation,
    confidence: f64,
) -> Result<ProportionTestResult, StatsError> {
    ensure_open_unit("confidence", confidence)?;

    let p1 = rate_of(control)?;
    let p2 = rate_of(treatment)?;
    if p1 == 0.0 {
        return Err(StatsError::range(
            "control",
            format!(
                "arm '{}' has no conversions; relative uplift is undefined",
                control.name()
            ),
        ));
    }

    let n1 = control.users() as f64;
    let n2 = treatment.users() as f64;

    let absolute_uplift = p2 - p1;
    let relative_uplift = absolute_uplift / p1;

    // Summed as f64: two valid u64 counts can overflow u64.
    let p_pooled = (control.conversions() as f64 + treatment.conversions() as f64) / (n1 + n2);
    let se_pooled = math::sqrt(p_pooled * (1.0 - p_pooled) * (1.0 / n1 + 1.0 / n2));
    let se_unpooled = math::sqrt(p1 * (1.0 - p1) / n1 + p2 * (1.0 - p2) / n2);

    let (z_score, p_value) = if se_pooled > 0.0 {
        let z = absolute_uplift / se_pooled;
        let p = 2.0 * math::normal_cdf(-math::abs(z));
        (z, p.min(1.0))
    } else if absolute_uplift == 0.0 {
        (0.0, 1.0)
    } else if absolute_uplift > 0.0 {
        (f64::INFINITY, 0.0)
    } else {
        (f64::NEG_INFINITY, 0.0)
    };

    let z_crit = math::normal_quantile(0.5 + confidence / 2.0)?;
    let margin = z_crit * se_unpooled;

    Ok(ProportionTestResult {
        p_control: p1,
        p_treatment: p2,
        absolute_uplift,
        relative_uplift,
        standard_error: se_unpooled,
        pooled_standard_error: se_pooled,
        z_score,
        p_value,
        confidence_interval: (absolute_uplift - margin, absolute_uplift + margin),
        confidence,
    })
}

fn rate_of(arm: &VariantObservation) -> Result<f64, StatsError> {
    arm.conversion_rate()
        .ok_or_else(|| StatsError::range("users", format!("arm '{}' has no users", arm.name())))
}

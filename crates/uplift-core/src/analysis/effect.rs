//! Standardized effect sizes for two proportions.
//!
//! A p-value says whether a difference is real; these say whether it is
//! large. Cohen's h puts proportions on the arcsine scale so that a change from
//! 1% to 2% and a change from 50% to 51% are not treated as equal.

use crate::error::StatsError;
use crate::math;
use crate::result::{EffectSize, EffectSizeClass};
use crate::types::VariantObservation;

/// Compute effect size metrics for treatment against control.
///
/// # Errors
///
/// Returns [`StatsError::Range`] if either arm has no users or the control
/// rate is zero (relative risk is undefined).
pub fn effect_size(
    control: &VariantObservation,
    treatment: &VariantObservation,
) -> Result<EffectSize, StatsError> {
    let p1 = control
        .conversion_rate()
        .ok_or_else(|| StatsError::range("users", "control arm has no users"))?;
    let p2 = treatment
        .conversion_rate()
        .ok_or_else(|| StatsError::range("users", "treatment arm has no users"))?;
    if p1 == 0.0 {
        return Err(StatsError::range(
            "control",
            "control arm has no conversions; relative risk is undefined",
        ));
    }

    let cohens_h = 2.0 * math::asin(math::sqrt(p2)) - 2.0 * math::asin(math::sqrt(p1));

    Ok(EffectSize {
        cohens_h,
        interpretation: EffectSizeClass::from_cohens_h(cohens_h),
        relative_risk: p2 / p1,
        odds_ratio: odds_ratio(p1, p2),
    })
}

fn odds_ratio(p1: f64, p2: f64) -> Option<f64> {
    let interior = |p: f64| p > 0.0 && p < 1.0;
    if interior(p1) && interior(p2) {
        Some((p2 / (1.0 - p2)) / (p1 / (1.0 - p1)))
    } else {
        None
    }
}

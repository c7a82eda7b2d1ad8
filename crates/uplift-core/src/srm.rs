//! Sample ratio mismatch (SRM) detection.
//!
//! Compares the observed traffic split against the intended one with a
//! one-degree-of-freedom chi-square goodness-of-fit test. A mismatch means the
//! randomization or logging pipeline is broken: the arms are no longer
//! comparable, and no effect estimate computed from them can be trusted.
//!
//! Run this before trusting any proportion test output.

extern crate alloc;

use alloc::format;

use crate::constants::SRM_CRITICAL_VALUE;
use crate::error::{ensure_open_unit, StatsError};
use crate::math;
use crate::result::SrmResult;
use crate::types::VariantObservation;

/// Check the split with the default critical value (10.828, α = 0.001).
///
/// # Errors
///
/// Returns [`StatsError::Range`] if both arms are empty or
/// `expected_treatment_ratio` is outside `(0, 1)`.
pub fn check(
    control: &VariantObservation,
    treatment: &VariantObservation,
    expected_treatment_ratio: f64,
) -> Result<SrmResult, StatsError> {
    check_with_critical_value(
        control,
        treatment,
        expected_treatment_ratio,
        SRM_CRITICAL_VALUE,
    )
}

/// Check the split against a caller-chosen chi-square critical value.
///
/// # Errors
///
/// As [`check`], plus [`StatsError::Range`] if `critical_value` is not a
/// positive finite number.
pub fn check_with_critical_value(
    control: &VariantObservation,
    treatment: &VariantObservation,
    expected_treatment_ratio: f64,
    critical_value: f64,
) -> Result<SrmResult, StatsError> {
    ensure_open_unit("expected_treatment_ratio", expected_treatment_ratio)?;
    if !(critical_value.is_finite() && critical_value > 0.0) {
        return Err(StatsError::range(
            "critical_value",
            format!("must be positive and finite, got {}", critical_value),
        ));
    }

    let n_control = control.users() as f64;
    let n_treatment = treatment.users() as f64;
    let total = n_control + n_treatment;
    if total == 0.0 {
        return Err(StatsError::range(
            "users",
            "both arms are empty; cannot check the traffic split",
        ));
    }

    let expected_treatment = total * expected_treatment_ratio;
    let expected_control = total * (1.0 - expected_treatment_ratio);

    let chi_square = math::sq(n_treatment - expected_treatment) / expected_treatment
        + math::sq(n_control - expected_control) / expected_control;

    Ok(SrmResult {
        observed_ratio: n_treatment / total,
        expected_ratio: expected_treatment_ratio,
        chi_square,
        critical_value,
        p_value: math::chi_square_sf_1df(chi_square),
        has_mismatch: chi_square > critical_value,
    })
}

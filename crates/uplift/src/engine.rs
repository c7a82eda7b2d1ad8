//! Call-compatible entry points for an external orchestration layer.
//!
//! Each function takes plain data, returns plain data, and logs its result at
//! debug level. None of them touch files, the network, or shared state.

use uplift_core::{
    analysis, decision, planning, srm, GuardrailMetric, ProportionTestResult, SampleSizePlan,
    SrmResult, StatsError, VariantObservation, Verdict,
};

/// Required per-variant and total sample size for a planned test.
///
/// See [`uplift_core::planning::plan`].
///
/// # Errors
///
/// Returns [`StatsError::Range`] for inputs outside their documented domain.
pub fn plan_sample_size(
    baseline_rate: f64,
    minimum_detectable_effect: f64,
    alpha: f64,
    power: f64,
) -> Result<SampleSizePlan, StatsError> {
    let plan = planning::plan(baseline_rate, minimum_detectable_effect, alpha, power)?;
    tracing::debug!(
        baseline_rate,
        mde = minimum_detectable_effect,
        alpha,
        power,
        per_variant = plan.per_variant,
        total = plan.total,
        "planned sample size"
    );
    Ok(plan)
}

/// Chi-square check of the observed traffic split.
///
/// See [`uplift_core::srm::check`]. A detected mismatch is logged at warn level.
///
/// # Errors
///
/// Returns [`StatsError::Range`] if both arms are empty or the ratio is outside `(0, 1)`.
pub fn check_sample_ratio_mismatch(
    control: &VariantObservation,
    treatment: &VariantObservation,
    expected_treatment_ratio: f64,
) -> Result<SrmResult, StatsError> {
    let result = srm::check(control, treatment, expected_treatment_ratio)?;
    log_srm(control, treatment, &result);
    Ok(result)
}

/// Two-proportion z-test of treatment against control.
///
/// See [`uplift_core::analysis::evaluate`].
///
/// # Errors
///
/// Returns [`StatsError::Range`] for empty arms, a zero control rate, or an
/// invalid confidence level.
pub fn evaluate_proportion_test(
    control: &VariantObservation,
    treatment: &VariantObservation,
    confidence: f64,
) -> Result<ProportionTestResult, StatsError> {
    let result = analysis::evaluate(control, treatment, confidence)?;
    tracing::debug!(
        p_control = result.p_control,
        p_treatment = result.p_treatment,
        z = result.z_score,
        p_value = result.p_value,
        relative_uplift = result.relative_uplift,
        "evaluated proportion test"
    );
    Ok(result)
}

/// Ship / iterate / stop classification.
///
/// See [`uplift_core::decision::classify`].
///
/// # Errors
///
/// Returns [`StatsError::Range`] if `alpha` is outside `(0, 1)`.
pub fn classify_decision(
    test_result: &ProportionTestResult,
    srm: &SrmResult,
    guardrails: &[GuardrailMetric],
    alpha: f64,
) -> Result<Verdict, StatsError> {
    let verdict = decision::classify(test_result, srm, guardrails, alpha)?;
    log_verdict(guardrails, &verdict);
    Ok(verdict)
}

pub(crate) fn log_srm(
    control: &VariantObservation,
    treatment: &VariantObservation,
    result: &SrmResult,
) {
    if result.has_mismatch {
        tracing::warn!(
            control_users = control.users(),
            treatment_users = treatment.users(),
            observed_ratio = result.observed_ratio,
            expected_ratio = result.expected_ratio,
            chi_square = result.chi_square,
            "sample ratio mismatch detected"
        );
    } else {
        tracing::debug!(
            chi_square = result.chi_square,
            p_value = result.p_value,
            "traffic split consistent with design"
        );
    }
}

pub(crate) fn log_verdict(guardrails: &[GuardrailMetric], verdict: &Verdict) {
    for guardrail in guardrails.iter().filter(|g| g.is_breached()) {
        tracing::warn!(
            guardrail = guardrail.name(),
            regression = guardrail.regression(),
            allowed = guardrail.max_allowed_regression(),
            "guardrail breached"
        );
    }
    tracing::debug!(
        decision = %verdict.decision,
        reasons = verdict.reasons.len(),
        flags = ?verdict.risk_flags,
        "classified experiment"
    );
}

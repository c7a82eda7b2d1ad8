//! Default parameters shared by the planner, the guards and the classifier.

/// Default significance level for two-sided tests.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Default statistical power for sample size planning.
pub const DEFAULT_POWER: f64 = 0.8;

/// Default confidence level for uplift intervals.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Safety buffer applied on top of the closed-form sample size (10%).
pub const DEFAULT_SAMPLE_SIZE_BUFFER: f64 = 0.10;

/// Intended share of traffic routed to treatment.
pub const DEFAULT_TREATMENT_RATIO: f64 = 0.5;

// =============================================================================
// Sample ratio mismatch
// =============================================================================

/// Chi-square critical value for 1 df at the 0.001 significance level.
///
/// SRM is a correctness gate, so the threshold is deliberately stringent.
pub const SRM_CRITICAL_VALUE: f64 = 10.828;

// =============================================================================
// Decision classifier
// =============================================================================

/// Relative uplift below which a significant win is flagged as a small effect.
pub const DEFAULT_SMALL_EFFECT_THRESHOLD: f64 = 0.01;

// =============================================================================
// Effect size (Cohen's h)
// =============================================================================

/// |h| at or above this is a small effect.
pub const COHENS_H_SMALL: f64 = 0.2;

/// |h| at or above this is a medium effect.
pub const COHENS_H_MEDIUM: f64 = 0.5;

/// |h| at or above this is a large effect.
pub const COHENS_H_LARGE: f64 = 0.8;

/// Beyond this |z| the normal CDF saturates to exactly 0 or 1.
pub const NORMAL_CDF_SATURATION: f64 = 8.0;

//! Sample size planning for two-arm conversion tests.
//!
//! Answers "how many users per arm do I need to detect a relative change of
//! `mde` with probability `power` at two-sided level `alpha`?" using the
//! pooled-variance closed form:
//!
//! ```text
//! n = (z_{1-α/2} + z_{power})² · 2·p̄(1-p̄) / (p₂ - p₁)²
//! ```
//!
//! with `p₂ = p₁(1 + mde)` and `p̄ = (p₁ + p₂)/2`. A safety buffer is applied
//! and the result is rounded up: under-provisioning a real test costs more
//! than a few extra users.

extern crate alloc;

use alloc::format;

use crate::constants::DEFAULT_SAMPLE_SIZE_BUFFER;
use crate::error::{ensure_open_unit, StatsError};
use crate::math;
use crate::result::SampleSizePlan;

/// Plan a test with the default 10% safety buffer.
///
/// # Errors
///
/// Returns [`StatsError::Range`] if `baseline_rate`, `alpha` or `power` is
/// outside `(0, 1)`, if `mde` is zero or not finite, if the target rate falls
/// outside `(0, 1)`, or if the required size does not fit in a `u64`.
pub fn plan(
    baseline_rate: f64,
    minimum_detectable_effect: f64,
    alpha: f64,
    power: f64,
) -> Result<SampleSizePlan, StatsError> {
    plan_with_buffer(
        baseline_rate,
        minimum_detectable_effect,
        alpha,
        power,
        DEFAULT_SAMPLE_SIZE_BUFFER,
    )
}

/// Plan a test with an explicit safety buffer (0.0 disables it).
///
/// # Errors
///
/// As [`plan`], plus [`StatsError::Range`] if `buffer` is negative or not finite.
pub fn plan_with_buffer(
    baseline_rate: f64,
    minimum_detectable_effect: f64,
    alpha: f64,
    power: f64,
    buffer: f64,
) -> Result<SampleSizePlan, StatsError> {
    ensure_open_unit("baseline_rate", baseline_rate)?;
    ensure_open_unit("alpha", alpha)?;
    ensure_open_unit("power", power)?;
    if !minimum_detectable_effect.is_finite() || minimum_detectable_effect == 0.0 {
        return Err(StatsError::range(
            "minimum_detectable_effect",
            format!("must be finite and non-zero, got {}", minimum_detectable_effect),
        ));
    }
    if !(buffer.is_finite() && buffer >= 0.0) {
        return Err(StatsError::range(
            "buffer",
            format!("must be finite and >= 0, got {}", buffer),
        ));
    }

    let p1 = baseline_rate;
    let p2 = baseline_rate * (1.0 + minimum_detectable_effect);
    if !(p2 > 0.0 && p2 < 1.0) {
        return Err(StatsError::range(
            "minimum_detectable_effect",
            format!(
                "target rate {} = {} * (1 + {}) is outside (0, 1)",
                p2, baseline_rate, minimum_detectable_effect
            ),
        ));
    }

    let z_alpha = math::normal_quantile(1.0 - alpha / 2.0)?;
    let z_power = math::normal_quantile(power)?;

    let p_pooled = (p1 + p2) / 2.0;
    let n = math::sq(z_alpha + z_power) * 2.0 * p_pooled * (1.0 - p_pooled) / math::sq(p2 - p1);
    let buffered = math::ceil(n * (1.0 + buffer));

    // Half of u64::MAX so that `total` cannot overflow either.
    if !(buffered.is_finite() && buffered < (u64::MAX / 2) as f64) {
        return Err(StatsError::range(
            "minimum_detectable_effect",
            format!(
                "effect {} is too small to plan for (needs {} users per arm)",
                minimum_detectable_effect, buffered
            ),
        ));
    }

    let per_variant = (buffered as u64).max(1);

    Ok(SampleSizePlan {
        per_variant,
        total: per_variant * 2,
        baseline_rate,
        target_rate: p2,
        mde: minimum_detectable_effect,
        alpha,
        power,
        buffer,
    })
}

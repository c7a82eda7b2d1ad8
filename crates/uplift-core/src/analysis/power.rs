//! Achieved power of a completed test.
//!
//! A non-significant result from an underpowered test says very little. This
//! module answers: "with the precision this test actually reached, how likely
//! was it to detect the effect it was designed for?"
//!
//! ```text
//! δ     = p_control · mde
//! power = Φ(δ/SE - z_{1-α/2}) + Φ(-δ/SE - z_{1-α/2})
//! ```
//!
//! where SE is the unpooled standard error of the observed difference.

extern crate alloc;

use alloc::format;

use crate::error::{ensure_open_unit, StatsError};
use crate::math;
use crate::result::ProportionTestResult;

/// Two-sided power against a relative effect of `minimum_detectable_effect`.
///
/// # Errors
///
/// Returns [`StatsError::Range`] if `alpha` is outside `(0, 1)` or the effect is
/// zero or not finite.
pub fn achieved_power(
    result: &ProportionTestResult,
    minimum_detectable_effect: f64,
    alpha: f64,
) -> Result<f64, StatsError> {
    ensure_open_unit("alpha", alpha)?;
    if !minimum_detectable_effect.is_finite() || minimum_detectable_effect == 0.0 {
        return Err(StatsError::range(
            "minimum_detectable_effect",
            format!("must be finite and non-zero, got {}", minimum_detectable_effect),
        ));
    }

    let delta = math::abs(result.p_control * minimum_detectable_effect);
    if result.standard_error == 0.0 {
        return Ok(1.0);
    }

    let z_alpha = math::normal_quantile(1.0 - alpha / 2.0)?;
    let shift = delta / result.standard_error;
    let power = math::normal_cdf(shift - z_alpha) + math::normal_cdf(-shift - z_alpha);
    Ok(power.min(1.0))
}

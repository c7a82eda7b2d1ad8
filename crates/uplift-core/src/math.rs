//! Math functions for no_std compatibility.
//!
//! In no_std mode, f64 doesn't have transcendental methods like sqrt, erfc,
//! asin, etc. This module provides these functions using libm, together with
//! the normal distribution primitives every higher layer builds on.

use crate::constants::NORMAL_CDF_SATURATION;
use crate::error::StatsError;

/// Square root.
#[inline]
pub fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

/// Ceiling (round up).
#[inline]
pub fn ceil(x: f64) -> f64 {
    libm::ceil(x)
}

/// Absolute value.
#[inline]
pub fn abs(x: f64) -> f64 {
    libm::fabs(x)
}

/// Arcsine.
#[inline]
pub fn asin(x: f64) -> f64 {
    libm::asin(x)
}

/// Natural logarithm.
#[inline]
pub fn ln(x: f64) -> f64 {
    libm::log(x)
}

/// Exponential (e^x).
#[inline]
pub fn exp(x: f64) -> f64 {
    libm::exp(x)
}

/// Square (x^2).
#[inline]
pub fn sq(x: f64) -> f64 {
    x * x
}

/// Standard normal CDF: Φ(z) = erfc(-z/√2) / 2.
///
/// The erfc form keeps full precision in the lower tail, where the
/// `(1 + erf)` form cancels. Saturates to exactly `0.0` / `1.0` for `|z| > 8`.
#[inline]
pub fn normal_cdf(z: f64) -> f64 {
    if z > NORMAL_CDF_SATURATION {
        return 1.0;
    }
    if z < -NORMAL_CDF_SATURATION {
        return 0.0;
    }
    0.5 * libm::erfc(-z * core::f64::consts::FRAC_1_SQRT_2)
}

/// Standard normal density φ(z).
#[inline]
pub fn normal_pdf(z: f64) -> f64 {
    // 1/sqrt(2π)
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * exp(-0.5 * z * z)
}

/// Inverse normal CDF (probit function).
///
/// Acklam's rational approximation (relative error ~1.15e-9) followed by one
/// Halley refinement step against [`normal_cdf`].
///
/// # Errors
///
/// Returns [`StatsError::Domain`] when `p` is not in `(0, 1)`.
pub fn normal_quantile(p: f64) -> Result<f64, StatsError> {
    if !(p > 0.0 && p < 1.0) {
        return Err(StatsError::Domain { value: p });
    }

    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.02425;

    let x = if p < P_LOW {
        let q = sqrt(-2.0 * ln(p));
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = sqrt(-2.0 * ln(1.0 - p));
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    // Halley step. Skipped where the CDF has saturated or the density underflows.
    let density = normal_pdf(x);
    if abs(x) >= NORMAL_CDF_SATURATION || density == 0.0 {
        return Ok(x);
    }
    let e = normal_cdf(x) - p;
    let u = e / density;
    Ok(x - u / (1.0 + 0.5 * x * u))
}

/// Survival function of the chi-square distribution with one degree of freedom.
///
/// P(X > x) = erfc(sqrt(x / 2)). Returns `1.0` for `x <= 0`.
#[inline]
pub fn chi_square_sf_1df(x: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    libm::erfc(sqrt(0.5 * x))
}

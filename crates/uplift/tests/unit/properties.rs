//! Statistical properties that must hold for any valid input.
//!
//! Fixed scenarios pin known reference values; seeded sweeps check the
//! invariants over many random inputs while staying reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uplift::stats::math::{normal_cdf, normal_quantile};
use uplift::{
    check_sample_ratio_mismatch, evaluate_proportion_test, plan_sample_size, Analyzer,
    VariantObservation,
};

const SEED: u64 = 0x5EED_AB7E_57;
const SWEEP: usize = 500;

fn arm(name: &str, users: u64, conversions: u64) -> VariantObservation {
    VariantObservation::new(name, users, conversions).unwrap()
}

// =============================================================================
// PLANNING
// =============================================================================

#[test]
fn plan_reference_scenario() {
    let plan = plan_sample_size(0.10, 0.05, 0.05, 0.8).unwrap();

    let z = 1.959_963_984_540_054 + 0.841_621_233_572_914_3;
    let pp: f64 = (0.10 + 0.105) / 2.0;
    let raw = z * z * 2.0 * pp * (1.0 - pp) / (0.005_f64 * 0.005);
    assert_eq!(plan.per_variant, (raw * 1.1).ceil() as u64);
    assert_eq!(plan.total, 2 * plan.per_variant);
}

#[test]
fn plan_sweep_total_is_twice_per_variant() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..SWEEP {
        let baseline = rng.random_range(0.01..0.5);
        let mde = rng.random_range(0.02..0.5);
        let plan = plan_sample_size(baseline, mde, 0.05, 0.8).unwrap();
        assert!(plan.per_variant > 0);
        assert_eq!(plan.total, 2 * plan.per_variant);
    }
}

#[test]
fn plan_grows_as_effect_shrinks() {
    let mut previous = 0;
    for mde in [0.5, 0.2, 0.1, 0.05, 0.02, 0.01] {
        let plan = plan_sample_size(0.05, mde, 0.05, 0.8).unwrap();
        assert!(
            plan.per_variant > previous,
            "mde {} needs {} <= {}",
            mde,
            plan.per_variant,
            previous
        );
        previous = plan.per_variant;
    }
}

#[test]
fn plan_duration_rounds_up() {
    let plan = plan_sample_size(0.10, 0.10, 0.05, 0.8).unwrap();
    let days = plan.duration_days(1000).unwrap();
    assert!(days * 1000 >= plan.total);
    assert!((days - 1) * 1000 < plan.total);
    assert!(plan.duration_days(0).unwrap_err().is_range());
}

// =============================================================================
// SAMPLE RATIO MISMATCH
// =============================================================================

#[test]
fn srm_balanced_and_broken_splits() {
    let balanced =
        check_sample_ratio_mismatch(&arm("c", 1000, 0), &arm("t", 1000, 0), 0.5).unwrap();
    assert_eq!(balanced.chi_square, 0.0);
    assert!(!balanced.has_mismatch);

    let broken =
        check_sample_ratio_mismatch(&arm("c", 9000, 0), &arm("t", 1000, 0), 0.5).unwrap();
    assert!(broken.chi_square > 10.828);
    assert!(broken.has_mismatch);
}

#[test]
fn srm_sweep_statistic_is_well_formed() {
    let mut rng = StdRng::seed_from_u64(SEED ^ 1);
    for _ in 0..SWEEP {
        let control = rng.random_range(1..100_000);
        let treatment = rng.random_range(1..100_000);
        let ratio = rng.random_range(0.05..0.95);
        let srm = check_sample_ratio_mismatch(&arm("c", control, 0), &arm("t", treatment, 0), ratio)
            .unwrap();
        assert!(srm.chi_square >= 0.0);
        assert!((0.0..=1.0).contains(&srm.p_value));
        assert_eq!(srm.has_mismatch, srm.chi_square > srm.critical_value);
    }
}

// =============================================================================
// PROPORTION TEST
// =============================================================================

#[test]
fn identical_arms_show_no_effect() {
    let result = evaluate_proportion_test(&arm("c", 1000, 100), &arm("t", 1000, 100), 0.95).unwrap();
    assert_eq!(result.absolute_uplift, 0.0);
    assert_eq!(result.z_score, 0.0);
    assert!((result.p_value - 1.0).abs() < 1e-12);
}

#[test]
fn reference_win_is_significant() {
    let result = evaluate_proportion_test(&arm("c", 1000, 100), &arm("t", 1000, 150), 0.95).unwrap();
    assert!(result.p_value < 0.05);
    assert!(result.absolute_uplift > 0.0);
    assert!((result.relative_uplift - 0.5).abs() < 1e-12);
    assert!(result.interval_excludes_zero());
}

#[test]
fn proportion_sweep_invariants() {
    let mut rng = StdRng::seed_from_u64(SEED ^ 2);
    for _ in 0..SWEEP {
        let n1 = rng.random_range(10..50_000);
        let n2 = rng.random_range(10..50_000);
        let x1 = rng.random_range(1..=n1);
        let x2 = rng.random_range(0..=n2);
        let result = evaluate_proportion_test(&arm("c", n1, x1), &arm("t", n2, x2), 0.95).unwrap();

        assert!((0.0..=1.0).contains(&result.p_value));
        let (lo, hi) = result.confidence_interval;
        assert!(lo <= result.absolute_uplift && result.absolute_uplift <= hi);
        assert_eq!(result.z_score > 0.0, result.absolute_uplift > 0.0);
    }
}

#[test]
fn wider_confidence_gives_wider_interval() {
    let control = arm("c", 5000, 500);
    let treatment = arm("t", 5000, 540);
    let narrow = evaluate_proportion_test(&control, &treatment, 0.90).unwrap();
    let wide = evaluate_proportion_test(&control, &treatment, 0.99).unwrap();
    let width = |r: &uplift::ProportionTestResult| r.confidence_interval.1 - r.confidence_interval.0;
    assert!(width(&wide) > width(&narrow));
    assert_eq!(narrow.p_value, wide.p_value);
}

// =============================================================================
// NUMERICS AND DETERMINISM
// =============================================================================

#[test]
fn quantile_inverts_cdf_over_sweep() {
    let mut rng = StdRng::seed_from_u64(SEED ^ 3);
    for _ in 0..SWEEP {
        let z = rng.random_range(-6.0..6.0);
        let back = normal_quantile(normal_cdf(z)).unwrap();
        assert!((back - z).abs() < 1e-6, "z = {}, back = {}", z, back);
    }
}

#[test]
fn repeated_calls_are_bit_identical() {
    let mut rng = StdRng::seed_from_u64(SEED ^ 4);
    let analyzer = Analyzer::new().minimum_detectable_effect(0.05);
    for _ in 0..50 {
        let n = rng.random_range(100..20_000);
        let control = arm("c", n, rng.random_range(1..=n / 2));
        let treatment = arm("t", n, rng.random_range(0..=n / 2));

        let first = analyzer.analyze(&control, &treatment, &[]).unwrap();
        let second = analyzer.analyze(&control, &treatment, &[]).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.test.p_value.to_bits(),
            second.test.p_value.to_bits()
        );
    }
}

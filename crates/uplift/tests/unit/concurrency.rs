//! Thread-safety checks.
//!
//! The engine holds no shared state, so concurrent callers must see exactly
//! what a single caller sees.

use std::thread;

use uplift::{Analysis, Analyzer, Direction, GuardrailMetric, VariantObservation};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn public_types_are_send_and_sync() {
    assert_send_sync::<Analyzer>();
    assert_send_sync::<Analysis>();
    assert_send_sync::<VariantObservation>();
    assert_send_sync::<GuardrailMetric>();
    assert_send_sync::<uplift::StatsError>();
}

#[test]
fn concurrent_analyses_match_sequential() {
    let analyzer = Analyzer::new().minimum_detectable_effect(0.05);
    let inputs: Vec<(VariantObservation, VariantObservation)> = (1..=16u64)
        .map(|i| {
            (
                VariantObservation::new("control", 10_000, 1_000).unwrap(),
                VariantObservation::new("treatment", 10_000 + i * 37, 1_000 + i * 9).unwrap(),
            )
        })
        .collect();
    let guardrails =
        [GuardrailMetric::new("latency_ms", 120.0, 123.0, Direction::LowerIsBetter, 0.05).unwrap()];

    let sequential: Vec<Analysis> = inputs
        .iter()
        .map(|(c, t)| analyzer.analyze(c, t, &guardrails).unwrap())
        .collect();

    let concurrent: Vec<Analysis> = thread::scope(|s| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|(c, t)| {
                let analyzer = &analyzer;
                let guardrails = &guardrails;
                s.spawn(move || analyzer.analyze(c, t, guardrails).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, concurrent);
}

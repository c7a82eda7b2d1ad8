//! Plan a conversion test, then analyze its results.

use uplift::{output, Analyzer, Decision, Direction, GuardrailMetric, VariantObservation};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = Analyzer::new().minimum_detectable_effect(0.05);

    // Before the test
    let plan = analyzer.plan(0.10, 0.05)?;
    println!(
        "Need {} users per arm ({} total), about {} days at 5000 users/day\n",
        plan.per_variant,
        plan.total,
        plan.duration_days(5_000)?
    );

    // After the test
    let control = VariantObservation::new("control", 64_000, 6_400)?;
    let treatment = VariantObservation::new("treatment", 64_100, 6_880)?;
    let guardrails = [GuardrailMetric::new(
        "p95_latency_ms",
        420.0,
        431.0,
        Direction::LowerIsBetter,
        0.05,
    )?];

    let analysis = analyzer.analyze(&control, &treatment, &guardrails)?;

    match analysis.verdict.decision {
        Decision::Ship => println!("Ship it."),
        Decision::Iterate => println!("Inconclusive, keep collecting data."),
        Decision::Stop => println!("Stop the test."),
    }
    for reason in &analysis.verdict.reasons {
        println!("  - {}", reason);
    }

    println!("\n{}", output::to_json_pretty(&analysis)?);
    Ok(())
}

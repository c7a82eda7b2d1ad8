//! # uplift
//!
//! Deterministic statistical decision engine for online controlled experiments.
//!
//! Given per-variant exposure and conversion counts (and optional guardrail
//! metrics), this crate:
//! - plans the sample size a test needs before it runs
//! - detects sample ratio mismatch in collected results
//! - computes a two-proportion z-test with uplift and confidence interval
//! - classifies the result as ship, iterate or stop, with reasons and risk flags
//!
//! Every operation is a pure function of its inputs. There is no hidden state,
//! no randomness and no I/O, so calls are reproducible bit for bit and safe to
//! run concurrently.
//!
//! ## Quick Start
//!
//! ```ignore
//! use uplift::{Analyzer, Decision, VariantObservation};
//!
//! // Before the test: how many users per arm?
//! let plan = Analyzer::new().plan(0.10, 0.05)?;
//! println!("{} users per arm, {} total", plan.per_variant, plan.total);
//!
//! // After the test: what should we do?
//! let control = VariantObservation::new("control", 64_000, 6_400)?;
//! let treatment = VariantObservation::new("treatment", 64_000, 6_820)?;
//! let analysis = Analyzer::new().analyze(&control, &treatment, &[])?;
//!
//! match analysis.verdict.decision {
//!     Decision::Ship => println!("ship it"),
//!     Decision::Iterate => println!("inconclusive"),
//!     Decision::Stop => println!("stop: {:?}", analysis.verdict.reasons),
//! }
//! ```
//!
//! ## Function API
//!
//! For callers that pass every parameter explicitly, the four entry points
//! [`plan_sample_size`], [`check_sample_ratio_mismatch`],
//! [`evaluate_proportion_test`] and [`classify_decision`] mirror the
//! individual pipeline stages.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod analyzer;
mod config;
mod engine;

pub mod output;

// Re-exports for public API
pub use analyzer::{Analysis, Analyzer};
pub use config::{
    Config, ENV_ALPHA, ENV_CONFIDENCE, ENV_POWER, ENV_SMALL_EFFECT_THRESHOLD,
    ENV_SRM_CRITICAL_VALUE,
};
pub use engine::{
    check_sample_ratio_mismatch, classify_decision, evaluate_proportion_test, plan_sample_size,
};
pub use uplift_core::constants;
pub use uplift_core::{
    ClassifierConfig, Decision, Direction, EffectSize, EffectSizeClass, GuardrailMetric,
    ProportionTestResult, RiskFlag, SampleSizePlan, SrmResult, StatsError, VariantObservation,
    Verdict,
};

/// Lower-level building blocks, re-exported from `uplift-core`.
pub mod stats {
    pub use uplift_core::{analysis, decision, math, planning, srm};
}

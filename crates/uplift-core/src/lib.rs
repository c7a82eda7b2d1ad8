//! Core statistics for planning and judging online controlled experiments.
//!
//! This crate provides the algorithms behind `uplift`, designed to work in
//! `no_std` environments with only an allocator. Every operation is a pure,
//! O(1) function of its explicit inputs: no global state, no I/O, no
//! randomness, safe to call concurrently without synchronization.
//!
//! # Features
//!
//! - `std` (default): `std::error::Error` for [`StatsError`] and serde's std support
//!
//! # Pipeline
//!
//! ```text
//! counts ─┬─► srm::check ──────────────┐
//!         └─► analysis::evaluate ──────┴─► decision::classify ─► Verdict
//!
//! planning::plan  (independent, before the test runs)
//! ```
//!
//! # Usage
//!
//! This crate is typically used through the main `uplift` crate, which adds
//! configuration, logging and serialization helpers.
//!
//! ```ignore
//! use uplift_core::{analysis, decision, srm, VariantObservation};
//!
//! let control = VariantObservation::new("control", 1000, 100)?;
//! let treatment = VariantObservation::new("treatment", 1000, 150)?;
//! let srm = srm::check(&control, &treatment, 0.5)?;
//! let test = analysis::evaluate(&control, &treatment, 0.95)?;
//! let verdict = decision::classify(&test, &srm, &[], 0.05)?;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod analysis;
pub mod constants;
pub mod decision;
pub mod error;
pub mod math;
pub mod planning;
pub mod result;
pub mod srm;
pub mod types;

// Re-export commonly used items at crate root
pub use decision::ClassifierConfig;
pub use error::StatsError;
pub use result::{
    Decision, EffectSize, EffectSizeClass, ProportionTestResult, RiskFlag, SampleSizePlan,
    SrmResult, Verdict,
};
pub use types::{Direction, GuardrailMetric, VariantObservation};

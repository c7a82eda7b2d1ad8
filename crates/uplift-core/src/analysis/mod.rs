//! Statistical analysis of a completed two-arm test.
//!
//! - **Proportion test** (`proportion`): two-proportion z-test, uplift and interval
//! - **Effect size** (`effect`): Cohen's h, relative risk and odds ratio
//! - **Power** (`power`): achieved power against a planned minimum detectable effect

pub mod effect;
pub mod power;
pub mod proportion;

pub use effect::effect_size;
pub use power::achieved_power;
pub use proportion::evaluate;

//! Serialization helpers for analysis results.
//!
//! Rendering reports is the caller's job; this module only turns results into
//! machine-readable JSON.

mod json;

pub use json::{to_json, to_json_pretty};

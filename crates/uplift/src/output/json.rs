//! JSON serialization for planning and analysis results.

use serde::Serialize;

/// Serialize a result to a compact JSON string.
///
/// Infinite z-scores (degenerate tests) are written as `null`, following
/// `serde_json`'s handling of non-finite floats. Such output does not
/// deserialize back into [`Analysis`](crate::Analysis); round-tripping needs a
/// finite `z_score`.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for result types).
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Serialize a result to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for result types).
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

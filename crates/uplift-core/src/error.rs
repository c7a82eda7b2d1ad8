//! Error kinds raised by the statistics core.
//!
//! Every numeric operation either returns a fully valid result or one of
//! these errors. Nothing is retried internally and no NaN or sentinel value
//! is ever handed back in place of an error.

extern crate alloc;

use alloc::string::String;
use core::fmt;

/// Errors that can occur while planning or analyzing an experiment.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsError {
    /// An input violates its documented domain.
    ///
    /// Examples: zero users in an arm, an effect size of zero, a ratio or
    /// probability outside `(0, 1)`.
    Range {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Description of the violated constraint.
        message: String,
    },

    /// A probability handed to the normal quantile function is outside `(0, 1)`.
    Domain {
        /// The rejected probability.
        value: f64,
    },
}

impl StatsError {
    /// Build a [`StatsError::Range`] for `parameter`.
    pub fn range(parameter: &'static str, message: impl Into<String>) -> Self {
        StatsError::Range {
            parameter,
            message: message.into(),
        }
    }

    /// Whether this is a range violation.
    pub fn is_range(&self) -> bool {
        matches!(self, StatsError::Range { .. })
    }

    /// Whether this is a quantile domain violation.
    pub fn is_domain(&self) -> bool {
        matches!(self, StatsError::Domain { .. })
    }
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::Range { parameter, message } => {
                write!(f, "invalid `{}`: {}", parameter, message)
            }
            StatsError::Domain { value } => {
                write!(
                    f,
                    "normal quantile requires a probability in (0, 1), got {}",
                    value
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StatsError {}

/// Check that `value` lies strictly inside `(0, 1)`.
pub(crate) fn ensure_open_unit(parameter: &'static str, value: f64) -> Result<(), StatsError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(StatsError::range(
            parameter,
            alloc::format!("must be in (0, 1), got {}", value),
        ))
    }
}

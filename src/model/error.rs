//! Error types for the grid core.
//!
//! This module defines the error taxonomy using `thiserror`. Only two kinds
//! of condition are surfaced to callers as errors:
//!
//! - [`GridError::InvalidConfiguration`] - a setter rejected a value; the prior
//!   configuration is retained
//! - [`GridError::IndexOutOfRange`] / [`GridError::GeometryUnavailable`] -
//!   explicit single-item geometry queries that cannot be answered
//!
//! Everything else is recovered locally: out-of-range selections are clamped,
//! a missing item provider behaves as an empty one, and a failed focus search
//! is reported to listeners as a normal outcome.

use thiserror::Error;

/// Errors surfaced by the grid core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// A configuration value was rejected at its setter.
    ///
    /// **Recovery**: none needed. The container keeps its previous value.
    #[error("invalid {field}: {reason}")]
    InvalidConfiguration {
        /// Name of the rejected option.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// A geometry query named an index outside `0..count`.
    #[error("index {index} out of range for {count} items")]
    IndexOutOfRange {
        /// Requested adapter position.
        index: usize,
        /// Current item count.
        count: usize,
    },

    /// The index is valid but its rectangle cannot be computed yet
    /// (the container has not been measured).
    #[error("geometry for index {index} is not available before measurement")]
    GeometryUnavailable {
        /// Requested adapter position.
        index: usize,
    },

    /// A layout definition document could not be turned into item spans.
    #[error("invalid layout definition: {0}")]
    InvalidLayoutDefinition(String),
}

impl GridError {
    /// Shorthand for [`GridError::InvalidConfiguration`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        GridError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

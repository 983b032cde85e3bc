//! Error types for sequence validation and alignment.

use std::fmt;

/// Which of the two `compute` arguments an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    /// The first sequence passed by the caller.
    First,
    /// The second sequence passed by the caller.
    Second,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("first"),
            Self::Second => f.write_str("second"),
        }
    }
}

/// Errors from sequence validation, alignment, and matrix rendering.
#[derive(Debug, thiserror::Error)]
pub enum AlignError {
    /// Returned when `compute` runs without a distance function configured.
    #[error("invalid distance function: none supplied")]
    InvalidDistanceFunction,

    /// Returned when an input is not an ordered collection of decodable elements.
    #[error("{argument} series is not a sequence: {reason}")]
    NotASequence {
        /// The offending argument.
        argument: Argument,
        /// Human-readable cause.
        reason: String,
    },

    /// Returned when an input sequence has zero elements.
    #[error("{argument} series is empty")]
    EmptySequence {
        /// The offending argument.
        argument: Argument,
    },

    /// Returned when the path or rendering is requested before a successful `compute`.
    #[error("no alignment computed yet")]
    NotComputed,

    /// Wraps a write failure while rendering the cost matrix.
    #[error("failed to render cost matrix")]
    Render(#[from] std::io::Error),
}

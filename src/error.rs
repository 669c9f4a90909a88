//! Error types shared across the kernel and spectrum layers.
//!
//! All failures in this crate are fail-fast: the computations are
//! deterministic pure functions of their inputs, so retrying a failed
//! call cannot succeed and no retry machinery exists.

use std::fmt;

/// Result alias used throughout the crate.
pub type LensResult<T> = Result<T, LensError>;

/// Errors surfaced by state providers, the Gram builder and the
/// spectrum analyzer.
#[derive(Debug, Clone, PartialEq)]
pub enum LensError {
    /// A feature row's length does not match the provider's binding arity.
    ShapeMismatch {
        expected: usize,
        got: usize,
        context: String,
    },
    /// The oracle returned state vectors of inconsistent length within
    /// one batch. Indicates a misconfigured oracle, not a transient
    /// condition.
    DimensionMismatch {
        expected: usize,
        got: usize,
        context: String,
    },
    /// A requested backend is not compiled into this build. Raised at
    /// construction time so the failure is visible before any
    /// computation is attempted.
    MissingDependency { backend: String },
    /// The swept similarity signal is identically zero, so power
    /// normalization is undefined.
    DegenerateSignal { operation: String },
    /// Sweep parameters fail validation (too few samples, empty
    /// interval, feature index out of range).
    InvalidSweep { reason: String },
    /// A circuit parameter name was not present in the assignment.
    UnboundParameter { name: String },
}

impl LensError {
    pub fn shape_mismatch(expected: usize, got: usize, context: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected,
            got,
            context: context.into(),
        }
    }

    pub fn dimension_mismatch(expected: usize, got: usize, context: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            expected,
            got,
            context: context.into(),
        }
    }

    pub fn missing_dependency(backend: impl Into<String>) -> Self {
        Self::MissingDependency {
            backend: backend.into(),
        }
    }

    pub fn degenerate_signal(operation: impl Into<String>) -> Self {
        Self::DegenerateSignal {
            operation: operation.into(),
        }
    }

    pub fn invalid_sweep(reason: impl Into<String>) -> Self {
        Self::InvalidSweep {
            reason: reason.into(),
        }
    }

    pub fn unbound_parameter(name: impl Into<String>) -> Self {
        Self::UnboundParameter { name: name.into() }
    }
}

impl fmt::Display for LensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LensError::ShapeMismatch {
                expected,
                got,
                context,
            } => write!(
                f,
                "shape mismatch in {}: expected {} features, got {}",
                context, expected, got
            ),
            LensError::DimensionMismatch {
                expected,
                got,
                context,
            } => write!(
                f,
                "dimension mismatch in {}: expected state of length {}, got {}",
                context, expected, got
            ),
            LensError::MissingDependency { backend } => {
                write!(f, "backend '{}' is not available in this build", backend)
            }
            LensError::DegenerateSignal { operation } => write!(
                f,
                "degenerate (all-zero) signal in {}: power normalization undefined",
                operation
            ),
            LensError::InvalidSweep { reason } => write!(f, "invalid sweep: {}", reason),
            LensError::UnboundParameter { name } => {
                write!(f, "circuit parameter '{}' has no bound value", name)
            }
        }
    }
}

impl std::error::Error for LensError {}

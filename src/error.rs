//! Error types for geometric algebra operations.
//!
//! Every failure is a local precondition check that fires before any result
//! is built, so callers never observe a partially computed multivector.

use thiserror::Error;

/// Main error type for multivector and GAPoT operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GaError {
    /// Operands were declared in different vector spaces.
    #[error("Dimension mismatch: expected vector space dimension {expected}, got {actual}")]
    DimensionMismatch { expected: u32, actual: u32 },

    /// Inverse or quotient of a zero or singular object.
    #[error("Division by zero: {context}")]
    DivisionByZero { context: String },

    /// Identifier or phasor input rejected at construction time.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The rotation plane between two antipodal vectors is not unique.
    #[error("Undefined rotor: vectors are antipodal, rotation plane is not unique")]
    UndefinedRotor,

    /// Pairwise operation over lists of different lengths.
    #[error("Length mismatch: {left} vs {right} elements")]
    LengthMismatch { left: usize, right: usize },

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Floating-point computation produced NaN or Inf.
    #[error("Non-finite value: {context}")]
    NonFinite { context: String },

    /// Operand exceeds what an algorithm is built to handle.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Result type alias for geometric algebra operations.
pub type Result<T> = std::result::Result<T, GaError>;

impl GaError {
    /// Create a dimension mismatch error.
    #[must_use]
    pub const fn dimension_mismatch(expected: u32, actual: u32) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create a division by zero error.
    #[must_use]
    pub fn division_by_zero(context: impl Into<String>) -> Self {
        Self::DivisionByZero {
            context: context.into(),
        }
    }

    /// Create a malformed input error.
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Create a length mismatch error.
    #[must_use]
    pub const fn length_mismatch(left: usize, right: usize) -> Self {
        Self::LengthMismatch { left, right }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a non-finite value error.
    #[must_use]
    pub fn non_finite(context: impl Into<String>) -> Self {
        Self::NonFinite {
            context: context.into(),
        }
    }

    /// Create an unsupported operand error.
    #[must_use]
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }
}

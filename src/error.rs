//! Error types for the cell model.

use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Coarse classification of a [`ModelError`], for callers that branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidParameter,
    Domain,
    DivideByZero,
    Scenario,
}

/// Model error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Raw input rejected when a value type is built or assigned
    #[error("invalid parameter {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A correlation was driven outside its valid domain
    #[error("{quantity} is undefined: {reason}")]
    Domain {
        quantity: &'static str,
        reason: String,
    },

    /// A degenerate input drove a denominator to zero
    #[error("division by zero in {quantity}: {reason}")]
    DivideByZero {
        quantity: &'static str,
        reason: String,
    },

    /// Scenario file could not be read or parsed
    #[error("scenario error: {0}")]
    Scenario(String),
}

impl ModelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ModelError::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            ModelError::Domain { .. } => ErrorKind::Domain,
            ModelError::DivideByZero { .. } => ErrorKind::DivideByZero,
            ModelError::Scenario(_) => ErrorKind::Scenario,
        }
    }

    pub(crate) fn invalid(parameter: &'static str, value: f64, reason: &'static str) -> Self {
        ModelError::InvalidParameter {
            parameter,
            value,
            reason,
        }
    }

    pub(crate) fn domain(quantity: &'static str, reason: impl Into<String>) -> Self {
        ModelError::Domain {
            quantity,
            reason: reason.into(),
        }
    }

    pub(crate) fn divide_by_zero(quantity: &'static str, reason: impl Into<String>) -> Self {
        ModelError::DivideByZero {
            quantity,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Scenario(err.to_string())
    }
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        ModelError::Scenario(err.to_string())
    }
}

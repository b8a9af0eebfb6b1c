//! Error taxonomy for catalog construction, formula bodies and invocation.

use crate::value::{ParamKind, ParseError};

/// Catalog construction failed under [`crate::ResolutionPolicy::FailFast`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot resolve a parameter schema for '{operation}': {reason}")]
    SchemaResolution { operation: String, reason: String },
}

/// A formula rejected its (well-typed) arguments.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormulaError {
    #[error("at least one value is required")]
    EmptyInput,

    #[error("at least {required} values are required (got {got})")]
    InsufficientData { required: usize, got: usize },

    #[error("{name} {reason}")]
    OutOfDomain { name: String, reason: String },

    #[error("{0}")]
    InvalidCombination(String),

    /// The bound arguments do not line up with what the formula reads.
    #[error("argument {index} is not bound to a {expected}")]
    ArgumentMismatch { index: usize, expected: ParamKind },
}

impl FormulaError {
    /// Shorthand for [`FormulaError::OutOfDomain`].
    pub fn out_of_domain(name: &str, reason: impl Into<String>) -> Self {
        Self::OutOfDomain {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// A recoverable failure of one invocation cycle.
///
/// None of these leave the runner in a broken state; the caller reports the
/// error and moves on to the next request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvokeError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("missing required parameter '{parameter}' for {operation}")]
    MissingParameter { operation: String, parameter: String },

    #[error("invalid value for parameter '{parameter}' of {operation}: {source}")]
    ParameterType {
        operation: String,
        parameter: String,
        raw: String,
        source: ParseError,
    },

    #[error("invalid input for {operation}: {reason}")]
    InvalidCombination { operation: String, reason: String },

    #[error("{operation} takes {expected} argument(s) but {got} were given")]
    TooManyArguments {
        operation: String,
        expected: usize,
        got: usize,
    },

    #[error("{operation} has no parameter named '{parameter}'")]
    UnknownParameter { operation: String, parameter: String },
}

impl InvokeError {
    /// Stable snake_case tag for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownOperation(_) => "unknown_operation",
            Self::MissingParameter { .. } => "missing_parameter",
            Self::ParameterType { .. } => "parameter_type",
            Self::InvalidCombination { .. } => "invalid_combination",
            Self::TooManyArguments { .. } => "too_many_arguments",
            Self::UnknownParameter { .. } => "unknown_parameter",
        }
    }
}

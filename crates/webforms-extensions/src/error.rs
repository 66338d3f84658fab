//! Serializer errors.

use thiserror::Error;

/// Errors raised while converting values to or from JSON.
#[derive(Error, Debug)]
pub enum SerializerError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No converter registered for {0}")]
    NoConverter(&'static str),

    #[error("Unexpected JSON shape for {type_name}: {reason}")]
    InvalidShape {
        type_name: &'static str,
        reason: String,
    },

    #[error("Converter produced a value that is not a {expected}")]
    TypeMismatch { expected: &'static str },

    #[error("Nesting depth {depth} exceeds the recursion limit of {limit}")]
    RecursionLimitExceeded { depth: usize, limit: usize },

    #[error("JSON length {length} exceeds the maximum of {max}")]
    MaxLengthExceeded { length: usize, max: usize },
}

impl SerializerError {
    /// Create an invalid-shape error for a target type.
    pub fn invalid_shape<T: ?Sized>(reason: impl Into<String>) -> Self {
        SerializerError::InvalidShape {
            type_name: std::any::type_name::<T>(),
            reason: reason.into(),
        }
    }
}

pub type SerializerResult<T> = Result<T, SerializerError>;

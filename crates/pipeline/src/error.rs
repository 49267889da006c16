//! Boundary validation errors.

use thiserror::Error;

/// A parameter supplied by the UI layer was rejected.
///
/// Parameters are never coerced into range; the caller gets this back
/// with the offending value instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("Invalid {name} `{value}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl ParameterError {
    pub fn invalid(name: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        ParameterError::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParameterError>;

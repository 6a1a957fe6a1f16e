//! Error types for record decoding.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single violated field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is absent.
    #[error("{0}: field required")]
    MissingField(String),

    /// The value has the wrong type and cannot be safely coerced.
    #[error("{field}: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: String,
    },

    /// The value has the right type but not the right shape (e.g. an email).
    #[error("{field}: {reason}")]
    FormatError { field: String, reason: String },

    /// The value parses but lies outside the accepted range.
    #[error("{field}: {reason}")]
    OutOfRange { field: String, reason: String },
}

impl ValidationError {
    /// Dotted path of the offending field (`author.email`).
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingField(field)
            | ValidationError::TypeMismatch { field, .. }
            | ValidationError::FormatError { field, .. }
            | ValidationError::OutOfRange { field, .. } => field.as_str(),
        }
    }

    /// Machine-readable reason tag.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "missing",
            ValidationError::TypeMismatch { .. } => "type_mismatch",
            ValidationError::FormatError { .. } => "format_error",
            ValidationError::OutOfRange { .. } => "out_of_range",
        }
    }

    pub fn detail(&self) -> ErrorDetail {
        ErrorDetail {
            field: self.field().to_string(),
            reason: self.reason(),
            message: self.to_string(),
        }
    }
}

/// Serializable view of a [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub field: String,
    pub reason: &'static str,
    pub message: String,
}

/// Every violation found while decoding one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Finds the violation reported for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    pub fn details(&self) -> Vec<ErrorDetail> {
        self.errors.iter().map(ValidationError::detail).collect()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self { errors: vec![error] }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.errors.len() == 1 { "error" } else { "errors" };
        write!(f, "{} validation {}", self.errors.len(), noun)?;
        for error in &self.errors {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

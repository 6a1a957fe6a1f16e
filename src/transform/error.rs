//! Error types for operation dispatch.

use thiserror::Error;

use super::operation::Operation;

/// Errors that can occur while resolving an operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OperationError {
    /// The requested operation is not one of [`Operation::ALL`].
    #[error("Operation not supported. Available: {}", Operation::available())]
    UnknownOperation(String),
}

//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A query matched no rows where rows are required
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage or other internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

//! Transaction error types.

use thiserror::Error;

/// Boxed source failure from a resource driver or a unit of work.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Transaction errors.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// Commit or rollback was called without a matching begin.
    #[error("no transaction is active")]
    NoActiveTransaction,

    /// The underlying resource rejected a begin/commit/rollback command.
    #[error("resource failure: {0}")]
    Resource(#[source] BoxError),

    /// The wrapped unit of work failed.
    #[error("unit of work failed: {0}")]
    Work(#[source] BoxError),
}

impl TransactionError {
    pub fn resource(source: impl Into<BoxError>) -> Self {
        Self::Resource(source.into())
    }

    pub fn work(source: impl Into<BoxError>) -> Self {
        Self::Work(source.into())
    }
}

/// Result type for transaction operations.
pub type TransactionResult<T> = Result<T, TransactionError>;

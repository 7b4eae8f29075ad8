//! Wire-level driver contract.

/// One underlying transactional resource: a message-queue channel, a
/// database connection, an ORM session.
///
/// Implementations translate each verb into the resource's own
/// start/commit/rollback command and surface whatever failure the
/// resource reports. No further assumptions are made about failure modes.
pub trait ResourceDriver {
    /// Driver-specific failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue the resource's start-transaction command.
    fn start_transaction(&mut self) -> Result<(), Self::Error>;

    /// Issue the resource's commit-transaction command.
    fn commit_transaction(&mut self) -> Result<(), Self::Error>;

    /// Issue the resource's rollback-transaction command.
    fn rollback_transaction(&mut self) -> Result<(), Self::Error>;
}

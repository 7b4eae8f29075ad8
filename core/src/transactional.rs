//! The transactional contract and its default executor.

use crate::error::{TransactionError, TransactionResult};

/// A transactional layer: one resource adapter, or a composite of them.
///
/// `begin`, `commit` and `rollback` stay directly callable for manual and
/// reentrant control; `execute` wraps a whole unit of work in them. The
/// three verbs are object safe so composites can hold heterogeneous
/// members as `dyn Transactional`; `execute` is a provided method kept out
/// of the vtable.
pub trait Transactional {
    /// Begin a transaction.
    fn begin(&mut self) -> TransactionResult<()>;

    /// Commit the current transaction.
    fn commit(&mut self) -> TransactionResult<()>;

    /// Rollback the current transaction.
    fn rollback(&mut self) -> TransactionResult<()>;

    /// Failure observation hook, called by `execute` before rolling back.
    ///
    /// The default does nothing. Implementations carrying an
    /// [`ErrorHandlerSlot`](crate::ErrorHandlerSlot) forward the failure
    /// to the installed handler.
    fn observe_error(&mut self, _error: &TransactionError) {}

    /// Execute a unit of work inside begin/commit/rollback.
    ///
    /// The work receives this transactional back, so nested `execute`
    /// calls on the same instance compose through the adapter's nesting
    /// counter.
    ///
    /// On success the work's result is returned after `commit`. On failure
    /// the failure is shown to [`observe_error`](Self::observe_error), the
    /// transaction is rolled back, and the work's failure is returned
    /// unchanged. A rollback failure on that path is logged and dropped so
    /// it cannot shadow the original one.
    ///
    /// A failing `begin` or `commit` propagates as-is; exactly one of
    /// `commit`/`rollback` is issued per call, after the work has fully
    /// finished.
    fn execute<T, F>(&mut self, work: F) -> TransactionResult<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> TransactionResult<T>,
    {
        self.begin()?;

        match work(self) {
            Ok(value) => {
                self.commit()?;
                Ok(value)
            }
            Err(error) => {
                self.observe_error(&error);
                if let Err(unwind) = self.rollback() {
                    log::warn!("rollback after failed unit of work also failed: {unwind}");
                }
                Err(error)
            }
        }
    }
}

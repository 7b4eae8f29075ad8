//! Nesting-aware wrapper around a resource driver.

use tandem_core::{
    ErrorHandler, ErrorHandlerSlot, TransactionError, TransactionResult, Transactional,
};

use crate::driver::ResourceDriver;

/// A transactional layer over one resource driver, reusable recursively.
///
/// The wrapper owns an integer depth counter. Only the outermost `begin`
/// (depth 0 -> 1) issues the driver's start command, and only the final
/// `commit` (depth 1 -> 0) issues the driver's commit command; commits at
/// intermediate depths are wire-level no-ops. `rollback` issues the
/// driver's rollback command at every depth, so an inner rollback
/// invalidates the whole nested transaction immediately.
///
/// `commit` or `rollback` at depth 0 is caller misuse and fails with
/// [`TransactionError::NoActiveTransaction`].
pub struct NestedTransactional<D: ResourceDriver> {
    driver: D,
    depth: u32,
    handler: ErrorHandlerSlot,
}

impl<D: ResourceDriver> NestedTransactional<D> {
    /// Wrap a driver. The counter starts at 0 and is owned by this
    /// instance alone.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            depth: 0,
            handler: ErrorHandlerSlot::new(),
        }
    }

    /// Current nesting depth; 0 means no transaction is active.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Whether a transaction is active.
    pub fn is_active(&self) -> bool {
        self.depth > 0
    }

    /// Install an error handler, replacing any previous one.
    pub fn set_error_handler(&mut self, handler: ErrorHandler) {
        self.handler.set(handler);
    }

    /// Shared access to the wrapped driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Consume the wrapper and hand the driver back.
    pub fn into_driver(self) -> D {
        self.driver
    }
}

impl<D: ResourceDriver> Transactional for NestedTransactional<D> {
    fn begin(&mut self) -> TransactionResult<()> {
        if self.depth == 0 {
            self.driver
                .start_transaction()
                .map_err(TransactionError::resource)?;
        }
        self.depth += 1;
        Ok(())
    }

    fn commit(&mut self) -> TransactionResult<()> {
        if self.depth == 0 {
            return Err(TransactionError::NoActiveTransaction);
        }

        self.depth -= 1;
        if self.depth == 0 {
            self.driver
                .commit_transaction()
                .map_err(TransactionError::resource)?;
        }
        Ok(())
    }

    fn rollback(&mut self) -> TransactionResult<()> {
        if self.depth == 0 {
            return Err(TransactionError::NoActiveTransaction);
        }

        self.depth -= 1;
        self.driver
            .rollback_transaction()
            .map_err(TransactionError::resource)
    }

    fn observe_error(&mut self, error: &TransactionError) {
        if let Some(mut handler) = self.handler.take() {
            handler(error, &*self);
            self.handler.restore(handler);
        }
    }
}

//! Single-slot error observation hook.

use crate::error::TransactionError;
use crate::transactional::Transactional;

/// Callback observing a failed `execute`.
///
/// Receives the failure and the transactional it came from, before the
/// failure propagates to the caller.
pub type ErrorHandler = Box<dyn FnMut(&TransactionError, &dyn Transactional)>;

/// A single mutable error-handler slot with replace-on-set semantics.
///
/// Invocation uses a take/restore discipline: the owner takes the handler
/// out, calls it with itself as `&dyn Transactional`, and puts it back.
/// The slot holds at most one handler; installing another replaces it.
#[derive(Default)]
pub struct ErrorHandlerSlot {
    handler: Option<ErrorHandler>,
}

impl ErrorHandlerSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self { handler: None }
    }

    /// Install a handler, replacing any previous one.
    pub fn set(&mut self, handler: ErrorHandler) {
        self.handler = Some(handler);
    }

    /// Whether a handler is installed.
    pub fn is_set(&self) -> bool {
        self.handler.is_some()
    }

    /// Take the handler out for invocation.
    pub fn take(&mut self) -> Option<ErrorHandler> {
        self.handler.take()
    }

    /// Put the handler back after invocation.
    pub fn restore(&mut self, handler: ErrorHandler) {
        self.handler = Some(handler);
    }
}

impl std::fmt::Debug for ErrorHandlerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorHandlerSlot")
            .field("is_set", &self.is_set())
            .finish()
    }
}

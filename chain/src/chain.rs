//! Chain coordinator over an ordered set of transactional members.

use std::cell::RefCell;
use std::rc::Rc;

use tandem_core::{
    ErrorHandler, ErrorHandlerSlot, TransactionError, TransactionResult, Transactional,
};

/// Shared handle to a chain member.
///
/// Members are shared so the same adapter can sit in a chain and still be
/// driven directly; the chain itself is single-threaded.
pub type SharedTransactional = Rc<RefCell<dyn Transactional>>;

/// Composes an ordered set of transactional layers into one logical
/// transaction.
///
/// Members are conceptually nested in insertion order (first added =
/// outermost): `begin` walks them in insertion order, `commit` and
/// `rollback` walk them in reverse, so unwinding follows
/// reverse-of-acquisition order. A chain is itself a [`Transactional`] and
/// can be a member of another chain.
///
/// Committing is best-effort with deterministic reporting: once any member
/// fails to commit, every remaining member is driven to `rollback`
/// instead, every member is still visited exactly once, and the first
/// failure of the pass is the one returned. Failures swallowed along the
/// way are logged and kept in an audit trail (see [`errors`](Self::errors)).
///
/// Membership is keyed by object identity and must not change while a
/// transaction is in flight.
pub struct ChainTransactional {
    members: Vec<SharedTransactional>,
    handler: ErrorHandlerSlot,
    suppressed: Vec<TransactionError>,
}

impl ChainTransactional {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            handler: ErrorHandlerSlot::new(),
            suppressed: Vec::new(),
        }
    }

    /// Create a chain from members, preserving their order.
    pub fn with_members(members: impl IntoIterator<Item = SharedTransactional>) -> Self {
        let mut chain = Self::new();
        for member in members {
            chain.add(member);
        }
        chain
    }

    /// Add a member at the end of the chain.
    ///
    /// Adding a handle that is already a member is a no-op.
    pub fn add(&mut self, member: SharedTransactional) {
        if self.members.iter().any(|existing| Rc::ptr_eq(existing, &member)) {
            return;
        }
        self.members.push(member);
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the chain has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Install an error handler, replacing any previous one.
    pub fn set_error_handler(&mut self, handler: ErrorHandler) {
        self.handler.set(handler);
    }

    /// Failures deliberately swallowed while unwinding: everything after
    /// the first failure of a commit or rollback pass, which is returned
    /// to the caller instead. Accumulates across passes until
    /// [`reset`](Self::reset).
    pub fn errors(&self) -> &[TransactionError] {
        &self.suppressed
    }

    /// Clear the suppressed-failure audit trail.
    pub fn reset(&mut self) {
        self.suppressed.clear();
    }

    /// Members in reverse insertion order, snapshotted so the walk can
    /// record suppressed failures on `self`.
    fn unwind_order(&self) -> Vec<SharedTransactional> {
        self.members.iter().rev().cloned().collect()
    }

    fn suppress(&mut self, error: TransactionError) {
        log::warn!("suppressed failure while unwinding chain: {error}");
        self.suppressed.push(error);
    }
}

impl Default for ChainTransactional {
    fn default() -> Self {
        Self::new()
    }
}

impl Transactional for ChainTransactional {
    /// Begin on every member in insertion order.
    ///
    /// No failure isolation: the first failing member aborts the fan-out
    /// and members already begun stay begun. The caller unwinds them with
    /// `rollback`, which the enclosing `execute` does on its failure path.
    fn begin(&mut self) -> TransactionResult<()> {
        for member in &self.members {
            member.borrow_mut().begin()?;
        }
        Ok(())
    }

    /// Commit on every member in reverse insertion order.
    ///
    /// After the first failure the remaining members are rolled back
    /// instead of committed. Every member is visited exactly once; the
    /// first failure is returned after the pass, later ones go to the
    /// audit trail.
    fn commit(&mut self) -> TransactionResult<()> {
        let mut must_rollback = false;
        let mut first_error = None;

        for member in self.unwind_order() {
            let result = if must_rollback {
                member.borrow_mut().rollback()
            } else {
                member.borrow_mut().commit()
            };

            if let Err(error) = result {
                must_rollback = true;
                if first_error.is_none() {
                    first_error = Some(error);
                } else {
                    self.suppress(error);
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Rollback on every member in reverse insertion order,
    /// unconditionally.
    ///
    /// One member's failure never stops another member's rollback attempt;
    /// the first failure is returned after the pass, later ones go to the
    /// audit trail.
    fn rollback(&mut self) -> TransactionResult<()> {
        let mut first_error = None;

        for member in self.unwind_order() {
            if let Err(error) = member.borrow_mut().rollback() {
                if first_error.is_none() {
                    first_error = Some(error);
                } else {
                    self.suppress(error);
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    fn observe_error(&mut self, error: &TransactionError) {
        if let Some(mut handler) = self.handler.take() {
            handler(error, &*self);
            self.handler.restore(handler);
        }
    }
}

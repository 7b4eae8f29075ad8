//! Tandem Core
//!
//! The transaction coordination contract shared by every layer.
//!
//! Responsibilities:
//! - Define the `Transactional` contract (begin/commit/rollback)
//! - Provide the default `execute` wrapping a unit of work
//! - Carry the failure taxonomy (`TransactionError`)
//! - Hold the single-slot error observation hook

mod error;
mod handler;
mod transactional;

pub use error::{BoxError, TransactionError, TransactionResult};
pub use handler::{ErrorHandler, ErrorHandlerSlot};
pub use transactional::Transactional;

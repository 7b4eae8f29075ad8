//! Tandem Chain
//!
//! Composition of several transactional layers into one logical
//! transaction.
//!
//! Responsibilities:
//! - Fan begin/commit/rollback out to every member in a defined order
//! - Drive remaining members to rollback once a commit fails
//! - Surface the first failure of a pass, audit the suppressed ones

mod chain;

pub use chain::{ChainTransactional, SharedTransactional};

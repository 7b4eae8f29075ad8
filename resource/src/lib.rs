//! Tandem Resource
//!
//! The boundary to one external transactional resource.
//!
//! Responsibilities:
//! - Define the wire-level `ResourceDriver` contract
//! - Wrap a driver with reentrant nesting (`NestedTransactional`)

mod driver;
mod nested;

pub use driver::ResourceDriver;
pub use nested::NestedTransactional;

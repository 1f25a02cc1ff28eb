//! Project model.
//!
//! A [`ProjectTree`] is built once per build invocation from static
//! configuration: one root [`Project`] and its subprojects in declaration order.

mod order;
mod types;

pub use order::evaluation_order;
pub use types::*;

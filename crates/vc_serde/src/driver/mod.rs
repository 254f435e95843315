//! Per-call traversal state.
//!
//! A driver is created for every top-level call and carries the registry,
//! the active format and the handler chain through the recursion.

// -----------------------------------------------------------------------------
// Modules

mod de;
mod object_stack;
mod ser;
mod trace;

// -----------------------------------------------------------------------------
// Exports

pub use de::DeserializeDriver;
pub use ser::SerializeDriver;

pub(crate) use trace::{clear_trace, report_failure};

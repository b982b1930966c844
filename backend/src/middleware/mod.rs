//! Request middleware.
//!
//! [`Trace`] runs every request inside a trace-id scope so log lines, error
//! bodies and the `trace-id` response header agree.

pub mod trace;

pub use trace::Trace;

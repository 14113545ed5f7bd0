//! Logging setup for every chainboard entry point: JSON lines on native
//! targets, the developer console in the browser.

mod tracing;

pub use crate::tracing::{DEFAULT_FILTER, init};

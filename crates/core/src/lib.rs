//! saboteur-core
//!
//! Core library for finding the elements that make groups fail, when only
//! whole groups can be tested.
//!
//! This crate defines the data model (groups, batches, membership tables),
//! the minimal set-cover search, the identifying test-batch designer, the
//! logical diagnoser, CSV ingestion, and plain-text batch reports.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, bindings, etc.).

pub mod error;
pub mod io;
pub mod model;
pub mod report;
pub mod services;

pub use error::{SaboteurError, SaboteurResult};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

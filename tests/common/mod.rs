//! Shared test utilities for logfold integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Every helper is deterministic: syslog timestamps are
//! pinned to a fixed year and components log into [`Diagnostics::silent`]
//! unless a harness captures output on purpose.

pub mod assertions;
pub mod builders;
pub mod fake_store;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fake_store::*;
pub use fixtures::*;

pub use logfold::core::Diagnostics;

//! # sched-core
//!
//! Error taxonomy and the opaque run identifier shared across every other
//! crate in the workspace. Has no dependency on the calendar or domain
//! crates so that it can sit at the bottom of the dependency graph.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error taxonomy and the `ensure!`/`fail!` macros.
pub mod errors;

/// Opaque per-run identifier (`scheduler_run_id` / `batch_id`).
pub mod run_id;

pub use errors::{Error, Result};
pub use run_id::RunId;

//! # sched-rules
//!
//! Per-state exclusion windows (§4.2), the exclusion evaluator (§4.3), and
//! deterministic send-date jitter (§4.4). Depends on `sched-domain` for
//! `Contact`/`State`/`EmailKind`/`OrganizationConfig` and `sched-time` for
//! date arithmetic.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `ExclusionEvaluator` and its `Outcome`.
pub mod evaluator;
/// Deterministic send-date jitter.
pub mod jitter;
/// `StateRules` lookup table.
pub mod rule;

pub use evaluator::{ExclusionEvaluator, Outcome};
pub use jitter::{hash_mod, jitter};
pub use rule::{state_rule, ExclusionRule};

//! # sched-store
//!
//! Capability traits the engine consumes from its host: `ContactStore`,
//! `ScheduleStore` (§6.1, §6.2), and `Clock` (§6.4). Also ships an
//! in-memory reference implementation of each alongside the trait it
//! satisfies — test scaffolding, not a production store.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `Clock` capability and `FixedClock`.
pub mod clock;
/// `ContactStore` contract.
pub mod contact_store;
/// In-memory reference implementations.
pub mod memory;
/// `ScheduleStore` contract.
pub mod schedule_store;

pub use clock::{Clock, FixedClock};
pub use contact_store::{ContactStore, SentEmailObservation};
pub use memory::{InMemoryContactStore, InMemoryScheduleStore};
pub use schedule_store::{ExistingScheduleRecord, ScheduleStore};

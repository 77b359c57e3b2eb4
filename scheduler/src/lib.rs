//! # scheduler
//!
//! Email-schedule engine for an insurance contact platform.
//!
//! This crate is a **façade** over the underlying `sched-*` workspace
//! crates: application code should depend on `scheduler` rather than the
//! individual pieces. [`SchedulerDriver::run`] is the single entrypoint —
//! it takes an org config plus a `Clock`/`ContactStore`/`ScheduleStore`
//! triple and produces a [`RunReport`].
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! scheduler = "0.1"
//! ```
//!
//! ```rust
//! use scheduler::{CancelToken, SchedulerDriver};
//! use scheduler::domain::OrganizationConfig;
//! use scheduler::store::{FixedClock, InMemoryContactStore, InMemoryScheduleStore};
//! use scheduler::time::Date;
//!
//! let org = OrganizationConfig::default();
//! let today = Date::from_ymd(2024, 6, 17).unwrap();
//! let clock = FixedClock::new(today, 1_718_000_000_000);
//! let contacts = InMemoryContactStore::new(today);
//! let mut schedules = InMemoryScheduleStore::new();
//!
//! let report = SchedulerDriver::run(
//!     &org, &clock, &contacts, &mut schedules, &CancelToken::new(),
//! )
//! .unwrap();
//! assert_eq!(report.contacts_processed, 0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Cooperative cancellation token (§5).
pub mod cancel;
/// The driver pipeline (§4.10).
pub mod driver;
/// `RunReport` (§4.10, §6.3).
pub mod report;

pub use cancel::CancelToken;
pub use driver::SchedulerDriver;
pub use report::RunReport;

/// Error taxonomy and the opaque run id.
pub use sched_core as core;

/// Date/time primitives.
pub use sched_time as time;

/// The data model: `Contact`, `OrganizationConfig`, `EmailSchedule`, etc.
pub use sched_domain as domain;

/// State exclusion rules and jitter.
pub use sched_rules as rules;

/// `AnniversaryPlanner`, `CampaignPlanner`, `FollowupClassifier`.
pub use sched_planner as planner;

/// `LoadBalancer`.
pub use sched_balancer as balancer;

/// Capability traits (`Clock`, `ContactStore`, `ScheduleStore`) and their
/// in-memory reference implementations.
pub use sched_store as store;

/// Diff classification and transactional apply.
pub use sched_persistence as persistence;

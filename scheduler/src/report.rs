//! `RunReport` (§4.10, §6.3).

use sched_core::errors::Error;
use sched_core::RunId;

/// The outcome of one `SchedulerDriver::run` invocation.
///
/// Re-running on unchanged inputs must produce `inserts == updates ==
/// deletes == 0` and leave the database byte-identical (§4.10).
#[derive(Debug, Clone)]
pub struct RunReport {
    /// This run's fresh opaque identifier.
    pub scheduler_run_id: RunId,
    /// Contacts the planners actually ran over.
    pub contacts_processed: usize,
    /// Rows newly inserted.
    pub inserts: usize,
    /// Rows whose content changed.
    pub updates: usize,
    /// Rows left untouched because they already matched.
    pub preserved: usize,
    /// Rows deleted because they no longer appear in the planned set.
    pub deletes: usize,
    /// Candidate schedules that ended up `Skipped` (exclusion windows,
    /// inactive campaigns, etc.) — not the same as a contact-level error.
    pub skipped: usize,
    /// Non-fatal per-contact errors encountered and tallied during planning
    /// (§7: `InvalidContactData` never aborts a run).
    pub errors: Vec<Error>,
}

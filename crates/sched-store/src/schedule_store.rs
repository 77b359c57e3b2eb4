//! `ScheduleStore` contract (§6.1, §6.2).

use sched_core::errors::Result;
use sched_core::RunId;
use sched_domain::{EmailSchedule, IdentityKey};
use sched_time::{Date, Time};

/// A previously-persisted schedule row, as read back from the store
/// (§6.1): `(contact_id, email_kind_string, scheduled_date, scheduled_time,
/// status, skip_reason, scheduler_run_id, created_at)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExistingScheduleRecord {
    /// The contact this schedule is for.
    pub contact_id: i64,
    /// Stringified `EmailKind` (§6.2).
    pub email_kind: String,
    /// The scheduled send date.
    pub scheduled_date: Date,
    /// The scheduled send time.
    pub scheduled_time: Time,
    /// The fixed lowercase/hyphenated status string (§6.2).
    pub status: String,
    /// The skip reason, if `status = "skipped"`.
    pub skip_reason: Option<String>,
    /// The run that last wrote this row.
    pub scheduler_run_id: RunId,
    /// Milliseconds since the Unix epoch this row was first created.
    pub created_at: i64,
}

impl ExistingScheduleRecord {
    /// This record's diff/dedup identity key (§4.9).
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            contact_id: self.contact_id,
            email_kind: self.email_kind.clone(),
            scheduled_date: self.scheduled_date.ymd(),
        }
    }

    /// Whether this record participates in DELETE candidacy (§4.9):
    /// sent/processing rows are never deleted.
    pub fn is_delete_eligible(&self) -> bool {
        matches!(self.status.as_str(), "pre-scheduled" | "scheduled" | "skipped")
    }
}

/// Read/write access to persisted schedule rows for a run (§6.1, §6.2).
/// The engine owns every row it writes; the store only ever sees whole-
/// transaction batches from [`ScheduleStore::apply_diff`].
pub trait ScheduleStore {
    /// Every schedule row currently persisted, across all contacts.
    fn existing_schedules(&self) -> Result<Vec<ExistingScheduleRecord>>;

    /// Apply a classified diff inside a single transaction. Returns the
    /// total number of rows written. Must roll back and leave the store
    /// byte-identical to its pre-call state on any per-statement failure —
    /// no partial application is permitted (§4.9).
    fn apply_diff(
        &mut self,
        inserts: &[EmailSchedule],
        updates: &[EmailSchedule],
        deletes: &[IdentityKey],
    ) -> Result<usize>;
}

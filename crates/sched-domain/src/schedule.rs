//! `EmailSchedule` and `ScheduleStatus` (§3).

use crate::email_kind::EmailKind;
use sched_core::RunId;
use sched_time::{Date, Time};

/// Lifecycle state of a schedule row (§4.10).
///
/// The engine only ever writes `PreScheduled` and `Skipped`; the other
/// three are set and preserved by external collaborators (the dispatcher).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScheduleStatus {
    /// Planned by the engine, not yet claimed by the dispatcher.
    PreScheduled,
    /// Claimed by the dispatcher, awaiting send.
    Scheduled,
    /// Currently being sent.
    Processing,
    /// Sent.
    Sent,
    /// Will not be sent; `reason` is retained for audit.
    Skipped {
        /// Human-readable skip reason.
        reason: String,
    },
}

impl ScheduleStatus {
    /// The fixed lowercase/hyphenated stringification used in the
    /// `status` column (§6.2).
    pub fn as_db_str(&self) -> &'static str {
        match self {
            ScheduleStatus::PreScheduled => "pre-scheduled",
            ScheduleStatus::Scheduled => "scheduled",
            ScheduleStatus::Processing => "processing",
            ScheduleStatus::Sent => "sent",
            ScheduleStatus::Skipped { .. } => "skipped",
        }
    }

    /// The `skip_reason` column value, if any.
    pub fn skip_reason(&self) -> Option<&str> {
        match self {
            ScheduleStatus::Skipped { reason } => Some(reason),
            _ => None,
        }
    }

    /// Whether a row in this status participates in diffing's DELETE
    /// candidacy (§4.9): sent/processing rows are never deleted.
    pub fn is_delete_eligible(&self) -> bool {
        matches!(
            self,
            ScheduleStatus::PreScheduled | ScheduleStatus::Scheduled | ScheduleStatus::Skipped { .. }
        )
    }
}

/// A single computed or persisted outbound email.
///
/// Identity for dedup/diff purposes is the triple `(contact_id, email_kind,
/// scheduled_date)` — see [`EmailSchedule::identity_key`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmailSchedule {
    /// The contact this schedule is for.
    pub contact_id: i64,
    /// What kind of email this is.
    pub email_kind: EmailKind,
    /// The calendar date to send on.
    pub scheduled_date: Date,
    /// The time of day to send at.
    pub scheduled_time: Time,
    /// Current lifecycle status.
    pub status: ScheduleStatus,
    /// Precedence priority; lower sorts/wins first.
    pub priority: i32,
    /// Optional template to render.
    pub template_id: Option<String>,
    /// The campaign instance this schedule belongs to, if any.
    pub campaign_instance_id: Option<i64>,
    /// The run that last wrote this row.
    pub scheduler_run_id: RunId,
}

/// The `(contact_id, email_kind_string, scheduled_date)` diff/dedup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    /// The contact this schedule is for.
    pub contact_id: i64,
    /// Stringified `EmailKind` (§6.2).
    pub email_kind: String,
    /// The scheduled date as a sortable `(year, month, day)` triple.
    pub scheduled_date: (u16, u8, u8),
}

impl EmailSchedule {
    /// Compute this schedule's identity key (§3, §4.9).
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            contact_id: self.contact_id,
            email_kind: self.email_kind.stringify(),
            scheduled_date: self.scheduled_date.ymd(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email_kind::AnniversaryKind;

    fn sched(date: Date) -> EmailSchedule {
        EmailSchedule {
            contact_id: 1,
            email_kind: EmailKind::Anniversary(AnniversaryKind::Birthday),
            scheduled_date: date,
            scheduled_time: Time::new(8, 30, 0).unwrap(),
            status: ScheduleStatus::PreScheduled,
            priority: 10,
            template_id: None,
            campaign_instance_id: None,
            scheduler_run_id: RunId::from_raw("run-1"),
        }
    }

    #[test]
    fn identity_key_ignores_time_status_and_run_id() {
        let d = Date::from_ymd(2024, 6, 17).unwrap();
        let mut a = sched(d);
        let mut b = sched(d);
        a.scheduled_time = Time::new(9, 0, 0).unwrap();
        a.status = ScheduleStatus::Skipped { reason: "x".into() };
        a.scheduler_run_id = RunId::from_raw("run-2");
        b.status = ScheduleStatus::PreScheduled;
        assert_eq!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn sent_and_processing_are_not_delete_eligible() {
        assert!(!ScheduleStatus::Sent.is_delete_eligible());
        assert!(!ScheduleStatus::Processing.is_delete_eligible());
        assert!(ScheduleStatus::PreScheduled.is_delete_eligible());
        assert!(ScheduleStatus::Skipped { reason: "r".into() }.is_delete_eligible());
    }
}

//! # sched-persistence
//!
//! Diff classification and transactional apply (§4.9). Classifies the
//! newly-planned set `N` against the store's existing set `E` by identity
//! key in a single pass over a hash-keyed representation, then hands the
//! classified batch to a [`sched_store::ScheduleStore`] inside one
//! transaction.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;

use sched_core::errors::Result;
use sched_domain::{EmailSchedule, IdentityKey};
use sched_store::{ExistingScheduleRecord, ScheduleStore};
use tracing::debug;

/// The outcome of classifying `N` against `E` (§4.9).
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    /// Rows in `N` with no matching key in `E`.
    pub inserts: Vec<EmailSchedule>,
    /// Rows in both, with a content difference.
    pub updates: Vec<EmailSchedule>,
    /// Keys in `E`, delete-eligible, with no matching key in `N`.
    pub deletes: Vec<IdentityKey>,
    /// Count of rows in both with no content difference (no write emitted).
    pub preserved: usize,
}

impl DiffResult {
    /// Total rows this diff will write if applied (inserts + updates +
    /// deletes; `preserved` never triggers a write).
    pub fn writes(&self) -> usize {
        self.inserts.len() + self.updates.len() + self.deletes.len()
    }
}

/// Classify `new` against `existing` by `(contact_id, email_kind, scheduled_date)`
/// (§4.9). A single pass over both sides, keyed by a hash map — the
/// natural representation per the design notes; no in-place SQL diffing.
pub fn diff(existing: &[ExistingScheduleRecord], new: &[EmailSchedule]) -> DiffResult {
    let existing_by_key: HashMap<IdentityKey, &ExistingScheduleRecord> =
        existing.iter().map(|r| (r.identity_key(), r)).collect();
    let new_by_key: HashMap<IdentityKey, &EmailSchedule> =
        new.iter().map(|s| (s.identity_key(), s)).collect();

    let mut result = DiffResult::default();

    for (key, candidate) in &new_by_key {
        match existing_by_key.get(key) {
            None => result.inserts.push((*candidate).clone()),
            Some(current) => {
                if content_differs(current, candidate) {
                    result.updates.push((*candidate).clone());
                } else {
                    result.preserved += 1;
                }
            }
        }
    }

    for (key, current) in &existing_by_key {
        if !new_by_key.contains_key(key) && current.is_delete_eligible() {
            result.deletes.push(key.clone());
        }
    }

    debug!(
        inserts = result.inserts.len(),
        updates = result.updates.len(),
        deletes = result.deletes.len(),
        preserved = result.preserved,
        "classified schedule diff"
    );
    result
}

/// Whether `candidate` (from `N`) differs from `current` (from `E`) in any
/// field that matters for UPDATE classification (§4.9): scheduled time,
/// status, skip reason, or the email-kind stringification.
fn content_differs(current: &ExistingScheduleRecord, candidate: &EmailSchedule) -> bool {
    current.scheduled_time != candidate.scheduled_time
        || current.status != candidate.status.as_db_str()
        || current.skip_reason.as_deref() != candidate.status.skip_reason()
        || current.email_kind != candidate.email_kind.stringify()
}

/// Apply a classified diff to `store` inside a single transaction (§4.9).
/// Returns the total rows written. On failure the store is required to
/// have rolled back; this function performs no retry.
pub fn apply(store: &mut impl ScheduleStore, result: &DiffResult) -> Result<usize> {
    store.apply_diff(&result.inserts, &result.updates, &result.deletes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sched_core::RunId;
    use sched_domain::{AnniversaryKind, EmailKind, ScheduleStatus};
    use sched_time::{Date, Time};

    fn d(y: u16, m: u8, dd: u8) -> Date {
        Date::from_ymd(y, m, dd).unwrap()
    }

    fn sched(contact_id: i64, date: Date, time_hour: u8, run_id: &str) -> EmailSchedule {
        EmailSchedule {
            contact_id,
            email_kind: EmailKind::Anniversary(AnniversaryKind::Birthday),
            scheduled_date: date,
            scheduled_time: Time::new(time_hour, 0, 0).unwrap(),
            status: ScheduleStatus::PreScheduled,
            priority: 10,
            template_id: None,
            campaign_instance_id: None,
            scheduler_run_id: RunId::from_raw(run_id),
        }
    }

    fn existing_from(s: &EmailSchedule, created_at: i64) -> ExistingScheduleRecord {
        ExistingScheduleRecord {
            contact_id: s.contact_id,
            email_kind: s.email_kind.stringify(),
            scheduled_date: s.scheduled_date,
            scheduled_time: s.scheduled_time,
            status: s.status.as_db_str().to_string(),
            skip_reason: s.status.skip_reason().map(String::from),
            scheduler_run_id: s.scheduler_run_id.clone(),
            created_at,
        }
    }

    // Testable property 6 groundwork: identical input classifies as all-preserve.
    #[test]
    fn identical_input_is_fully_preserved() {
        let s = sched(1, d(2024, 6, 17), 8, "run-1");
        let existing = vec![existing_from(&s, 1000)];
        let new = vec![sched(1, d(2024, 6, 17), 8, "run-2")];
        let result = diff(&existing, &new);
        assert_eq!(result.preserved, 1);
        assert!(result.inserts.is_empty());
        assert!(result.updates.is_empty());
        assert!(result.deletes.is_empty());
    }

    #[test]
    fn new_key_is_an_insert() {
        let new = vec![sched(1, d(2024, 6, 17), 8, "run-1")];
        let result = diff(&[], &new);
        assert_eq!(result.inserts.len(), 1);
    }

    #[test]
    fn changed_time_is_an_update() {
        let s = sched(1, d(2024, 6, 17), 8, "run-1");
        let existing = vec![existing_from(&s, 1000)];
        let new = vec![sched(1, d(2024, 6, 17), 9, "run-2")];
        let result = diff(&existing, &new);
        assert_eq!(result.updates.len(), 1);
    }

    // Testable property 12: sent rows never deleted.
    #[test]
    fn sent_row_missing_from_new_is_not_deleted() {
        let s = sched(1, d(2024, 6, 17), 8, "run-1");
        let mut existing_rec = existing_from(&s, 1000);
        existing_rec.status = "sent".to_string();
        let result = diff(&[existing_rec], &[]);
        assert!(result.deletes.is_empty());
    }

    #[test]
    fn pre_scheduled_row_missing_from_new_is_deleted() {
        let s = sched(1, d(2024, 6, 17), 8, "run-1");
        let existing_rec = existing_from(&s, 1000);
        let result = diff(&[existing_rec], &[]);
        assert_eq!(result.deletes.len(), 1);
    }
}

//! In-memory reference store (§6.1 supplement) — a trivial concrete
//! implementation shipped alongside the trait it satisfies, for tests
//! rather than production use.

use std::collections::HashMap;

use sched_core::errors::{Error, Result};
use sched_domain::{CampaignInstance, CampaignTypeConfig, Contact, EmailSchedule, IdentityKey};
use sched_time::Date;

use crate::contact_store::{ContactStore, SentEmailObservation};
use crate::schedule_store::{ExistingScheduleRecord, ScheduleStore};

/// An in-memory [`ContactStore`] backed by plain `Vec`s, for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContactStore {
    /// Today's date, used to resolve `contacts_in_window`.
    pub today: Option<Date>,
    /// The full contact population.
    pub contacts: Vec<Contact>,
    /// Active campaign instances.
    pub campaign_instances: Vec<CampaignInstance>,
    /// Campaign type configuration, keyed by type name.
    pub campaign_types: HashMap<String, CampaignTypeConfig>,
    /// Recent sends observed for follow-up classification.
    pub sent_emails: Vec<SentEmailObservation>,
}

impl InMemoryContactStore {
    /// An empty store anchored to `today`.
    pub fn new(today: Date) -> Self {
        Self {
            today: Some(today),
            ..Default::default()
        }
    }
}

impl ContactStore for InMemoryContactStore {
    fn contacts_in_window(&self, lookahead_days: i32, lookback_days: i32) -> Result<Vec<Contact>> {
        let today = self
            .today
            .ok_or_else(|| Error::ConfigurationError("InMemoryContactStore has no `today` set".into()))?;
        Ok(self
            .contacts
            .iter()
            .filter(|c| {
                c.birthday
                    .is_some_and(|b| month_day_in_window(today, lookback_days, lookahead_days, b))
                    || c.effective_date
                        .is_some_and(|e| month_day_in_window(today, lookback_days, lookahead_days, e))
            })
            .cloned()
            .collect())
    }

    fn all_contacts(&self) -> Result<Vec<Contact>> {
        Ok(self.contacts.clone())
    }

    fn total_contact_count(&self) -> Result<usize> {
        Ok(self.contacts.len())
    }

    fn active_campaign_instances(&self) -> Result<Vec<CampaignInstance>> {
        Ok(self.campaign_instances.clone())
    }

    fn campaign_type_config(&self, name: &str) -> Result<Option<CampaignTypeConfig>> {
        Ok(self.campaign_types.get(name).cloned())
    }

    fn sent_emails_for_followup(&self, lookback_days: i32) -> Result<Vec<SentEmailObservation>> {
        let today = self
            .today
            .ok_or_else(|| Error::ConfigurationError("InMemoryContactStore has no `today` set".into()))?;
        Ok(self
            .sent_emails
            .iter()
            .filter(|s| s.sent_date <= today && s.sent_date.diff_days(today) <= lookback_days)
            .cloned()
            .collect())
    }
}

/// Whether `event`'s month/day falls within `[today - lookback, today +
/// lookahead]`, checking the event's anchor in the previous, current, and
/// next year to cover wraparound at year boundaries.
fn month_day_in_window(today: Date, lookback_days: i32, lookahead_days: i32, event: Date) -> bool {
    let window_start = match today.add_days(-lookback_days) {
        Ok(d) => d,
        Err(_) => Date::MIN,
    };
    let window_end = match today.add_days(lookahead_days) {
        Ok(d) => d,
        Err(_) => Date::MAX,
    };
    let (_, m, d) = event.ymd();
    for year_offset in [-1i32, 0, 1] {
        let candidate_year = today.year() as i32 + year_offset;
        if !(1900..=2199).contains(&candidate_year) {
            continue;
        }
        let candidate_year = candidate_year as u16;
        let day = if m == 2 && d == 29 && !sched_time::is_leap_year(candidate_year) {
            28
        } else {
            d
        };
        if let Ok(candidate) = Date::from_ymd(candidate_year, m, day) {
            if candidate >= window_start && candidate <= window_end {
                return true;
            }
        }
    }
    false
}

/// An in-memory [`ScheduleStore`] backed by a `Vec`, for tests. `apply_diff`
/// is infallible-in-practice here (no I/O to fail on), but still returns
/// `Result` to match the trait's transactional contract.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScheduleStore {
    /// Every currently-persisted schedule row.
    pub rows: Vec<ExistingScheduleRecord>,
}

impl InMemoryScheduleStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with pre-existing rows (useful for idempotent-rerun
    /// tests, S5).
    pub fn seeded(rows: Vec<ExistingScheduleRecord>) -> Self {
        Self { rows }
    }
}

impl ScheduleStore for InMemoryScheduleStore {
    fn existing_schedules(&self) -> Result<Vec<ExistingScheduleRecord>> {
        Ok(self.rows.clone())
    }

    fn apply_diff(
        &mut self,
        inserts: &[EmailSchedule],
        updates: &[EmailSchedule],
        deletes: &[IdentityKey],
    ) -> Result<usize> {
        let mut written = 0;

        for del in deletes {
            let before = self.rows.len();
            self.rows.retain(|r| &r.identity_key() != del);
            written += before - self.rows.len();
        }

        for upd in updates {
            let key = upd.identity_key();
            if let Some(row) = self.rows.iter_mut().find(|r| r.identity_key() == key) {
                *row = to_record(upd, row.created_at);
                written += 1;
            }
        }

        for ins in inserts {
            // The in-memory store has no wall clock of its own; callers
            // that care about real `created_at` values should post-process
            // `rows` after `apply_diff`.
            self.rows.push(to_record(ins, 0));
            written += 1;
        }

        Ok(written)
    }
}

fn to_record(schedule: &EmailSchedule, created_at: i64) -> ExistingScheduleRecord {
    ExistingScheduleRecord {
        contact_id: schedule.contact_id,
        email_kind: schedule.email_kind.stringify(),
        scheduled_date: schedule.scheduled_date,
        scheduled_time: schedule.scheduled_time,
        status: schedule.status.as_db_str().to_string(),
        skip_reason: schedule.status.skip_reason().map(String::from),
        scheduler_run_id: schedule.scheduler_run_id.clone(),
        created_at,
    }
}

//! # sched-balancer
//!
//! `LoadBalancer` (§4.8): daily capacity enforcement over a planned
//! candidate set. Groups schedules by date, smooths effective-date emails
//! across a sliding window, and redistributes overloaded days' overflow
//! into the following catch-up window — all deterministically, so repeated
//! runs over identical inputs produce identical output ordering.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use sched_core::errors::Result;
use sched_domain::{AnniversaryKind, EmailKind, EmailSchedule, OrganizationConfig, ScheduleStatus};
use sched_rules::jitter;
use sched_time::Date;

/// Enforces daily send-capacity limits over a candidate set (§4.8).
#[derive(Debug, Clone, Copy)]
pub struct LoadBalancer;

impl LoadBalancer {
    /// Balance `schedules` against `total_contacts`'s resolved size-profile
    /// limits. Only `PreScheduled` items are moved; `Skipped` items pass
    /// through untouched. The output has the same length as the input
    /// (Testable property 5).
    pub fn balance(
        schedules: Vec<EmailSchedule>,
        total_contacts: usize,
        org: &OrganizationConfig,
    ) -> Result<Vec<EmailSchedule>> {
        let limits = org.size_limits();
        let daily_cap = (total_contacts as f64 * limits.daily_send_percentage_cap).round() as i64;
        let ed_cap_abs = limits.ed_daily_soft_limit as i64;
        let ed_cap_pct = (limits.ed_percentage_of_daily_cap * daily_cap as f64).floor() as i64;
        let ed_cap = ed_cap_abs.min(ed_cap_pct.max(0));

        let (mut moving, fixed): (Vec<EmailSchedule>, Vec<EmailSchedule>) = schedules
            .into_iter()
            .partition(|s| matches!(s.status, ScheduleStatus::PreScheduled));

        // Step 2: ED smoothing. Each effective-date item is first smeared
        // by a deterministic hash-based offset within the org's smoothing
        // window.
        let window = (limits.ed_smoothing_window_days as i32).max(1);
        for item in moving.iter_mut() {
            if item.email_kind == EmailKind::Anniversary(AnniversaryKind::EffectiveDate) {
                let year = item.scheduled_date.year();
                let offset = jitter(item.contact_id, "effective_date", year, window);
                if let Ok(shifted) = item.scheduled_date.add_days(offset) {
                    item.scheduled_date = shifted;
                }
            }
        }

        let mut by_date: BTreeMap<(u16, u8, u8), Vec<EmailSchedule>> = BTreeMap::new();
        for item in moving {
            by_date.entry(item.scheduled_date.ymd()).or_default().push(item);
        }

        // Any day whose ED count still exceeds the soft limit pushes its
        // excess (lowest contact_id stays, highest moves first) forward
        // within the same smoothing window.
        let dates: Vec<(u16, u8, u8)> = by_date.keys().copied().collect();
        for (y, m, dd) in dates {
            let ed_count = by_date[&(y, m, dd)]
                .iter()
                .filter(|s| s.email_kind == EmailKind::Anniversary(AnniversaryKind::EffectiveDate))
                .count() as i64;
            if ed_count <= ed_cap {
                continue;
            }
            let bucket = by_date.get_mut(&(y, m, dd)).expect("key came from by_date");
            let mut ed_indices: Vec<usize> = bucket
                .iter()
                .enumerate()
                .filter(|(_, s)| s.email_kind == EmailKind::Anniversary(AnniversaryKind::EffectiveDate))
                .map(|(i, _)| i)
                .collect();
            ed_indices.sort_by_key(|&i| std::cmp::Reverse(bucket[i].contact_id));
            let excess = (ed_count - ed_cap) as usize;
            let mut move_indices: Vec<usize> = ed_indices.into_iter().take(excess).collect();
            // Remove in descending index order so earlier removals don't
            // shift the indices still queued for removal.
            move_indices.sort_unstable_by(|a, b| b.cmp(a));
            let mut moved = Vec::new();
            for i in move_indices {
                moved.push(bucket.remove(i));
            }
            let anchor = Date::from_ymd(y, m, dd).expect("bucket key is a valid date");
            for (j, item) in moved.into_iter().enumerate() {
                let offset = 1 + (j % window as usize) as i32;
                if let Ok(target) = anchor.add_days(offset) {
                    by_date.entry(target.ymd()).or_default().push(item);
                }
            }
        }

        // Step 3: overage redistribution. Identify every overloaded day
        // up front so moved-in items never re-trigger redistribution in
        // this pass.
        let threshold_cap = ((org.overage_threshold * daily_cap as f64).floor() as i64).max(0);
        let overloaded: Vec<(u16, u8, u8)> = by_date
            .iter()
            .filter(|(_, items)| items.len() as i64 > threshold_cap.max(daily_cap))
            .map(|(k, _)| *k)
            .collect();

        let mut overflow: Vec<EmailSchedule> = Vec::new();
        for key in &overloaded {
            let bucket = by_date.get_mut(key).expect("key came from by_date");
            bucket.sort_by(|a, b| {
                a.priority
                    .cmp(&b.priority)
                    .then(b.contact_id.cmp(&a.contact_id))
            });
            let keep = threshold_cap.max(daily_cap).max(0) as usize;
            if bucket.len() > keep {
                overflow.extend(bucket.split_off(keep));
            }
        }

        let spread_days = org.catch_up_spread_days.max(1);
        for (i, item) in overflow.into_iter().enumerate() {
            let day_offset = 1 + (i % spread_days as usize) as i32;
            let mut placed = false;
            if let Ok(target) = item.scheduled_date.add_days(day_offset) {
                if !overloaded.contains(&target.ymd()) {
                    by_date.entry(target.ymd()).or_default().push(item.clone());
                    placed = true;
                }
            }
            if !placed {
                // Every candidate day in the spread window was itself
                // overloaded; keep the item on its original day rather
                // than drop it (Testable property 5: count preservation).
                by_date.entry(item.scheduled_date.ymd()).or_default().push(item);
            }
        }

        // Ordering guarantee: within each day, priority ascending then
        // contact_id ascending.
        let mut out = Vec::new();
        for (_, mut bucket) in by_date {
            bucket.sort_by(|a, b| a.priority.cmp(&b.priority).then(a.contact_id.cmp(&b.contact_id)));
            out.extend(bucket);
        }
        out.extend(fixed);
        Ok(out)
    }
}

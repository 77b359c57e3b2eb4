//! `AnniversaryPlanner` (§4.5).

use sched_core::RunId;
use sched_domain::{AnniversaryKind, Contact, EmailKind, EmailSchedule, OrganizationConfig, ScheduleStatus};
use sched_core::errors::Result;
use sched_rules::ExclusionEvaluator;
use sched_time::Date;

/// The fixed month/day AEP is anchored to, for the current year.
const AEP_MONTH: u8 = 9;
const AEP_DAY: u8 = 15;

/// Produces anniversary-driven candidate schedules for a single contact, in
/// precedence order: Birthday (10), EffectiveDate (20), PostWindow (40),
/// AEP (40).
#[derive(Debug, Clone, Copy)]
pub struct AnniversaryPlanner;

impl AnniversaryPlanner {
    /// Plan every anniversary-kind candidate for `contact` as of `today`.
    ///
    /// Excluded candidates are retained as `Skipped` rows (for audit), not
    /// dropped — except a too-new effective-date contact, which produces no
    /// EffectiveDate candidate at all.
    pub fn plan(
        contact: &Contact,
        today: Date,
        org: &OrganizationConfig,
        run_id: &RunId,
    ) -> Result<Vec<EmailSchedule>> {
        let mut out = Vec::new();

        if let Some(birthday) = contact.birthday {
            let anchor = Date::next_anniversary(today, birthday)?;
            let send_date = anchor.add_days(-org.birthday_days_before)?;
            out.push(Self::build(
                contact,
                EmailKind::Anniversary(AnniversaryKind::Birthday),
                send_date,
                org,
                run_id,
            )?);
        }

        if let Some(effective_date) = contact.effective_date {
            if months_since(effective_date, today) >= org.effective_date_first_email_months {
                let anchor = Date::next_anniversary(today, effective_date)?;
                let send_date = anchor.add_days(-org.effective_date_days_before)?;
                out.push(Self::build(
                    contact,
                    EmailKind::Anniversary(AnniversaryKind::EffectiveDate),
                    send_date,
                    org,
                    run_id,
                )?);
            }
        }

        if org.enable_post_window_emails {
            if let Some(send_date) = ExclusionEvaluator::post_window_date(contact, today, org)? {
                out.push(Self::build(
                    contact,
                    EmailKind::Anniversary(AnniversaryKind::PostWindow),
                    send_date,
                    org,
                    run_id,
                )?);
            }
        }

        let aep_date = Date::from_ymd(today.year(), AEP_MONTH, AEP_DAY)?;
        out.push(Self::build(
            contact,
            EmailKind::Anniversary(AnniversaryKind::Aep),
            aep_date,
            org,
            run_id,
        )?);

        Ok(out)
    }

    fn build(
        contact: &Contact,
        kind: EmailKind,
        send_date: Date,
        org: &OrganizationConfig,
        run_id: &RunId,
    ) -> Result<EmailSchedule> {
        let priority = kind.default_priority();
        let status = if ExclusionEvaluator::should_skip(contact, &kind, send_date, org)? {
            match ExclusionEvaluator::evaluate(contact, send_date, org)? {
                sched_rules::Outcome::Excluded { reason, .. } => ScheduleStatus::Skipped { reason },
                sched_rules::Outcome::NotExcluded => unreachable!("should_skip implies Excluded"),
            }
        } else {
            ScheduleStatus::PreScheduled
        };
        Ok(EmailSchedule {
            contact_id: contact.id,
            email_kind: kind,
            scheduled_date: send_date,
            scheduled_time: org.send_time()?,
            status,
            priority,
            template_id: None,
            campaign_instance_id: None,
            scheduler_run_id: run_id.clone(),
        })
    }
}

/// Whole months elapsed from `event` to `today`, floored (a partial month
/// doesn't count, so a customer exactly N months and a few days in counts
/// as N, not N+1).
fn months_since(event: Date, today: Date) -> i32 {
    let (ey, em, ed) = event.ymd();
    let (ty, tm, td) = today.ymd();
    let mut months = (ty as i32 - ey as i32) * 12 + (tm as i32 - em as i32);
    if td < ed {
        months -= 1;
    }
    months.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sched_domain::State;

    fn d(y: u16, m: u8, dd: u8) -> Date {
        Date::from_ymd(y, m, dd).unwrap()
    }

    fn contact(birthday: Option<Date>, effective_date: Option<Date>) -> Contact {
        Contact {
            id: 1,
            email: Some("a@example.com".into()),
            zip_code: None,
            state: State::Ca,
            birthday,
            effective_date,
            carrier: None,
            failed_underwriting: false,
        }
    }

    // S1: CA birthday in-window skip.
    #[test]
    fn ca_birthday_in_window_is_skipped() {
        let c = contact(Some(d(1990, 7, 1)), None);
        let org = OrganizationConfig::default();
        let run_id = RunId::from_raw("run-1");
        let schedules = AnniversaryPlanner::plan(&c, d(2024, 7, 10), &org, &run_id).unwrap();
        let birthday = schedules
            .iter()
            .find(|s| s.email_kind == EmailKind::Anniversary(AnniversaryKind::Birthday))
            .unwrap();
        assert_eq!(birthday.scheduled_date, d(2025, 6, 17));
        match &birthday.status {
            ScheduleStatus::Skipped { reason } => assert!(reason.contains("Birthday exclusion window for CA")),
            other => panic!("expected Skipped, got {other:?}"),
        }
    }

    // S2: a send date 14 days before the birthday still falls inside CA's
    // exclusion window (property 9), so it is Skipped, not PreScheduled.
    #[test]
    fn ca_birthday_still_in_window_is_skipped() {
        let c = contact(Some(d(1990, 7, 1)), None);
        let org = OrganizationConfig::default();
        let run_id = RunId::from_raw("run-1");
        let schedules = AnniversaryPlanner::plan(&c, d(2024, 4, 1), &org, &run_id).unwrap();
        let birthday = schedules
            .iter()
            .find(|s| s.email_kind == EmailKind::Anniversary(AnniversaryKind::Birthday))
            .unwrap();
        assert_eq!(birthday.scheduled_date, d(2024, 6, 17));
        match &birthday.status {
            ScheduleStatus::Skipped { reason } => assert!(reason.contains("Birthday exclusion window for CA")),
            other => panic!("expected Skipped, got {other:?}"),
        }
        assert_eq!(birthday.scheduled_time.to_string(), "08:30:00");
    }

    // S4: leap-year anniversary.
    #[test]
    fn leap_day_birthday_resolves_to_feb_28() {
        let c = contact(Some(d(1992, 2, 29)), None);
        let org = OrganizationConfig::default();
        let run_id = RunId::from_raw("run-1");
        let schedules = AnniversaryPlanner::plan(&c, d(2023, 1, 1), &org, &run_id).unwrap();
        let birthday = schedules
            .iter()
            .find(|s| s.email_kind == EmailKind::Anniversary(AnniversaryKind::Birthday))
            .unwrap();
        assert_eq!(birthday.scheduled_date, d(2023, 2, 14));
    }

    #[test]
    fn too_new_effective_date_produces_no_candidate() {
        let mut org = OrganizationConfig::default();
        org.effective_date_first_email_months = 3;
        let c = contact(None, Some(d(2024, 5, 1)));
        let run_id = RunId::from_raw("run-1");
        let schedules = AnniversaryPlanner::plan(&c, d(2024, 6, 1), &org, &run_id).unwrap();
        assert!(schedules
            .iter()
            .all(|s| s.email_kind != EmailKind::Anniversary(AnniversaryKind::EffectiveDate)));
    }

    #[test]
    fn aep_candidate_uses_current_year_september_15() {
        let c = contact(None, None);
        let org = OrganizationConfig::default();
        let run_id = RunId::from_raw("run-1");
        let schedules = AnniversaryPlanner::plan(&c, d(2024, 1, 1), &org, &run_id).unwrap();
        let aep = schedules
            .iter()
            .find(|s| s.email_kind == EmailKind::Anniversary(AnniversaryKind::Aep))
            .unwrap();
        assert_eq!(aep.scheduled_date, d(2024, 9, 15));
    }

    #[test]
    fn months_since_floors_partial_months() {
        assert_eq!(months_since(d(2024, 1, 15), d(2024, 4, 10)), 2);
        assert_eq!(months_since(d(2024, 1, 15), d(2024, 4, 20)), 3);
    }
}

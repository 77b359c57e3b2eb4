//! `ExclusionEvaluator` (§4.3).

use crate::rule::{state_rule, ExclusionRule};
use sched_core::errors::Result;
use sched_domain::{AnniversaryKind, Contact, EmailKind, OrganizationConfig};
use sched_time::Date;

/// The result of evaluating one candidate send against a contact's
/// exclusion windows.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No exclusion window covers `send_date`.
    NotExcluded,
    /// An exclusion window covers `send_date`.
    Excluded {
        /// Human-readable reason, e.g. `"Birthday exclusion window for CA"`.
        reason: String,
        /// The date the covering window closes, if the rule tracks one
        /// (year-round exclusions have none).
        window_end_date: Option<Date>,
    },
}

/// Evaluates exclusion windows against candidate sends (§4.3).
#[derive(Debug, Clone, Copy)]
pub struct ExclusionEvaluator;

impl ExclusionEvaluator {
    /// Evaluate whether `send_date` falls inside an exclusion window for
    /// `contact`, in spec priority order: year-round, then birthday window,
    /// then effective-date window, then not-excluded.
    pub fn evaluate(
        contact: &Contact,
        send_date: Date,
        org: &OrganizationConfig,
    ) -> Result<Outcome> {
        let rule = state_rule(&contact.state);

        if rule == ExclusionRule::YearRoundExclusion {
            return Ok(Outcome::Excluded {
                reason: format!("Year-round exclusion for {}", contact.state.code()),
                window_end_date: None,
            });
        }

        if let (Some(birthday), ExclusionRule::BirthdayWindow { before_days, after_days, use_month_start }) =
            (contact.birthday, rule)
        {
            if let Some(outcome) = Self::check_window(
                send_date,
                birthday,
                before_days,
                after_days,
                use_month_start,
                org.pre_exclusion_buffer_days,
                &format!("Birthday exclusion window for {}", contact.state.code()),
            )? {
                return Ok(outcome);
            }
        }

        if let (Some(effective_date), ExclusionRule::EffectiveDateWindow { before_days, after_days }) =
            (contact.effective_date, rule)
        {
            if let Some(outcome) = Self::check_window(
                send_date,
                effective_date,
                before_days,
                after_days,
                false,
                org.pre_exclusion_buffer_days,
                &format!("Effective date exclusion window for {}", contact.state.code()),
            )? {
                return Ok(outcome);
            }
        }

        Ok(Outcome::NotExcluded)
    }

    /// Check `send_date` against the anchor's window for the anchor's
    /// previous, current, and next year (covers year-boundary crossings),
    /// returning the first (any) match.
    fn check_window(
        send_date: Date,
        event: Date,
        before_days: i32,
        after_days: i32,
        use_month_start: bool,
        buffer_days: i32,
        reason: &str,
    ) -> Result<Option<Outcome>> {
        for year_offset in [-1i32, 0, 1] {
            let candidate_year = (send_date.year() as i32 + year_offset) as u16;
            if !(1900..=2199).contains(&(candidate_year as i32)) {
                continue;
            }
            let (_, m, d) = event.ymd();
            let day = if m == 2 && d == 29 && !sched_time::is_leap_year(candidate_year) {
                28
            } else {
                d
            };
            let anchor = if use_month_start {
                Date::from_ymd(candidate_year, m, 1)?
            } else {
                Date::from_ymd(candidate_year, m, day)?
            };

            let window_start = anchor.add_days(-(before_days + buffer_days));
            let window_end = anchor.add_days(after_days);
            let (window_start, window_end) = match (window_start, window_end) {
                (Ok(s), Ok(e)) => (s, e),
                _ => continue, // window falls outside the supported date range
            };

            if send_date >= window_start && send_date <= window_end {
                return Ok(Some(Outcome::Excluded {
                    reason: reason.to_string(),
                    window_end_date: Some(window_end),
                }));
            }
        }
        Ok(None)
    }

    /// Whether `kind` should be skipped for `contact` on `send_date`
    /// (§4.3 skipping policy).
    ///
    /// * A campaign with `respect_exclusions = false` is never skipped.
    /// * `Anniversary(PostWindow)` is never skipped — it exists to recover
    ///   from an exclusion, so excluding it would be self-defeating.
    /// * Otherwise, skip iff [`Self::evaluate`] returns `Excluded`.
    pub fn should_skip(
        contact: &Contact,
        kind: &EmailKind,
        send_date: Date,
        org: &OrganizationConfig,
    ) -> Result<bool> {
        if let EmailKind::Campaign { respect_exclusions, .. } = kind {
            if !respect_exclusions {
                return Ok(false);
            }
        }
        if matches!(kind, EmailKind::Anniversary(AnniversaryKind::PostWindow)) {
            return Ok(false);
        }
        Ok(matches!(
            Self::evaluate(contact, send_date, org)?,
            Outcome::Excluded { .. }
        ))
    }

    /// The earliest date a `PostWindow` email may be scheduled: one day
    /// after the latest currently-active birthday/effective-date exclusion
    /// window closes, or `None` if no such window currently applies
    /// (§4.3).
    pub fn post_window_date(
        contact: &Contact,
        today: Date,
        org: &OrganizationConfig,
    ) -> Result<Option<Date>> {
        let mut latest_end: Option<Date> = None;
        let rule = state_rule(&contact.state);

        if let (Some(birthday), ExclusionRule::BirthdayWindow { before_days, after_days, use_month_start }) =
            (contact.birthday, rule)
        {
            if let Some(Outcome::Excluded { window_end_date: Some(end), .. }) = Self::check_window(
                today,
                birthday,
                before_days,
                after_days,
                use_month_start,
                org.pre_exclusion_buffer_days,
                "",
            )? {
                latest_end = Some(latest_end.map_or(end, |e: Date| e.max(end)));
            }
        }

        if let (Some(effective_date), ExclusionRule::EffectiveDateWindow { before_days, after_days }) =
            (contact.effective_date, rule)
        {
            if let Some(Outcome::Excluded { window_end_date: Some(end), .. }) = Self::check_window(
                today,
                effective_date,
                before_days,
                after_days,
                false,
                org.pre_exclusion_buffer_days,
                "",
            )? {
                latest_end = Some(latest_end.map_or(end, |e: Date| e.max(end)));
            }
        }

        match latest_end {
            Some(end) => Ok(Some(end.add_days(1)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sched_domain::State;

    fn d(y: u16, m: u8, dd: u8) -> Date {
        Date::from_ymd(y, m, dd).unwrap()
    }

    fn contact(state: State, birthday: Option<Date>, effective_date: Option<Date>) -> Contact {
        Contact {
            id: 1,
            email: Some("a@example.com".into()),
            zip_code: None,
            state,
            birthday,
            effective_date,
            carrier: None,
            failed_underwriting: false,
        }
    }

    // S1: CA birthday in-window skip.
    #[test]
    fn ca_birthday_in_window_is_excluded() {
        let c = contact(State::Ca, Some(d(1990, 7, 1)), None);
        let org = OrganizationConfig::default();
        let outcome = ExclusionEvaluator::evaluate(&c, d(2024, 6, 17), &org).unwrap();
        match outcome {
            Outcome::Excluded { reason, window_end_date } => {
                assert!(reason.contains("Birthday exclusion window for CA"));
                assert_eq!(window_end_date, Some(d(2024, 8, 30)));
            }
            Outcome::NotExcluded => panic!("expected excluded"),
        }
    }

    // S2: CA birthday out-of-window allow.
    #[test]
    fn ca_birthday_out_of_window_is_allowed() {
        let c = contact(State::Ca, Some(d(1990, 7, 1)), None);
        let org = OrganizationConfig::default();
        let outcome = ExclusionEvaluator::evaluate(&c, d(2024, 2, 1), &org).unwrap();
        assert_eq!(outcome, Outcome::NotExcluded);
    }

    // S3: NY year-round.
    #[test]
    fn ny_is_always_year_round_excluded() {
        let c = contact(State::Ny, Some(d(1990, 6, 15)), None);
        let org = OrganizationConfig::default();
        let outcome = ExclusionEvaluator::evaluate(&c, d(2024, 1, 1), &org).unwrap();
        match outcome {
            Outcome::Excluded { reason, .. } => assert_eq!(reason, "Year-round exclusion for NY"),
            Outcome::NotExcluded => panic!("expected excluded"),
        }
    }

    #[test]
    fn ca_off_by_one_boundaries() {
        let c = contact(State::Ca, Some(d(1990, 7, 1)), None);
        let org = OrganizationConfig::default();
        // Window for 2024: anchor 2024-07-01, before=30+60buffer=90, after=60
        // start = 2024-07-01 - 90 = 2024-04-02, end = 2024-08-30
        assert_eq!(
            ExclusionEvaluator::evaluate(&c, d(2024, 4, 1), &org).unwrap(),
            Outcome::NotExcluded
        );
        assert!(matches!(
            ExclusionEvaluator::evaluate(&c, d(2024, 4, 2), &org).unwrap(),
            Outcome::Excluded { .. }
        ));
        assert!(matches!(
            ExclusionEvaluator::evaluate(&c, d(2024, 8, 30), &org).unwrap(),
            Outcome::Excluded { .. }
        ));
        assert_eq!(
            ExclusionEvaluator::evaluate(&c, d(2024, 8, 31), &org).unwrap(),
            Outcome::NotExcluded
        );
    }

    #[test]
    fn post_window_date_is_day_after_latest_window_end() {
        let c = contact(State::Ca, Some(d(1990, 7, 1)), None);
        let org = OrganizationConfig::default();
        let post = ExclusionEvaluator::post_window_date(&c, d(2024, 6, 17), &org).unwrap();
        assert_eq!(post, Some(d(2024, 8, 31)));
    }

    #[test]
    fn post_window_date_is_none_when_no_exclusion_active() {
        let c = contact(State::Ca, Some(d(1990, 7, 1)), None);
        let org = OrganizationConfig::default();
        let post = ExclusionEvaluator::post_window_date(&c, d(2024, 2, 1), &org).unwrap();
        assert_eq!(post, None);
    }

    #[test]
    fn campaign_ignoring_exclusions_is_never_skipped() {
        let c = contact(State::Ny, None, None);
        let org = OrganizationConfig::default();
        let kind = EmailKind::Campaign {
            type_name: "aep".into(),
            instance_id: 1,
            respect_exclusions: false,
            days_before_event: 0,
            priority: 5,
        };
        assert!(!ExclusionEvaluator::should_skip(&c, &kind, d(2024, 1, 1), &org).unwrap());
    }

    #[test]
    fn post_window_anniversary_is_never_skipped() {
        let c = contact(State::Ny, None, None);
        let org = OrganizationConfig::default();
        let kind = EmailKind::Anniversary(AnniversaryKind::PostWindow);
        assert!(!ExclusionEvaluator::should_skip(&c, &kind, d(2024, 1, 1), &org).unwrap());
    }
}

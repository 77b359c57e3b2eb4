//! `CampaignPlanner` (§4.6).

use sched_core::errors::Result;
use sched_core::RunId;
use sched_domain::{
    CampaignInstance, CampaignTypeConfig, Contact, EmailKind, EmailSchedule, OrganizationConfig,
    ScheduleStatus, Targeting,
};
use sched_rules::{hash_mod, ExclusionEvaluator};
use sched_time::Date;

/// Produces campaign-driven candidate schedules (§4.6).
#[derive(Debug, Clone, Copy)]
pub struct CampaignPlanner;

impl CampaignPlanner {
    /// Whether `instance` is eligible to enroll `contact` today: active
    /// window, state/carrier targeting, and underwriting exclusion.
    pub fn matches(
        contact: &Contact,
        instance: &CampaignInstance,
        campaign_type: &CampaignTypeConfig,
        today: Date,
        org: &OrganizationConfig,
    ) -> bool {
        if !instance.is_active_on(today) {
            return false;
        }

        let state_ok = Targeting::is_universal(&instance.target_states)
            || instance
                .target_states
                .as_ref()
                .map(|t| t.matches(contact.state.code()))
                .unwrap_or(true);
        let carrier_ok = Targeting::is_universal(&instance.target_carriers)
            || instance
                .target_carriers
                .as_ref()
                .map(|t| contact.carrier.as_deref().is_some_and(|c| t.matches(c)))
                .unwrap_or(true);
        if !state_ok || !carrier_ok {
            return false;
        }

        let both_universal =
            Targeting::is_universal(&instance.target_states) && Targeting::is_universal(&instance.target_carriers);
        if both_universal && contact.has_no_location() && !org.send_without_zipcode_for_universal {
            return false;
        }

        let underwriting_excluded = campaign_type.skip_failed_underwriting
            || (org.exclude_failed_underwriting_global && campaign_type.name != "aep");
        if underwriting_excluded && contact.failed_underwriting {
            return false;
        }

        true
    }

    /// Compute the candidate send date for `contact` enrolled in `instance`
    /// (§4.6: spread-evenly or fixed-offset-from-activation).
    pub fn send_date(
        contact: &Contact,
        instance: &CampaignInstance,
        campaign_type: &CampaignTypeConfig,
        today: Date,
    ) -> Result<Date> {
        if campaign_type.spread_evenly {
            if let (Some(start), Some(end)) = (instance.spread_start_date, instance.spread_end_date) {
                let span = start.diff_days(end) + 1;
                let key = format!("{}\u{0}{}", contact.id, instance.id);
                let offset = hash_mod(&key, span.max(1) as u64) as i32;
                return start.add_days(offset);
            }
        }
        let base = instance.active_start_date.unwrap_or(today);
        base.add_days(-campaign_type.days_before_event)
    }

    /// Plan the candidate schedule for `contact` in `instance`, or `None` if
    /// `matches` would reject the enrollment.
    pub fn plan_one(
        contact: &Contact,
        instance: &CampaignInstance,
        campaign_type: &CampaignTypeConfig,
        today: Date,
        org: &OrganizationConfig,
        run_id: &RunId,
    ) -> Result<Option<EmailSchedule>> {
        if !Self::matches(contact, instance, campaign_type, today, org) {
            return Ok(None);
        }

        let send_date = Self::send_date(contact, instance, campaign_type, today)?;
        let kind = EmailKind::Campaign {
            type_name: campaign_type.name.clone(),
            instance_id: instance.id,
            respect_exclusions: campaign_type.respect_exclusion_windows,
            days_before_event: campaign_type.days_before_event,
            priority: campaign_type.priority,
        };

        let status = if ExclusionEvaluator::should_skip(contact, &kind, send_date, org)? {
            match ExclusionEvaluator::evaluate(contact, send_date, org)? {
                sched_rules::Outcome::Excluded { reason, .. } => ScheduleStatus::Skipped { reason },
                sched_rules::Outcome::NotExcluded => unreachable!("should_skip implies Excluded"),
            }
        } else {
            ScheduleStatus::PreScheduled
        };

        Ok(Some(EmailSchedule {
            contact_id: contact.id,
            email_kind: kind,
            scheduled_date: send_date,
            scheduled_time: org.send_time()?,
            status,
            priority: campaign_type.priority,
            template_id: instance.template_id.clone(),
            campaign_instance_id: Some(instance.id),
            scheduler_run_id: run_id.clone(),
        }))
    }
}

//! `SchedulerDriver` (§4.10) — the single entrypoint that turns an org
//! config and a set of store capabilities into a `RunReport`.

use uuid::Uuid;

use sched_core::errors::{Error, Result};
use sched_core::RunId;
use sched_balancer::LoadBalancer;
use sched_domain::{EmailSchedule, OrganizationConfig, ScheduleStatus};
use sched_planner::{AnniversaryPlanner, CampaignPlanner, FollowupClassifier, SentEmailRecord};
use sched_store::{Clock, ContactStore, ScheduleStore, SentEmailObservation};

use crate::cancel::CancelToken;
use crate::report::RunReport;

/// The engine's single entrypoint (§6.3): `run(org_config, stores) ->
/// RunReport`. Stateless — a `SchedulerDriver` value carries nothing beyond
/// the capabilities a caller supplies per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulerDriver;

impl SchedulerDriver {
    /// Run one scheduling pass. `clock` supplies "today" and "now";
    /// `contact_store` and `schedule_store` are the host's data access
    /// capabilities; `cancel` is polled at batch boundaries (§5).
    #[tracing::instrument(skip_all)]
    pub fn run(
        org: &OrganizationConfig,
        clock: &dyn Clock,
        contact_store: &dyn ContactStore,
        schedule_store: &mut dyn ScheduleStore,
        cancel: &CancelToken,
    ) -> Result<RunReport> {
        let today = clock.today();
        let run_id = RunId::new(clock.now_unix_millis(), Uuid::new_v4());
        tracing::info!(run_id = %run_id, today = %today, "starting scheduler run");

        let contacts = contact_store.all_contacts()?;
        let total_contacts = contact_store.total_contact_count()?;
        let campaign_instances = contact_store.active_campaign_instances()?;

        let mut candidates: Vec<EmailSchedule> = Vec::new();
        let mut errors: Vec<Error> = Vec::new();
        let mut contacts_processed = 0usize;

        for contact in &contacts {
            if cancel.is_cancelled() {
                return Err(Error::CancelRequested);
            }
            if !contact.is_schedulable() {
                continue;
            }
            contacts_processed += 1;

            match AnniversaryPlanner::plan(contact, today, org, &run_id) {
                Ok(mut schedules) => candidates.append(&mut schedules),
                Err(e) => errors.push(invalid_contact(contact.id, &e)),
            }

            for instance in &campaign_instances {
                let campaign_type = match contact_store.campaign_type_config(&instance.type_name) {
                    Ok(Some(cfg)) => cfg,
                    Ok(None) => {
                        tracing::warn!(type_name = %instance.type_name, "campaign instance references unknown type, skipping");
                        continue;
                    }
                    Err(e) => {
                        errors.push(invalid_contact(contact.id, &e));
                        continue;
                    }
                };
                match CampaignPlanner::plan_one(contact, instance, &campaign_type, today, org, &run_id) {
                    Ok(Some(schedule)) => candidates.push(schedule),
                    Ok(None) => {}
                    Err(e) => errors.push(invalid_contact(contact.id, &e)),
                }
            }
        }

        if cancel.is_cancelled() {
            return Err(Error::CancelRequested);
        }

        let sent = contact_store.sent_emails_for_followup(org.followup_lookback_days)?;
        let contacts_by_id: std::collections::HashMap<i64, &sched_domain::Contact> =
            contacts.iter().map(|c| (c.id, c)).collect();
        for observation in &sent {
            let Some(contact) = contacts_by_id.get(&observation.contact_id) else {
                errors.push(Error::InvalidContactData {
                    contact_id: observation.contact_id,
                    reason: "sent-email observation references unknown contact".to_string(),
                });
                continue;
            };
            let record = to_sent_record(observation);
            match FollowupClassifier::classify(contact, &record, org, &run_id) {
                Ok(schedule) => candidates.push(schedule),
                Err(e) => errors.push(invalid_contact(contact.id, &e)),
            }
        }

        // §9 determinism: sort the merged candidate set before balancing so
        // jitter/overflow distribution never depends on planning order.
        candidates.sort_by(|a, b| {
            (a.contact_id, a.email_kind.stringify(), a.scheduled_date.ymd()).cmp(&(
                b.contact_id,
                b.email_kind.stringify(),
                b.scheduled_date.ymd(),
            ))
        });

        if cancel.is_cancelled() {
            return Err(Error::CancelRequested);
        }

        tracing::debug!(candidates = candidates.len(), "planning complete, balancing");
        let balanced = LoadBalancer::balance(candidates, total_contacts, org)?;
        let skipped = balanced
            .iter()
            .filter(|s| matches!(s.status, ScheduleStatus::Skipped { .. }))
            .count();

        if cancel.is_cancelled() {
            return Err(Error::CancelRequested);
        }

        let existing = schedule_store.existing_schedules()?;
        let diff_result = sched_persistence::diff(&existing, &balanced);
        tracing::debug!(
            inserts = diff_result.inserts.len(),
            updates = diff_result.updates.len(),
            deletes = diff_result.deletes.len(),
            preserved = diff_result.preserved,
            "diff classified, committing"
        );

        sched_persistence::apply(schedule_store, &diff_result)?;

        tracing::info!(run_id = %run_id, contacts_processed, errors = errors.len(), "scheduler run complete");

        Ok(RunReport {
            scheduler_run_id: run_id,
            contacts_processed,
            inserts: diff_result.inserts.len(),
            updates: diff_result.updates.len(),
            preserved: diff_result.preserved,
            deletes: diff_result.deletes.len(),
            skipped,
            errors,
        })
    }
}

fn invalid_contact(contact_id: i64, e: &Error) -> Error {
    Error::InvalidContactData {
        contact_id,
        reason: e.to_string(),
    }
}

fn to_sent_record(observation: &SentEmailObservation) -> SentEmailRecord {
    SentEmailRecord {
        contact_id: observation.contact_id,
        sent_date: observation.sent_date,
        has_clicks: observation.has_clicks,
        has_health_answers: observation.has_health_answers,
        has_affirmative_health_answer: observation.has_affirmative_health_answer,
    }
}

//! `FollowupClassifier` (§4.7).

use sched_core::errors::Result;
use sched_core::RunId;
use sched_domain::{Contact, EmailKind, EmailSchedule, FollowupKind, OrganizationConfig, ScheduleStatus};
use sched_rules::ExclusionEvaluator;
use sched_time::Date;

/// A previously-sent anniversary or campaign email, observed for follow-up
/// classification, plus the interaction signals recorded against it since
/// it was sent.
#[derive(Debug, Clone)]
pub struct SentEmailRecord {
    /// The contact the original email was sent to.
    pub contact_id: i64,
    /// The date the original email was sent.
    pub sent_date: Date,
    /// Whether the contact clicked any tracked link since the send.
    pub has_clicks: bool,
    /// Whether the contact answered health questions since the send.
    pub has_health_answers: bool,
    /// Whether any answered health question was affirmative.
    pub has_affirmative_health_answer: bool,
}

/// Classifies recently-sent emails into follow-up schedules (§4.7).
#[derive(Debug, Clone, Copy)]
pub struct FollowupClassifier;

impl FollowupClassifier {
    /// Classify `sent` for `contact` into the appropriate [`FollowupKind`]
    /// and build its candidate schedule.
    pub fn classify(
        contact: &Contact,
        sent: &SentEmailRecord,
        org: &OrganizationConfig,
        run_id: &RunId,
    ) -> Result<EmailSchedule> {
        let kind = if sent.has_health_answers {
            if sent.has_affirmative_health_answer {
                FollowupKind::HqWithYes
            } else {
                FollowupKind::HqNoYes
            }
        } else if sent.has_clicks {
            FollowupKind::ClickedNoHq
        } else {
            FollowupKind::Cold
        };

        let email_kind = EmailKind::Followup(kind);
        let send_date = sent.sent_date.add_days(org.followup_delay_days)?;

        let status = if ExclusionEvaluator::should_skip(contact, &email_kind, send_date, org)? {
            match ExclusionEvaluator::evaluate(contact, send_date, org)? {
                sched_rules::Outcome::Excluded { reason, .. } => ScheduleStatus::Skipped { reason },
                sched_rules::Outcome::NotExcluded => unreachable!("should_skip implies Excluded"),
            }
        } else {
            ScheduleStatus::PreScheduled
        };

        Ok(EmailSchedule {
            contact_id: contact.id,
            email_kind: email_kind.clone(),
            scheduled_date: send_date,
            scheduled_time: org.send_time()?,
            status,
            priority: email_kind.default_priority(),
            template_id: None,
            campaign_instance_id: None,
            scheduler_run_id: run_id.clone(),
        })
    }
}

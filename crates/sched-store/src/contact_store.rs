//! `ContactStore` contract (§6.1).

use sched_core::errors::Result;
use sched_domain::{CampaignInstance, CampaignTypeConfig, Contact};

/// A contact observed to have been sent an anniversary or campaign email
/// recently, along with the interaction signals recorded against it since
/// (§6.1: `sent_emails_for_followup`, `contact_interactions`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SentEmailObservation {
    /// The contact the original email was sent to.
    pub contact_id: i64,
    /// The date it was sent.
    pub sent_date: sched_time::Date,
    /// Whether the contact clicked any tracked link since the send.
    pub has_clicks: bool,
    /// Whether the contact answered health questions since the send.
    pub has_health_answers: bool,
    /// Whether any answered health question was affirmative.
    pub has_affirmative_health_answer: bool,
}

/// Read-only access to the contact and campaign population for a run
/// (§6.1). Contacts and campaign instances are owned by the external
/// store; the engine never mutates them.
pub trait ContactStore {
    /// Contacts whose birthday or effective-date falls, month/day only,
    /// within `[today - lookback_days, today + lookahead_days]`, honoring
    /// year-boundary wrap. The store may pre-filter by this calendar-
    /// agnostic window; semantic rejection is the engine's job.
    fn contacts_in_window(&self, lookahead_days: i32, lookback_days: i32) -> Result<Vec<Contact>>;

    /// Every contact in the population, unfiltered.
    fn all_contacts(&self) -> Result<Vec<Contact>>;

    /// Total contact count, used to resolve the size-profile daily cap.
    fn total_contact_count(&self) -> Result<usize>;

    /// Campaign instances currently eligible for planning (the store may
    /// pre-filter by `active`, but `is_active_on` is re-checked by the
    /// engine).
    fn active_campaign_instances(&self) -> Result<Vec<CampaignInstance>>;

    /// Static configuration for a campaign type by name, if known.
    fn campaign_type_config(&self, name: &str) -> Result<Option<CampaignTypeConfig>>;

    /// Anniversary/campaign sends within `lookback_days`, with their
    /// interaction signals, for follow-up classification.
    fn sent_emails_for_followup(&self, lookback_days: i32) -> Result<Vec<SentEmailObservation>>;
}

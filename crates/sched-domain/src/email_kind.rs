//! `EmailKind` (§3) — the closed tagged union of everything the engine can
//! schedule, plus its persisted stringification (§6.2).

use std::fmt;

/// Which anniversary event produced a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnniversaryKind {
    /// Birthday email.
    Birthday,
    /// Policy effective-date email.
    EffectiveDate,
    /// Make-up email scheduled after an exclusion window closes.
    PostWindow,
    /// Annual Enrollment Period email.
    Aep,
}

/// Which signal classified a follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FollowupKind {
    /// No clicks, no health-question answers.
    Cold,
    /// Clicked a tracked link but did not complete health questions.
    ClickedNoHq,
    /// Health questions answered, none affirmative.
    HqNoYes,
    /// Health questions answered affirmatively.
    HqWithYes,
}

/// The kind of email a schedule represents.
///
/// A closed, exhaustively-matched union — adding a variant forces every
/// planner, the balancer, and the stringifier to acknowledge it (§9).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EmailKind {
    /// Anniversary-driven email.
    Anniversary(AnniversaryKind),
    /// Campaign-driven email.
    Campaign {
        /// Campaign type name (e.g. `"welcome"`).
        type_name: String,
        /// The specific campaign instance.
        instance_id: i64,
        /// Whether this campaign respects exclusion windows.
        respect_exclusions: bool,
        /// Days before the triggering event to send.
        days_before_event: i32,
        /// Scheduling priority; lower sorts first.
        priority: i32,
    },
    /// Follow-up email.
    Followup(FollowupKind),
}

impl EmailKind {
    /// The precedence priority used when no more specific priority applies
    /// (§4.5: Birthday=10, EffectiveDate=20, PostWindow=40, follow-ups=50).
    /// AEP shares the anniversary default; no distinct value is warranted.
    pub fn default_priority(&self) -> i32 {
        match self {
            EmailKind::Anniversary(AnniversaryKind::Birthday) => 10,
            EmailKind::Anniversary(AnniversaryKind::EffectiveDate) => 20,
            EmailKind::Anniversary(AnniversaryKind::PostWindow) => 40,
            EmailKind::Anniversary(AnniversaryKind::Aep) => 40,
            EmailKind::Campaign { priority, .. } => *priority,
            EmailKind::Followup(_) => 50,
        }
    }

    /// The fixed `email_type` stringification persisted in `email_schedules`
    /// (§6.2): `birthday`, `effective_date`, `post_window`, `aep`,
    /// `campaign_{type}_{instance_id}`, `followup_{variant}`.
    pub fn stringify(&self) -> String {
        match self {
            EmailKind::Anniversary(AnniversaryKind::Birthday) => "birthday".to_string(),
            EmailKind::Anniversary(AnniversaryKind::EffectiveDate) => "effective_date".to_string(),
            EmailKind::Anniversary(AnniversaryKind::PostWindow) => "post_window".to_string(),
            EmailKind::Anniversary(AnniversaryKind::Aep) => "aep".to_string(),
            EmailKind::Campaign {
                type_name,
                instance_id,
                ..
            } => format!("campaign_{type_name}_{instance_id}"),
            EmailKind::Followup(variant) => format!(
                "followup_{}",
                match variant {
                    FollowupKind::Cold => "cold",
                    FollowupKind::ClickedNoHq => "clicked_no_hq",
                    FollowupKind::HqNoYes => "hq_no_yes",
                    FollowupKind::HqWithYes => "hq_with_yes",
                }
            ),
        }
    }
}

impl fmt::Display for EmailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stringifies_anniversary_kinds() {
        assert_eq!(EmailKind::Anniversary(AnniversaryKind::Birthday).stringify(), "birthday");
        assert_eq!(EmailKind::Anniversary(AnniversaryKind::Aep).stringify(), "aep");
    }

    #[test]
    fn stringifies_campaign_with_instance() {
        let k = EmailKind::Campaign {
            type_name: "welcome".into(),
            instance_id: 42,
            respect_exclusions: true,
            days_before_event: 0,
            priority: 30,
        };
        assert_eq!(k.stringify(), "campaign_welcome_42");
    }

    #[test]
    fn stringifies_followup_variants() {
        assert_eq!(EmailKind::Followup(FollowupKind::HqWithYes).stringify(), "followup_hq_with_yes");
    }

    #[test]
    fn default_priority_matches_precedence_table() {
        assert_eq!(EmailKind::Anniversary(AnniversaryKind::Birthday).default_priority(), 10);
        assert_eq!(EmailKind::Anniversary(AnniversaryKind::EffectiveDate).default_priority(), 20);
        assert_eq!(EmailKind::Anniversary(AnniversaryKind::PostWindow).default_priority(), 40);
        assert_eq!(EmailKind::Followup(FollowupKind::Cold).default_priority(), 50);
    }
}

//! `CampaignTypeConfig` and `CampaignInstance` (§3).

use sched_time::Date;

/// Static configuration shared by every instance of a campaign type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CampaignTypeConfig {
    /// The campaign type's name (e.g. `"welcome"`, `"aep"`).
    pub name: String,
    /// Whether instances of this type respect exclusion windows.
    pub respect_exclusion_windows: bool,
    /// Whether sends from this type trigger follow-up classification.
    pub enable_followups: bool,
    /// Days before the triggering event to send.
    pub days_before_event: i32,
    /// Whether this type targets the whole population by default.
    pub target_all_contacts: bool,
    /// Scheduling priority; lower sorts/wins first.
    pub priority: i32,
    /// Whether this type is currently active.
    pub active: bool,
    /// Whether instances spread enrollees evenly over a date range.
    pub spread_evenly: bool,
    /// Whether contacts who failed underwriting are excluded.
    pub skip_failed_underwriting: bool,
}

/// A single run of a campaign type against a population.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CampaignInstance {
    /// Stable primary key.
    pub id: i64,
    /// The campaign type this instance belongs to.
    pub type_name: String,
    /// A human-readable instance name.
    pub instance_name: String,
    /// Optional template override.
    pub template_id: Option<String>,
    /// Window during which the instance is active (§4.6).
    pub active_start_date: Option<Date>,
    /// Window during which the instance is active (§4.6).
    pub active_end_date: Option<Date>,
    /// Range over which `spread_evenly` distributes enrollees.
    pub spread_start_date: Option<Date>,
    /// Range over which `spread_evenly` distributes enrollees.
    pub spread_end_date: Option<Date>,
    /// `None`/absent means "not targeted by state"; `Some(Targeting::All)`
    /// means "every state"; `Some(Targeting::Only(list))` restricts to a
    /// comma-separated set of codes (§4.6).
    pub target_states: Option<Targeting>,
    /// Same semantics as `target_states`, but for carrier codes.
    pub target_carriers: Option<Targeting>,
    /// Opaque metadata carried through from the store, unused by planning.
    pub metadata: Option<String>,
}

/// A campaign instance's targeting list for one dimension (state or
/// carrier), parsed from the store's `"ALL"` / comma-separated-codes
/// representation (§4.6).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Targeting {
    /// Matches every value (the store's `"ALL"` sentinel).
    All,
    /// Matches only the listed codes.
    Only(Vec<String>),
}

impl Targeting {
    /// Parse the store's textual representation: `None`/absent and the
    /// literal string `"ALL"` both mean "everything"; anything else is
    /// split on commas and trimmed.
    pub fn parse(raw: Option<&str>) -> Option<Targeting> {
        match raw {
            None => None,
            Some(s) if s.trim().eq_ignore_ascii_case("all") => Some(Targeting::All),
            Some(s) if s.trim().is_empty() => None,
            Some(s) => Some(Targeting::Only(
                s.split(',').map(|code| code.trim().to_string()).collect(),
            )),
        }
    }

    /// Whether `code` matches this targeting list.
    pub fn matches(&self, code: &str) -> bool {
        match self {
            Targeting::All => true,
            Targeting::Only(codes) => codes.iter().any(|c| c.eq_ignore_ascii_case(code)),
        }
    }

    /// Whether this targeting is "universal" — absent or explicitly `ALL`
    /// (§4.6's "both sides are effectively universal" check operates on
    /// `Option<Targeting>`, treating `None` and `Some(All)` the same way).
    pub fn is_universal(target: &Option<Targeting>) -> bool {
        matches!(target, None | Some(Targeting::All))
    }
}

impl CampaignInstance {
    /// Whether the instance is active on `today` (§4.6): both bounds are
    /// inclusive, and an absent bound means "unbounded" on that side.
    pub fn is_active_on(&self, today: Date) -> bool {
        let after_start = self.active_start_date.map(|s| s <= today).unwrap_or(true);
        let before_end = self.active_end_date.map(|e| e >= today).unwrap_or(true);
        after_start && before_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: u16, m: u8, dd: u8) -> Date {
        Date::from_ymd(y, m, dd).unwrap()
    }

    fn instance() -> CampaignInstance {
        CampaignInstance {
            id: 1,
            type_name: "welcome".into(),
            instance_name: "2024 welcome".into(),
            template_id: None,
            active_start_date: None,
            active_end_date: None,
            spread_start_date: None,
            spread_end_date: None,
            target_states: None,
            target_carriers: None,
            metadata: None,
        }
    }

    #[test]
    fn unbounded_instance_is_always_active() {
        assert!(instance().is_active_on(d(2024, 1, 1)));
    }

    #[test]
    fn bounded_instance_respects_window() {
        let mut inst = instance();
        inst.active_start_date = Some(d(2024, 6, 1));
        inst.active_end_date = Some(d(2024, 6, 30));
        assert!(!inst.is_active_on(d(2024, 5, 31)));
        assert!(inst.is_active_on(d(2024, 6, 1)));
        assert!(inst.is_active_on(d(2024, 6, 30)));
        assert!(!inst.is_active_on(d(2024, 7, 1)));
    }

    #[test]
    fn targeting_parse_all_and_list() {
        assert_eq!(Targeting::parse(Some("ALL")), Some(Targeting::All));
        assert_eq!(Targeting::parse(None), None);
        assert_eq!(
            Targeting::parse(Some("CA, NY")),
            Some(Targeting::Only(vec!["CA".into(), "NY".into()]))
        );
    }

    #[test]
    fn targeting_matches() {
        let t = Targeting::parse(Some("CA,NY")).unwrap();
        assert!(t.matches("CA"));
        assert!(t.matches("NY"));
        assert!(!t.matches("TX"));
    }

    #[test]
    fn universal_check_treats_none_and_all_the_same() {
        assert!(Targeting::is_universal(&None));
        assert!(Targeting::is_universal(&Some(Targeting::All)));
        assert!(!Targeting::is_universal(&Some(Targeting::Only(vec!["CA".into()]))));
    }
}

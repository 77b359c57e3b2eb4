//! `Contact` (§3).

use crate::state::State;
use sched_time::Date;

/// A single contact in the insurance platform's population.
///
/// `state` is expected to already be resolved from `zip_code` by the host
/// (§1: "ZIP→state lookup ... a pure function supplied by the host") — this
/// type does not re-derive it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contact {
    /// Stable primary key.
    pub id: i64,
    /// Contact email address; empty/absent means the contact is not
    /// schedulable (see [`Contact::is_schedulable`]).
    pub email: Option<String>,
    /// 5–9 digit ZIP code, if known.
    pub zip_code: Option<String>,
    /// Home state.
    pub state: State,
    /// Date of birth, if known.
    pub birthday: Option<Date>,
    /// Policy effective date, if known.
    pub effective_date: Option<Date>,
    /// Opaque carrier code.
    pub carrier: Option<String>,
    /// Whether the contact failed underwriting.
    pub failed_underwriting: bool,
}

impl Contact {
    /// A contact is schedulable iff it carries a non-empty email address.
    pub fn is_schedulable(&self) -> bool {
        matches!(&self.email, Some(e) if !e.trim().is_empty())
    }

    /// Whether the contact supplied neither a zip code nor a resolvable
    /// state (used by campaign targeting's universal-send gate, §4.6).
    pub fn has_no_location(&self) -> bool {
        self.zip_code.is_none() && matches!(&self.state, State::Other(code) if code.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Contact {
        Contact {
            id: 1,
            email: Some("a@example.com".into()),
            zip_code: None,
            state: State::Ca,
            birthday: None,
            effective_date: None,
            carrier: None,
            failed_underwriting: false,
        }
    }

    #[test]
    fn empty_email_is_not_schedulable() {
        let mut c = base();
        c.email = Some("   ".into());
        assert!(!c.is_schedulable());
        c.email = None;
        assert!(!c.is_schedulable());
    }

    #[test]
    fn non_empty_email_is_schedulable() {
        assert!(base().is_schedulable());
    }
}

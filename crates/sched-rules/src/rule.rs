//! `StateRules` — per-state exclusion-window descriptors (§4.2).

use sched_domain::State;

/// A state's exclusion policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExclusionRule {
    /// Excludes mail around a birthday.
    BirthdayWindow {
        /// Days before the anchor the window opens.
        before_days: i32,
        /// Days after the anchor the window closes.
        after_days: i32,
        /// If true, the anchor is the first of the birthday's month rather
        /// than the birthday itself.
        use_month_start: bool,
    },
    /// Excludes mail around a policy effective-date anniversary.
    EffectiveDateWindow {
        /// Days before the anchor the window opens.
        before_days: i32,
        /// Days after the anchor the window closes.
        after_days: i32,
    },
    /// Excludes mail year-round, regardless of anchor.
    YearRoundExclusion,
    /// No exclusion window applies.
    NoExclusion,
}

/// Look up the exclusion rule for a state (§4.2 required rule table).
///
/// Exact values are load-bearing for compatibility with the downstream
/// dispatcher and must not be tuned without a corresponding spec change.
pub fn state_rule(state: &State) -> ExclusionRule {
    match state.code() {
        "CA" => ExclusionRule::BirthdayWindow {
            before_days: 30,
            after_days: 60,
            use_month_start: false,
        },
        "ID" => ExclusionRule::BirthdayWindow {
            before_days: 0,
            after_days: 63,
            use_month_start: false,
        },
        "KY" => ExclusionRule::BirthdayWindow {
            before_days: 0,
            after_days: 60,
            use_month_start: false,
        },
        "MD" => ExclusionRule::BirthdayWindow {
            before_days: 0,
            after_days: 30,
            use_month_start: false,
        },
        "NV" => ExclusionRule::BirthdayWindow {
            before_days: 0,
            after_days: 60,
            use_month_start: true,
        },
        "OK" => ExclusionRule::BirthdayWindow {
            before_days: 0,
            after_days: 60,
            use_month_start: false,
        },
        "OR" => ExclusionRule::BirthdayWindow {
            before_days: 0,
            after_days: 31,
            use_month_start: false,
        },
        "VA" => ExclusionRule::BirthdayWindow {
            before_days: 0,
            after_days: 30,
            use_month_start: false,
        },
        "MO" => ExclusionRule::EffectiveDateWindow {
            before_days: 30,
            after_days: 33,
        },
        "CT" | "MA" | "NY" | "WA" => ExclusionRule::YearRoundExclusion,
        _ => ExclusionRule::NoExclusion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ca_rule_matches_table() {
        assert_eq!(
            state_rule(&State::Ca),
            ExclusionRule::BirthdayWindow {
                before_days: 30,
                after_days: 60,
                use_month_start: false
            }
        );
    }

    #[test]
    fn nv_uses_month_start() {
        assert_eq!(
            state_rule(&State::Nv),
            ExclusionRule::BirthdayWindow {
                before_days: 0,
                after_days: 60,
                use_month_start: true
            }
        );
    }

    #[test]
    fn mo_is_effective_date_window() {
        assert_eq!(
            state_rule(&State::Mo),
            ExclusionRule::EffectiveDateWindow {
                before_days: 30,
                after_days: 33
            }
        );
    }

    #[test]
    fn year_round_states() {
        for s in [State::Ct, State::Ma, State::Ny, State::Wa] {
            assert_eq!(state_rule(&s), ExclusionRule::YearRoundExclusion);
        }
    }

    #[test]
    fn unlisted_state_has_no_exclusion() {
        assert_eq!(state_rule(&State::Other("TX".into())), ExclusionRule::NoExclusion);
    }
}

//! `State` — a contact's home jurisdiction (§3).
//!
//! The closed set of states with dedicated exclusion-window rules, plus an
//! `Other` catch-all for every jurisdiction with no special handling.
//! ZIP→state resolution is a pure function supplied by the host (§1,
//! out of scope); this type only models the result.

use std::fmt;
use std::str::FromStr;

/// A contact's home state, as understood by [`sched-rules`](../sched_rules/index.html).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum State {
    /// California.
    Ca,
    /// Connecticut.
    Ct,
    /// Idaho.
    Id,
    /// Kentucky.
    Ky,
    /// Massachusetts.
    Ma,
    /// Maryland.
    Md,
    /// Missouri.
    Mo,
    /// Nevada.
    Nv,
    /// New York.
    Ny,
    /// Oklahoma.
    Ok,
    /// Oregon.
    Or,
    /// Virginia.
    Va,
    /// Washington.
    Wa,
    /// Any state with no dedicated exclusion-window rule.
    Other(String),
}

impl State {
    /// The two-letter USPS code for this state.
    pub fn code(&self) -> &str {
        match self {
            State::Ca => "CA",
            State::Ct => "CT",
            State::Id => "ID",
            State::Ky => "KY",
            State::Ma => "MA",
            State::Md => "MD",
            State::Mo => "MO",
            State::Nv => "NV",
            State::Ny => "NY",
            State::Ok => "OK",
            State::Or => "OR",
            State::Va => "VA",
            State::Wa => "WA",
            State::Other(code) => code,
        }
    }

    /// Build a `State` from a two-letter USPS code, folding anything outside
    /// the closed set into `Other`.
    pub fn from_code(code: &str) -> Self {
        match code.to_ascii_uppercase().as_str() {
            "CA" => State::Ca,
            "CT" => State::Ct,
            "ID" => State::Id,
            "KY" => State::Ky,
            "MA" => State::Ma,
            "MD" => State::Md,
            "MO" => State::Mo,
            "NV" => State::Nv,
            "NY" => State::Ny,
            "OK" => State::Ok,
            "OR" => State::Or,
            "VA" => State::Va,
            "WA" => State::Wa,
            other => State::Other(other.to_string()),
        }
    }
}

impl FromStr for State {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(State::from_code(s))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_set_round_trips() {
        for code in ["CA", "CT", "ID", "KY", "MA", "MD", "MO", "NV", "NY", "OK", "OR", "VA", "WA"] {
            assert_eq!(State::from_code(code).code(), code);
        }
    }

    #[test]
    fn unknown_code_is_other() {
        let s = State::from_code("TX");
        assert_eq!(s, State::Other("TX".into()));
        assert_eq!(s.code(), "TX");
    }

    #[test]
    fn lowercase_input_normalizes() {
        assert_eq!(State::from_code("ca"), State::Ca);
    }
}

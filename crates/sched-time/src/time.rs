//! `Time` — a validated time-of-day triple (§4.1).
//!
//! The engine performs no DST math; a `Time` is simply a validated
//! `(hour, minute, second)` in whatever timezone the host's `Clock`
//! capability reports.

use sched_core::errors::{Error, Result};

/// A time of day, validated against 24-hour wall-clock bounds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(u8, u8, u8)", into = "(u8, u8, u8)"))]
pub struct Time {
    hour: u8,
    minute: u8,
    second: u8,
}

impl Time {
    /// Construct a time, validating `hour < 24`, `minute < 60`, `second < 60`.
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self> {
        if hour > 23 {
            return Err(Error::InvalidDate(format!("hour {hour} out of range [0, 23]")));
        }
        if minute > 59 {
            return Err(Error::InvalidDate(format!(
                "minute {minute} out of range [0, 59]"
            )));
        }
        if second > 59 {
            return Err(Error::InvalidDate(format!(
                "second {second} out of range [0, 59]"
            )));
        }
        Ok(Self { hour, minute, second })
    }

    /// The hour component (0–23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// The minute component (0–59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// The second component (0–59).
    pub fn second(&self) -> u8 {
        self.second
    }
}

impl std::convert::TryFrom<(u8, u8, u8)> for Time {
    type Error = Error;
    fn try_from(hms: (u8, u8, u8)) -> Result<Self> {
        Time::new(hms.0, hms.1, hms.2)
    }
}

impl From<Time> for (u8, u8, u8) {
    fn from(t: Time) -> Self {
        (t.hour, t.minute, t.second)
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl std::fmt::Debug for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Time({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_time() {
        let t = Time::new(8, 30, 0).unwrap();
        assert_eq!(t.to_string(), "08:30:00");
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Time::new(24, 0, 0).is_err());
        assert!(Time::new(0, 60, 0).is_err());
        assert!(Time::new(0, 0, 60).is_err());
    }
}

//! `Clock` capability (§6.4).

use sched_time::Date;

/// Supplies "now" to the engine in the configured timezone.
///
/// No component outside a `Clock` implementation may read the process wall
/// clock directly (§6.4) — tests inject a fixed clock so runs are
/// reproducible.
pub trait Clock {
    /// Today's date in the configured timezone.
    fn today(&self) -> Date;

    /// The current instant, as milliseconds since the Unix epoch — used to
    /// mint a fresh [`sched_core::RunId`] per run.
    fn now_unix_millis(&self) -> i64;
}

/// A `Clock` that always reports the same fixed instant. Used by tests and
/// by any caller that wants a reproducible run (§6.4: "must accept a
/// deterministic test clock").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: Date,
    now_unix_millis: i64,
}

impl FixedClock {
    /// Build a clock that always reports `today` and `now_unix_millis`.
    pub fn new(today: Date, now_unix_millis: i64) -> Self {
        Self { today, now_unix_millis }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.today
    }

    fn now_unix_millis(&self) -> i64 {
        self.now_unix_millis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_constructed_values() {
        let today = Date::from_ymd(2024, 6, 17).unwrap();
        let clock = FixedClock::new(today, 1_718_000_000_000);
        assert_eq!(clock.today(), today);
        assert_eq!(clock.now_unix_millis(), 1_718_000_000_000);
    }
}

//! `Date` — a validated proleptic-Gregorian calendar date (§4.1).
//!
//! Internally represented as a serial day count so that arithmetic and
//! comparisons stay simple integer operations; it backs anniversary and
//! exclusion-window arithmetic throughout the engine.
//!
//! # Serial number convention
//! * Serial 1 = January 1, 1900.
//! * The valid date range is 1900-01-01 to 2199-12-31 — wide enough to
//!   cover any living contact's birthday and any policy's effective date.

use sched_core::errors::{Error, Result};

/// A calendar date represented as a serial number of days since 1900-01-01.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(u16, u8, u8)", into = "(u16, u8, u8)"))]
pub struct Date(i32);

impl Date {
    /// Minimum valid date: January 1, 1900.
    pub const MIN: Date = Date(1);

    /// Maximum valid date: December 31, 2199.
    pub const MAX: Date = Date(109_573);

    /// Construct a date from year, month (1–12), and day-of-month (1–31).
    ///
    /// # Errors
    /// Returns [`Error::InvalidDate`] if any component is out of range for
    /// the proleptic Gregorian calendar (e.g. February 30th, month 13).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(1900..=2199).contains(&year) {
            return Err(Error::InvalidDate(format!(
                "year {year} out of range [1900, 2199]"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidDate(format!(
                "month {month} out of range [1, 12]"
            )));
        }
        let days_in = days_in_month(year, month);
        if day == 0 || day > days_in {
            return Err(Error::InvalidDate(format!(
                "day {day} out of range [1, {days_in}] for {year}-{month:02}"
            )));
        }
        Ok(Date(serial_from_ymd(year, month, day)))
    }

    /// The year (1900–2199).
    pub fn year(&self) -> u16 {
        ymd_from_serial(self.0).0
    }

    /// The month (1–12).
    pub fn month(&self) -> u8 {
        ymd_from_serial(self.0).1
    }

    /// The day of the month (1–31).
    pub fn day(&self) -> u8 {
        ymd_from_serial(self.0).2
    }

    /// The (year, month, day) triple.
    pub fn ymd(&self) -> (u16, u8, u8) {
        ymd_from_serial(self.0)
    }

    /// Advance by `n` days; `n` may be negative.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDate`] if the result falls outside
    /// [`Date::MIN`, `Date::MAX`].
    pub fn add_days(self, n: i32) -> Result<Self> {
        let serial = self.0 + n;
        if serial < Self::MIN.0 || serial > Self::MAX.0 {
            return Err(Error::InvalidDate(format!(
                "date arithmetic: result serial {serial} out of range"
            )));
        }
        Ok(Date(serial))
    }

    /// Advance by `n` calendar months, clamping the day-of-month to the
    /// destination month's length (e.g. Jan 31 + 1 month = Feb 28/29).
    pub fn add_months(self, n: i32) -> Result<Self> {
        let (y, m, d) = ymd_from_serial(self.0);
        let total_months = m as i32 - 1 + n;
        let new_year = y as i32 + total_months.div_euclid(12);
        let new_month = total_months.rem_euclid(12) as u8 + 1;
        if !(1900..=2199).contains(&new_year) {
            return Err(Error::InvalidDate(format!(
                "date arithmetic: year {new_year} out of range"
            )));
        }
        let new_year = new_year as u16;
        let new_day = d.min(days_in_month(new_year, new_month));
        Ok(Date(serial_from_ymd(new_year, new_month, new_day)))
    }

    /// Exact signed day difference `other - self` (positive if `other` is
    /// later).
    pub fn diff_days(self, other: Date) -> i32 {
        other.0 - self.0
    }

    /// Total order comparison (also available via `Ord`).
    pub fn compare(self, other: Date) -> std::cmp::Ordering {
        self.cmp(&other)
    }

    /// Return the next occurrence (≥ `today`) of `event`'s month/day.
    ///
    /// Searches `today.year()` first, then `today.year() + 1`. If `event`
    /// is February 29th and the candidate year is not a leap year, the
    /// anniversary falls on February 28th of that year instead (§4.1,
    /// Testable property 3).
    pub fn next_anniversary(today: Date, event: Date) -> Result<Date> {
        let (_, m, d) = ymd_from_serial(event.0);
        for y in [today.year(), today.year() + 1] {
            if y > 2199 {
                break;
            }
            let day = if m == 2 && d == 29 && !is_leap_year(y) {
                28
            } else {
                d
            };
            let candidate = Date::from_ymd(y, m, day)?;
            if candidate >= today {
                return Ok(candidate);
            }
        }
        Err(Error::InvalidDate(
            "next_anniversary: no candidate within the supported date range".into(),
        ))
    }
}

/// Whether `year` is a leap year under the Gregorian rule.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!((1..=12).contains(&month));
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => unreachable!(),
    }
}

/// Cumulative day-of-year offset at the start of each month (non-leap).
const MONTH_OFFSET: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

fn serial_from_ymd(year: u16, month: u8, day: u8) -> i32 {
    let y = year as i32;
    let m = month as i32;
    let d = day as i32;

    let mut serial = (y - 1900) * 365;
    serial += (y - 1901) / 4 - (y - 1901) / 100 + (y - 1601) / 400;
    serial += MONTH_OFFSET[m as usize - 1] as i32;
    if m > 2 && is_leap_year(year) {
        serial += 1;
    }
    serial += d;
    serial
}

fn ymd_from_serial(serial: i32) -> (u16, u8, u8) {
    let mut y = (serial / 365 + 1900) as u16;
    loop {
        let start_of_year = serial_from_ymd(y, 1, 1);
        if serial < start_of_year {
            y -= 1;
        } else if serial >= serial_from_ymd(y + 1, 1, 1) {
            y += 1;
        } else {
            break;
        }
    }
    let start_of_year = serial_from_ymd(y, 1, 1);
    let doy = serial - start_of_year + 1;
    let mut m = 1u8;
    let mut remaining = doy;
    loop {
        let days = days_in_month(y, m) as i32;
        if remaining <= days {
            break;
        }
        remaining -= days;
        m += 1;
    }
    (y, m, remaining as u8)
}

impl std::convert::TryFrom<(u16, u8, u8)> for Date {
    type Error = Error;
    fn try_from(ymd: (u16, u8, u8)) -> Result<Self> {
        Date::from_ymd(ymd.0, ymd.1, ymd.2)
    }
}

impl From<Date> for (u16, u8, u8) {
    fn from(d: Date) -> Self {
        d.ymd()
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: u16, m: u8, dd: u8) -> Date {
        Date::from_ymd(y, m, dd).unwrap()
    }

    #[test]
    fn roundtrip() {
        let dates = [
            (1900, 1, 1),
            (1900, 12, 31),
            (2000, 2, 29),
            (2100, 2, 28),
            (2024, 7, 10),
            (2199, 12, 31),
        ];
        for (y, m, day) in dates {
            let date = Date::from_ymd(y, m, day).unwrap();
            assert_eq!(date.ymd(), (y, m, day));
        }
    }

    #[test]
    fn rejects_invalid_components() {
        assert!(Date::from_ymd(2023, 2, 30).is_err());
        assert!(Date::from_ymd(2023, 13, 1).is_err());
        assert!(Date::from_ymd(1899, 1, 1).is_err());
    }

    #[test]
    fn add_days_handles_month_and_year_rollover() {
        assert_eq!(d(2024, 1, 31).add_days(1).unwrap(), d(2024, 2, 1));
        assert_eq!(d(2023, 12, 31).add_days(1).unwrap(), d(2024, 1, 1));
        assert_eq!(d(2024, 3, 1).add_days(-1).unwrap(), d(2024, 2, 29));
    }

    #[test]
    fn additive_arithmetic() {
        let start = d(2024, 6, 1);
        let a = 40;
        let b = -17;
        let via_two_steps = start.add_days(a).unwrap().add_days(b).unwrap();
        let via_sum = start.add_days(a + b).unwrap();
        assert_eq!(via_two_steps, via_sum);
    }

    #[test]
    fn diff_days_is_exact() {
        let a = d(2024, 1, 1);
        let b = d(2024, 3, 1);
        assert_eq!(a.diff_days(b), 60); // 2024 is a leap year
    }

    #[test]
    fn next_anniversary_future_or_today() {
        let today = d(2024, 7, 10);
        let birthday = d(1990, 7, 1);
        let next = Date::next_anniversary(today, birthday).unwrap();
        assert!(next >= today);
        assert_eq!(next, d(2024, 7, 1).add_days(365).unwrap()); // 2025-07-01
    }

    #[test]
    fn next_anniversary_today_is_the_anniversary() {
        let today = d(2024, 7, 1);
        let event = d(1975, 7, 1);
        assert_eq!(Date::next_anniversary(today, event).unwrap(), today);
    }

    #[test]
    fn leap_day_anniversary_in_non_leap_year() {
        let event = d(1992, 2, 29);
        let today = d(2023, 1, 1);
        let next = Date::next_anniversary(today, event).unwrap();
        assert_eq!(next, d(2023, 2, 28));
    }

    #[test]
    fn leap_day_anniversary_in_leap_year() {
        let event = d(1992, 2, 29);
        let today = d(2024, 1, 1);
        let next = Date::next_anniversary(today, event).unwrap();
        assert_eq!(next, d(2024, 2, 29));
    }

    #[test]
    fn add_months_clamps_end_of_month() {
        let jan31 = d(2023, 1, 31);
        assert_eq!(jan31.add_months(1).unwrap(), d(2023, 2, 28));
    }
}

//! # sched-time
//!
//! Validated `Date`/`Time` types and anniversary arithmetic (§4.1), built on
//! a serial-number representation with `add_days`/`add_months` arithmetic
//! for birthday/effective-date anniversary computation.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `Date` type and anniversary/leap-year arithmetic.
pub mod date;

/// `Time` type (hour, minute, second).
pub mod time;

pub use date::{days_in_month, is_leap_year, Date};
pub use time::Time;

//! Error taxonomy for the scheduling engine.
//!
//! A single `thiserror`-derived enum, closed over the categories the engine
//! can actually raise. `ensure!` / `fail!` give call sites the same terse
//! early-return idiom as a C-style assertion macro without panicking.

use thiserror::Error;

/// The top-level error type used throughout the scheduling engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Unparseable or out-of-range calendar value.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// The underlying contact/schedule store could not be reached.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Referential or schema violation surfaced while reading from a store.
    #[error("store integrity violation: {0}")]
    StoreIntegrity(String),

    /// A transactional write failed; the transaction has been rolled back.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// A single contact's data was malformed. The contact is skipped, not
    /// fatal to the run.
    #[error("invalid contact data for contact {contact_id}: {reason}")]
    InvalidContactData {
        /// The offending contact.
        contact_id: i64,
        /// Human-readable reason.
        reason: String,
    },

    /// Missing or contradictory org settings. Fatal at start-of-run.
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    /// Cooperative cancellation was observed at a batch boundary.
    #[error("run cancelled")]
    CancelRequested,
}

/// Shorthand `Result` type used throughout the engine.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::ConfigurationError(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use sched_core::{ensure, errors::Error};
/// fn positive(x: i64) -> sched_core::errors::Result<i64> {
///     ensure!(x > 0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1).is_ok());
/// assert!(positive(-1).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::ConfigurationError(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::InvalidDate(...))` immediately.
///
/// # Example
/// ```
/// use sched_core::{fail, errors::Error};
/// fn always_err() -> sched_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::InvalidDate(format!($($msg)*)))
    };
}

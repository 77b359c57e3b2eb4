//! Opaque scheduler run identifier (§4.10, §6.2: `batch_id`).
//!
//! A fresh `RunId` is minted once per driver invocation. It is carried on
//! every schedule row written by that run and compared against during
//! diffing so a PRESERVE can assert the prior run's id was left untouched.

use std::fmt;
use uuid::Uuid;

/// Opaque identifier for a single scheduler run.
///
/// Stringifies as `{RFC3339 millis}-{uuid}` so that runs sort
/// chronologically by eye without needing to parse the uuid half.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunId(String);

impl RunId {
    /// Mint a fresh run id from a millisecond timestamp and a random uuid.
    ///
    /// The timestamp is supplied by the caller (normally the driver, via its
    /// `Clock`) rather than read from the wall clock here, keeping this
    /// function pure and the driver the sole owner of "now".
    pub fn new(unix_millis: i64, uuid: Uuid) -> Self {
        Self(format!("{unix_millis}-{uuid}"))
    }

    /// Wrap an already-formatted run id string (e.g. one read back from a
    /// store) without validating its shape.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The run id's string representation, as persisted in `batch_id`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RunId> for String {
    fn from(id: RunId) -> Self {
        id.0
    }
}

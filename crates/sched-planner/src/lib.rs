//! # sched-planner
//!
//! Candidate-generating planners: `AnniversaryPlanner` (§4.5),
//! `CampaignPlanner` (§4.6), and `FollowupClassifier` (§4.7). Each planner
//! is a pure function of its inputs — no store access, no clock reads — so
//! planning can run in parallel across contacts per §5's determinism rule.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `AnniversaryPlanner`.
pub mod anniversary;
/// `CampaignPlanner`.
pub mod campaign;
/// `FollowupClassifier` and `SentEmailRecord`.
pub mod followup;

pub use anniversary::AnniversaryPlanner;
pub use campaign::CampaignPlanner;
pub use followup::{FollowupClassifier, SentEmailRecord};

//! # sched-domain
//!
//! The data model (§3): `Contact`, `State`, `EmailKind`, `EmailSchedule`,
//! `CampaignTypeConfig`, `CampaignInstance`, and `OrganizationConfig`.
//! Depends only on `sched-core` (errors, run id) and `sched-time`
//! (dates/times) — no planning, evaluation, or persistence logic lives
//! here, keeping the data model free of behavior.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Campaign type/instance configuration.
pub mod campaign;
/// `Contact`.
pub mod contact;
/// `EmailKind` and its stringification.
pub mod email_kind;
/// Org-level configuration and size profiles.
pub mod org_config;
/// `EmailSchedule` and `ScheduleStatus`.
pub mod schedule;
/// `State`.
pub mod state;

pub use campaign::{CampaignInstance, CampaignTypeConfig, Targeting};
pub use contact::Contact;
pub use email_kind::{AnniversaryKind, EmailKind, FollowupKind};
pub use org_config::{OrganizationConfig, SizeProfile, SizeProfileLimits, SizeProfileOverrides};
pub use schedule::{EmailSchedule, IdentityKey, ScheduleStatus};
pub use state::State;

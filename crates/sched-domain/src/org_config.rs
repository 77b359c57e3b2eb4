//! `OrganizationConfig` and `SizeProfile` (§3, SPEC_FULL §3 supplement).

use sched_time::Time;

/// A named capacity tier (§3, GLOSSARY: "Size profile").
///
/// Maps a contact population to a daily send cap, ED soft limit, batch
/// size, and smoothing window. Exact defaults are a SPEC_FULL Open
/// Question resolution — see DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeProfile {
    /// Up to 5,000 contacts.
    Small,
    /// Up to 50,000 contacts.
    Medium,
    /// Up to 250,000 contacts.
    Large,
    /// More than 250,000 contacts.
    Enterprise,
}

/// The resolved numeric limits a [`SizeProfile`] carries before any
/// per-org override is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeProfileLimits {
    /// Fraction of the population that may be sent to in a single day.
    pub daily_send_percentage_cap: f64,
    /// Absolute cap on effective-date emails sent in a single day.
    pub ed_daily_soft_limit: u32,
    /// Fraction of the daily cap that ED emails alone may consume.
    pub ed_percentage_of_daily_cap: f64,
    /// Width, in days, of the ED smoothing sliding window.
    pub ed_smoothing_window_days: u32,
    /// Preferred batch size for bulk store writes.
    pub batch_size: usize,
}

impl SizeProfile {
    /// The profile's default numeric limits (SPEC_FULL §3 table).
    pub fn default_limits(self) -> SizeProfileLimits {
        match self {
            SizeProfile::Small => SizeProfileLimits {
                daily_send_percentage_cap: 0.20,
                ed_daily_soft_limit: 50,
                ed_percentage_of_daily_cap: 0.30,
                ed_smoothing_window_days: 7,
                batch_size: 500,
            },
            SizeProfile::Medium => SizeProfileLimits {
                daily_send_percentage_cap: 0.15,
                ed_daily_soft_limit: 150,
                ed_percentage_of_daily_cap: 0.30,
                ed_smoothing_window_days: 7,
                batch_size: 1_000,
            },
            SizeProfile::Large => SizeProfileLimits {
                daily_send_percentage_cap: 0.10,
                ed_daily_soft_limit: 500,
                ed_percentage_of_daily_cap: 0.30,
                ed_smoothing_window_days: 10,
                batch_size: 2_000,
            },
            SizeProfile::Enterprise => SizeProfileLimits {
                daily_send_percentage_cap: 0.08,
                ed_daily_soft_limit: 1_500,
                ed_percentage_of_daily_cap: 0.30,
                ed_smoothing_window_days: 14,
                batch_size: 5_000,
            },
        }
    }
}

/// Per-org numeric overrides of the [`SizeProfile`] defaults. Any `None`
/// field falls back to the profile's table value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeProfileOverrides {
    /// Override for `daily_send_percentage_cap`.
    pub daily_send_percentage_cap: Option<f64>,
    /// Override for `ed_daily_soft_limit`.
    pub ed_daily_soft_limit: Option<u32>,
    /// Override for `ed_percentage_of_daily_cap`.
    pub ed_percentage_of_daily_cap: Option<f64>,
    /// Override for `ed_smoothing_window_days`.
    pub ed_smoothing_window_days: Option<u32>,
    /// Override for `batch_size`.
    pub batch_size: Option<usize>,
}

impl SizeProfileOverrides {
    /// Apply these overrides on top of `profile`'s defaults.
    pub fn resolve(&self, profile: SizeProfile) -> SizeProfileLimits {
        let base = profile.default_limits();
        SizeProfileLimits {
            daily_send_percentage_cap: self
                .daily_send_percentage_cap
                .unwrap_or(base.daily_send_percentage_cap),
            ed_daily_soft_limit: self.ed_daily_soft_limit.unwrap_or(base.ed_daily_soft_limit),
            ed_percentage_of_daily_cap: self
                .ed_percentage_of_daily_cap
                .unwrap_or(base.ed_percentage_of_daily_cap),
            ed_smoothing_window_days: self
                .ed_smoothing_window_days
                .unwrap_or(base.ed_smoothing_window_days),
            batch_size: self.batch_size.unwrap_or(base.batch_size),
        }
    }
}

/// Business toggles, customer preferences, frequency limits, and a size
/// profile — everything the pipeline needs to run one org's schedule (§3).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrganizationConfig {
    // ── Business toggles ──────────────────────────────────────────────
    /// Whether post-window make-up emails are scheduled at all.
    pub enable_post_window_emails: bool,
    /// Minimum age (in months since `effective_date`) before a customer
    /// receives their first effective-date email.
    pub effective_date_first_email_months: i32,
    /// Whether contacts who failed underwriting are globally excluded
    /// from non-AEP campaigns.
    pub exclude_failed_underwriting_global: bool,
    /// Whether a universally-targeted instance may enroll a contact with
    /// no ZIP/state on file.
    pub send_without_zipcode_for_universal: bool,
    /// Extra days added before every exclusion window (GLOSSARY:
    /// "Pre-window buffer").
    pub pre_exclusion_buffer_days: i32,

    // ── Customer preferences ──────────────────────────────────────────
    /// Days before a birthday to send the birthday email.
    pub birthday_days_before: i32,
    /// Days before an effective-date anniversary to send its email.
    pub effective_date_days_before: i32,
    /// Hour of day to send at.
    pub send_time_hour: u8,
    /// Minute of hour to send at.
    pub send_time_minute: u8,
    /// IANA timezone name the engine's `Clock` reports in.
    pub timezone: String,

    // ── Frequency limits ───────────────────────────────────────────────
    /// Lookback window, in days, for follow-up classification (§4.7).
    pub followup_lookback_days: i32,
    /// Delay, in days, between an original send and its follow-up.
    pub followup_delay_days: i32,
    /// Width, in days, of the overflow catch-up spread (§4.8).
    pub catch_up_spread_days: i32,
    /// Threshold, as a multiple of the daily cap, above which a day is
    /// considered overloaded (§4.8, default 1.2).
    pub overage_threshold: f64,

    // ── Size profile ────────────────────────────────────────────────────
    /// The org's capacity tier.
    pub size_profile: SizeProfile,
    /// Per-org numeric overrides of the tier's defaults.
    pub size_profile_overrides: SizeProfileOverrides,
}

impl OrganizationConfig {
    /// The configured send time as a `Time` (§4.5: birthday email time).
    pub fn send_time(&self) -> sched_core::errors::Result<Time> {
        Time::new(self.send_time_hour, self.send_time_minute, 0)
    }

    /// Resolve this org's effective size-profile limits.
    pub fn size_limits(&self) -> SizeProfileLimits {
        self.size_profile_overrides.resolve(self.size_profile)
    }
}

impl Default for OrganizationConfig {
    /// Defaults chosen to match the end-to-end scenarios in §8 (S1–S6):
    /// 14-day birthday lead, 08:30 send time, 60-day pre-window buffer.
    fn default() -> Self {
        Self {
            enable_post_window_emails: true,
            effective_date_first_email_months: 0,
            exclude_failed_underwriting_global: false,
            send_without_zipcode_for_universal: false,
            pre_exclusion_buffer_days: 60,
            birthday_days_before: 14,
            effective_date_days_before: 14,
            send_time_hour: 8,
            send_time_minute: 30,
            timezone: "America/Chicago".into(),
            followup_lookback_days: 35,
            followup_delay_days: 2,
            catch_up_spread_days: 7,
            overage_threshold: 1.2,
            size_profile: SizeProfile::Medium,
            size_profile_overrides: SizeProfileOverrides::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_send_time_matches_scenarios() {
        let cfg = OrganizationConfig::default();
        assert_eq!(cfg.send_time().unwrap().to_string(), "08:30:00");
    }

    #[test]
    fn overrides_take_precedence_over_profile_defaults() {
        let mut overrides = SizeProfileOverrides::default();
        overrides.ed_daily_soft_limit = Some(999);
        let limits = overrides.resolve(SizeProfile::Small);
        assert_eq!(limits.ed_daily_soft_limit, 999);
        assert_eq!(limits.ed_smoothing_window_days, 7); // untouched default
    }

    #[test]
    fn profile_defaults_scale_down_as_population_grows() {
        let small = SizeProfile::Small.default_limits();
        let enterprise = SizeProfile::Enterprise.default_limits();
        assert!(enterprise.daily_send_percentage_cap < small.daily_send_percentage_cap);
    }
}

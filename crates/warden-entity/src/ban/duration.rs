//! Ban duration classes and their resolution into concrete expiries.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use warden_core::{AppError, AppResult};

/// The fixed set of duration classes an operator can pick when banning.
///
/// Presets map to a fixed number of seconds; `Custom` carries an
/// explicit expiry chosen in the dashboard; `Permanent` has neither a
/// duration nor an expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ban_duration", rename_all = "lowercase")]
pub enum BanDuration {
    #[serde(rename = "1h")]
    #[sqlx(rename = "1h")]
    OneHour,
    #[serde(rename = "6h")]
    #[sqlx(rename = "6h")]
    SixHours,
    #[serde(rename = "12h")]
    #[sqlx(rename = "12h")]
    TwelveHours,
    #[serde(rename = "1d")]
    #[sqlx(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    #[sqlx(rename = "3d")]
    ThreeDays,
    #[serde(rename = "7d")]
    #[sqlx(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    #[sqlx(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "permanent")]
    Permanent,
    #[serde(rename = "custom")]
    Custom,
}

/// A duration class resolved against a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDuration {
    /// Remaining ban length in seconds. `None` means permanent.
    pub duration_seconds: Option<i64>,
    /// Absolute expiry. `None` means permanent.
    pub expires_at: Option<DateTime<Utc>>,
}

impl BanDuration {
    /// Seconds for a preset class; `None` for `Permanent` and `Custom`.
    pub fn preset_seconds(&self) -> Option<i64> {
        match self {
            Self::OneHour => Some(3_600),
            Self::SixHours => Some(21_600),
            Self::TwelveHours => Some(43_200),
            Self::OneDay => Some(86_400),
            Self::ThreeDays => Some(259_200),
            Self::SevenDays => Some(604_800),
            Self::ThirtyDays => Some(2_592_000),
            Self::Permanent | Self::Custom => None,
        }
    }

    /// Resolve this class into a concrete duration and expiry.
    ///
    /// `Custom` requires `custom_expiry`; the remaining seconds are
    /// clamped at zero for expiries already in the past. Presets expire
    /// at `now + preset`; `Permanent` resolves to neither.
    pub fn resolve(
        &self,
        now: DateTime<Utc>,
        custom_expiry: Option<DateTime<Utc>>,
    ) -> AppResult<ResolvedDuration> {
        match self {
            Self::Permanent => Ok(ResolvedDuration {
                duration_seconds: None,
                expires_at: None,
            }),
            Self::Custom => {
                let expiry = custom_expiry.ok_or_else(|| {
                    AppError::validation("Custom ban duration requires an expiry timestamp")
                })?;
                let seconds = (expiry - now).num_seconds().max(0);
                Ok(ResolvedDuration {
                    duration_seconds: Some(seconds),
                    expires_at: Some(expiry),
                })
            }
            preset => {
                // preset_seconds is Some for every remaining variant
                let seconds = preset.preset_seconds().unwrap_or(0);
                Ok(ResolvedDuration {
                    duration_seconds: Some(seconds),
                    expires_at: Some(now + Duration::seconds(seconds)),
                })
            }
        }
    }
}

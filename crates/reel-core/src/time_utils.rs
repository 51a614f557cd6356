use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::{ReelError, Result};

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| {
        warn!("Could not detect system timezone, falling back to UTC");
        "UTC".to_string()
    })
}

// ── DayKeyer ──────────────────────────────────────────────────────────────────

/// Maps epoch-millisecond timestamps to calendar-day keys in one fixed
/// timezone.
///
/// Both key derivation and date reconstruction go through the same `Tz`, so
/// two timestamps compare equal as day keys exactly when they fall on the
/// same local calendar date.
#[derive(Debug, Clone)]
pub struct DayKeyer {
    tz: Tz,
}

impl DayKeyer {
    /// Create a keyer for the given IANA timezone name.
    ///
    /// `"auto"` resolves to the system timezone. An unrecognised name is a
    /// configuration error, surfaced rather than silently defaulted.
    pub fn new(tz_name: &str) -> Result<Self> {
        let resolved = if tz_name == "auto" {
            get_system_timezone()
        } else {
            tz_name.to_string()
        };
        let tz = resolved
            .parse::<Tz>()
            .map_err(|_| ReelError::InvalidTimezone(resolved))?;
        Ok(Self { tz })
    }

    /// A keyer pinned to UTC, mainly for tests and headless runs.
    pub fn utc() -> Self {
        Self { tz: Tz::UTC }
    }

    /// Convert epoch milliseconds to a timezone-aware datetime.
    ///
    /// Out-of-range values (beyond what `chrono` can represent) are an
    /// explicit [`ReelError::Timestamp`] error, never a silent default.
    pub fn datetime(&self, timestamp_ms: i64) -> Result<DateTime<Tz>> {
        match Utc.timestamp_millis_opt(timestamp_ms) {
            chrono::LocalResult::Single(dt) => Ok(dt.with_timezone(&self.tz)),
            _ => Err(ReelError::Timestamp(timestamp_ms)),
        }
    }

    /// Derive the calendar-day key for a timestamp.
    pub fn day_key(&self, timestamp_ms: i64) -> Result<NaiveDate> {
        Ok(self.datetime(timestamp_ms)?.date_naive())
    }

    /// Validate that `tz_name` is a recognised IANA timezone identifier.
    pub fn validate_timezone(tz_name: &str) -> bool {
        tz_name == "auto" || tz_name.parse::<Tz>().is_ok()
    }

    /// Expose the configured timezone.
    pub fn tz(&self) -> Tz {
        self.tz
    }
}

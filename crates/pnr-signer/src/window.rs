use chrono::DateTime;

use crate::error::SignerError;

pub const SECONDS_PER_DAY: u64 = 86_400;

pub const DEFAULT_EXPIRES_IN_SEC: u64 = 900;
pub const MIN_EXPIRES_IN_SEC: u64 = 60;
pub const MAX_EXPIRES_IN_SEC: u64 = 3_600;

/// Source of wall-clock time for the signing flow.
pub trait Clock: Send + Sync {
    /// Current Unix time in whole seconds.
    fn now_unix(&self) -> u64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        // Pre-epoch clocks are a host misconfiguration; pin them to zero.
        chrono::Utc::now().timestamp().max(0) as u64
    }
}

/// A clock frozen at a single instant.
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_unix(&self) -> u64 {
        self.0
    }
}

/// UTC day bucket: `floor(now / 86400)`.
pub fn day_id(now: u64) -> u64 {
    now / SECONDS_PER_DAY
}

/// `YYYY-MM-DD` of `now` in UTC.
pub fn utc_date_label(now: u64) -> Result<String, SignerError> {
    let secs = i64::try_from(now)
        .map_err(|_| SignerError::InternalFailure(format!("timestamp {now} out of range")))?;
    let datetime = DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| SignerError::InternalFailure(format!("timestamp {now} out of range")))?;
    Ok(datetime.format("%Y-%m-%d").to_string())
}

/// Clamp a requested lifetime into `[60, 3600]`, substituting 900 when absent.
pub fn clamp_expires_in(requested: Option<u64>) -> u64 {
    requested
        .unwrap_or(DEFAULT_EXPIRES_IN_SEC)
        .clamp(MIN_EXPIRES_IN_SEC, MAX_EXPIRES_IN_SEC)
}

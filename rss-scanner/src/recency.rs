use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use std::fmt;
use tracing::debug;

/// How far back an article may have been published and still be scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackWindow {
    hours: u32,
}

impl LookbackWindow {
    pub const DAILY: LookbackWindow = LookbackWindow { hours: 24 };
    pub const WEEKLY: LookbackWindow = LookbackWindow { hours: 168 };

    pub fn from_hours(hours: u32) -> Self {
        Self { hours }
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn duration(&self) -> Duration {
        Duration::hours(i64::from(self.hours))
    }
}

impl Default for LookbackWindow {
    fn default() -> Self {
        Self::DAILY
    }
}

impl fmt::Display for LookbackWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours > 24 && self.hours % 24 == 0 {
            write!(f, "{} days", self.hours / 24)
        } else {
            write!(f, "{} hours", self.hours)
        }
    }
}

/// True iff `published` exists, is not after `now`, and is at most `window` old.
///
/// Future timestamps are rejected so clock skew or a mangled date cannot
/// push an article into every run.
pub fn is_recent(published: Option<NaiveDateTime>, window: LookbackWindow, now: DateTime<Utc>) -> bool {
    let Some(published) = published else {
        return false;
    };

    let now = now.naive_utc();
    if published > now {
        debug!("Skipping entry dated in the future: {}", published);
        return false;
    }

    now.signed_duration_since(published) <= window.duration()
}

use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::time::Duration;

/// Tunables for match recording and how timestamps are presented.
///
/// Keys left out of the `league` section keep their defaults.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LeagueSettings {
    /// How many times a batch is re-run after a lock conflict before giving up.
    pub max_batch_retries: u32,
    pub retry_backoff_ms: u64,
    /// Offset used for the human readable `*_local` timestamps in responses.
    pub display_utc_offset_hours: i32,
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            max_batch_retries: 3,
            retry_backoff_ms: 50,
            display_utc_offset_hours: 7,
        }
    }
}

impl LeagueSettings {
    pub fn display_offset(&self) -> FixedOffset {
        self.display_utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                tracing::warn!(
                    "Display offset of {}h is out of range, falling back to UTC",
                    self.display_utc_offset_hours
                );
                Utc.fix()
            })
    }

    /// Backoff before the given (1-based) retry attempt.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(u64::from(attempt)))
    }
}

//! Timer durations used by the controller.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Clock interval and deferred-task delays.
///
/// Deserializes from millisecond fields so it can sit in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Interval between clock ticks.
    #[serde(rename = "tick_interval_ms", with = "millis")]
    pub tick_interval: Duration,
    /// Delay before a matched pair is confirmed.
    #[serde(rename = "match_delay_ms", with = "millis")]
    pub match_delay: Duration,
    /// Delay before a mismatched pair is turned back over.
    #[serde(rename = "mismatch_delay_ms", with = "millis")]
    pub mismatch_delay: Duration,
    /// How long a hint shows every card.
    #[serde(rename = "hint_duration_ms", with = "millis")]
    pub hint_duration: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            match_delay: Duration::from_millis(500),
            mismatch_delay: Duration::from_millis(1000),
            hint_duration: Duration::from_secs(2),
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

//! Timestamp type used throughout the client.
//!
//! Timestamps are Unix epoch seconds (UTC), matching the proposal start and
//! end times stored by the voting contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the current system time as a `Timestamp`.
    ///
    /// A clock set before the epoch reads as the epoch.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds left until this timestamp, or `None` once it has passed.
    pub fn remaining_from(&self, now: Timestamp) -> Option<u64> {
        if now.0 >= self.0 {
            None
        } else {
            Some(self.0 - now.0)
        }
    }
}

/// Source of the current time, so rendering can be pinned in tests.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_from_future_end() {
        let end = Timestamp::new(1_000);
        assert_eq!(end.remaining_from(Timestamp::new(400)), Some(600));
    }

    #[test]
    fn remaining_from_past_end() {
        let end = Timestamp::new(1_000);
        assert_eq!(end.remaining_from(Timestamp::new(1_000)), None);
        assert_eq!(end.remaining_from(Timestamp::new(5_000)), None);
    }
}

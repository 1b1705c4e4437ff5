//! Wall-clock source, injectable so signed requests can be reproduced in tests.

use std::time::{SystemTime, UNIX_EPOCH};

pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;

    /// Seconds since the Unix epoch, rounded to the nearest second.
    fn now_secs(&self) -> u64 {
        (self.now_millis() + 500) / 1000
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        epoch_millis()
    }
}

/// A clock frozen at fixed values.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub millis: u64,
    pub secs: u64,
}

impl FixedClock {
    pub fn new(millis: u64, secs: u64) -> Self {
        Self { millis, secs }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.millis
    }

    fn now_secs(&self) -> u64 {
        self.secs
    }
}

pub fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

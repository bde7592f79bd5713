//! Reconnect policy: capped exponential backoff with a retry limit.

use std::time::Duration;

const BASE_DELAY_MS: u64 = 1000;
const MAX_DELAY_MS: u64 = 10_000;
const MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Default)]
pub struct Backoff {
    attempts: u32,
}

impl Backoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay before the next reconnect attempt, or None once the retry
    /// budget is exhausted.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.attempts >= MAX_ATTEMPTS {
            return None;
        }
        self.attempts += 1;
        let delay = (BASE_DELAY_MS << self.attempts).min(MAX_DELAY_MS);
        Some(Duration::from_millis(delay))
    }

    /// Called on a successful connection.
    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

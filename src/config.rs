//! Runtime configuration

use std::time::Duration;

const DEFAULT_TICK: Duration = Duration::from_millis(10);
const DEFAULT_FRAME_BUFFER: usize = 128;

/// Configuration for the reveal runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealConfig {
    /// Time between two reveal steps
    pub tick: Duration,
    /// Frames buffered per subscriber before slow ones start skipping
    pub frame_buffer: usize,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            frame_buffer: DEFAULT_FRAME_BUFFER,
        }
    }
}

impl RevealConfig {
    /// Read `REVEAL_TICK_MS` and `REVEAL_FRAME_BUFFER`, falling back to
    /// defaults for missing or invalid values
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let tick = lookup("REVEAL_TICK_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map_or(defaults.tick, Duration::from_millis);

        let frame_buffer = lookup("REVEAL_FRAME_BUFFER")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.frame_buffer);

        Self { tick, frame_buffer }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }
}

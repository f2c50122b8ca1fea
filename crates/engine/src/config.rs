//! Runtime configuration from environment variables.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::{FRAME_MS, TICK_MS};

/// Knobs for one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Gravity tick period.
    pub tick_ms: u64,
    /// Render period.
    pub frame_ms: u64,
    pub seed: u32,
    /// Append tracing output to this file when set.
    pub log_path: Option<String>,
    /// Depth of the bounded command queue.
    pub command_queue: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            frame_ms: FRAME_MS,
            seed: 1,
            log_path: None,
            command_queue: 32,
        }
    }
}

impl RunConfig {
    /// Create from environment variables.
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RunConfig::from_env`] with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let tick_ms = lookup("BLOCKS_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u64| ms > 0)
            .unwrap_or(defaults.tick_ms);

        let frame_ms = lookup("BLOCKS_FRAME_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u64| ms > 0)
            .unwrap_or(defaults.frame_ms);

        let seed = lookup("BLOCKS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let log_path = lookup("BLOCKS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let command_queue = lookup("BLOCKS_COMMAND_QUEUE")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.command_queue)
            .max(1);

        Self {
            tick_ms,
            frame_ms,
            seed,
            log_path,
            command_queue,
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

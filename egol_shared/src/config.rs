//! Configuration system.
//!
//! Loads client configuration from JSON strings/files (file IO left to app).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Client-side interpolation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Interval between authoritative server ticks, in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Render frame rate.
    #[serde(default = "default_frame_hz")]
    pub frame_hz: u32,
    /// Clamp the interpolation factor to [0, 1] instead of extrapolating.
    #[serde(default)]
    pub clamp_factor: bool,
    /// Number of snapshots kept for interpolation.
    #[serde(default = "default_history")]
    pub history: usize,
}

fn default_tick_ms() -> u64 {
    250
}

fn default_frame_hz() -> u32 {
    60
}

fn default_history() -> usize {
    32
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            frame_hz: default_frame_hz(),
            clamp_factor: false,
            history: default_history(),
        }
    }
}

impl ClientConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Server tick interval. A `tick_ms` of 0 is treated as 1ms.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_hz.max(1)))
    }
}

//! Bridge configuration schema.
//!
//! [`BridgeConfig`] is what the host writes in `checkout-bridge.toml`:
//!
//! ```toml
//! [session]
//! max_recovery_attempts = 3
//! one_time_use_markers = ["multipass"]
//!
//! [recovery]
//! policy = "default"   # or "never"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every field has a default, so an empty file (or no file at all) is a valid
//! configuration.  Loading and saving live in
//! [`infrastructure::config_store`](crate::infrastructure::config_store); this
//! module only describes the shape.

use serde::{Deserialize, Serialize};

/// Top-level bridge configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub recovery: RecoveryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Per-session limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Back-to-back reloads allowed in one session before a recoverable
    /// error is treated as terminal.  `0` disables reloading entirely.
    #[serde(default = "default_max_recovery_attempts")]
    pub max_recovery_attempts: u32,
    /// Substrings that mark a checkout URL as one-time-use.  Sessions
    /// presenting a matching URL never reload.
    #[serde(default = "default_one_time_use_markers")]
    pub one_time_use_markers: Vec<String>,
}

/// Which built-in recovery policy to install.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryConfig {
    #[serde(default)]
    pub policy: RecoveryPolicy,
}

/// Built-in recovery policies selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryPolicy {
    /// Reload exactly when the error is recoverable.
    #[default]
    Default,
    /// Never reload.
    Never,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_max_recovery_attempts() -> u32 {
    3
}
fn default_one_time_use_markers() -> Vec<String> {
    vec!["multipass".to_string()]
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_recovery_attempts: default_max_recovery_attempts(),
            one_time_use_markers: default_one_time_use_markers(),
        }
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            policy: RecoveryPolicy::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

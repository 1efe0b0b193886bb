//! Process-wide bridge settings.
//!
//! Settings are read far more often than they change: every new session takes
//! a snapshot at creation and keeps it for its lifetime.  [`SettingsStore`]
//! therefore holds an `Arc<Settings>` behind a `RwLock`; readers clone the
//! `Arc` and release the lock immediately, writers swap in a whole new value.
//! A session never observes a half-applied update.

use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use checkout_core::{DefaultErrorRecovery, ErrorRecovery, NeverRecover};

use crate::domain::config::{BridgeConfig, RecoveryPolicy};

/// Immutable settings snapshot shared by sessions.
#[derive(Clone)]
pub struct Settings {
    /// Policy consulted for every checkout error.
    pub error_recovery: Arc<dyn ErrorRecovery>,
    /// Back-to-back reloads allowed per session.
    pub max_recovery_attempts: u32,
    /// URL substrings marking a checkout URL as one-time-use.  Such a URL
    /// cannot be loaded twice, so sessions presenting it never reload.
    pub one_time_use_markers: Vec<String>,
    /// `tracing` filter directive used by the binary at start-up.
    pub log_level: String,
}

impl Settings {
    /// Builds settings from a loaded [`BridgeConfig`].
    pub fn from_config(config: &BridgeConfig) -> Self {
        let error_recovery: Arc<dyn ErrorRecovery> = match config.recovery.policy {
            RecoveryPolicy::Default => Arc::new(DefaultErrorRecovery),
            RecoveryPolicy::Never => Arc::new(NeverRecover),
        };
        Self {
            error_recovery,
            max_recovery_attempts: config.session.max_recovery_attempts,
            one_time_use_markers: config.session.one_time_use_markers.clone(),
            log_level: config.logging.level.clone(),
        }
    }

    /// Returns a copy with a different recovery policy.
    pub fn with_error_recovery(mut self, recovery: Arc<dyn ErrorRecovery>) -> Self {
        self.error_recovery = recovery;
        self
    }

    /// Returns a copy with a different per-session reload limit.
    pub fn with_max_recovery_attempts(mut self, max: u32) -> Self {
        self.max_recovery_attempts = max;
        self
    }

    /// Returns a copy with different one-time-use URL markers.
    pub fn with_one_time_use_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.one_time_use_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `url` can only be loaded once.
    pub fn is_one_time_use(&self, url: &str) -> bool {
        self.one_time_use_markers
            .iter()
            .any(|marker| !marker.is_empty() && url.contains(marker.as_str()))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&BridgeConfig::default())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("error_recovery", &"<dyn ErrorRecovery>")
            .field("max_recovery_attempts", &self.max_recovery_attempts)
            .field("one_time_use_markers", &self.one_time_use_markers)
            .field("log_level", &self.log_level)
            .finish()
    }
}

// ── SettingsStore ─────────────────────────────────────────────────────────────

/// Holder for the current [`Settings`] with snapshot reads and atomic replacement.
#[derive(Debug, Default)]
pub struct SettingsStore {
    current: RwLock<Arc<Settings>>,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            current: RwLock::new(Arc::new(settings)),
        }
    }

    /// The process-wide store, created with default settings on first use.
    pub fn global() -> &'static SettingsStore {
        static GLOBAL: OnceLock<SettingsStore> = OnceLock::new();
        GLOBAL.get_or_init(SettingsStore::default)
    }

    /// Returns the current settings.  Later updates do not affect the snapshot.
    pub fn snapshot(&self) -> Arc<Settings> {
        // Settings are replaced whole, so a poisoned lock still holds a valid value.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replaces the current settings.
    pub fn replace(&self, settings: Settings) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(settings);
    }

    /// Derives new settings from a snapshot of the current ones and installs them.
    ///
    /// `f` runs with no lock held, so it may read the store itself.  Two
    /// concurrent updates are last-writer-wins.
    pub fn update(&self, f: impl FnOnce(&Settings) -> Settings) {
        let next = f(&self.snapshot());
        self.replace(next);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{CheckoutException, ExceptionKind};

    fn client_error() -> CheckoutException {
        CheckoutException::new(ExceptionKind::Client, "invalid_cart", "bad cart")
    }

    #[test]
    fn test_default_settings_recover_client_errors() {
        // Arrange / Act
        let settings = Settings::default();

        // Assert
        assert_eq!(settings.max_recovery_attempts, 3);
        assert!(settings.error_recovery.should_recover_from_error(&client_error()));
    }

    #[test]
    fn test_never_policy_from_config() {
        // Arrange
        let mut config = BridgeConfig::default();
        config.recovery.policy = RecoveryPolicy::Never;

        // Act
        let settings = Settings::from_config(&config);

        // Assert
        assert!(!settings.error_recovery.should_recover_from_error(&client_error()));
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_replace() {
        // Arrange
        let store = SettingsStore::default();
        let before = store.snapshot();

        // Act
        store.replace(Settings::default().with_max_recovery_attempts(7));

        // Assert
        assert_eq!(before.max_recovery_attempts, 3);
        assert_eq!(store.snapshot().max_recovery_attempts, 7);
    }

    #[test]
    fn test_update_derives_from_current() {
        let store = SettingsStore::new(Settings::default().with_max_recovery_attempts(1));

        store.update(|s| s.clone().with_max_recovery_attempts(s.max_recovery_attempts + 1));

        assert_eq!(store.snapshot().max_recovery_attempts, 2);
    }

    #[test]
    fn test_update_closure_can_read_the_store() {
        // Arrange
        let store = SettingsStore::new(Settings::default().with_max_recovery_attempts(4));

        // Act: reading the store inside the closure must not block on its own lock.
        store.update(|s| {
            let seen = store.snapshot();
            s.clone().with_max_recovery_attempts(seen.max_recovery_attempts * 2)
        });

        // Assert
        assert_eq!(store.snapshot().max_recovery_attempts, 8);
    }

    #[test]
    fn test_default_markers_flag_multipass_urls() {
        let settings = Settings::default();

        assert!(settings.is_one_time_use("https://shop.example/account/login/multipass/abc"));
        assert!(!settings.is_one_time_use("https://shop.example/checkouts/cn/1"));
    }

    #[test]
    fn test_empty_marker_matches_nothing() {
        let settings = Settings::default().with_one_time_use_markers([""]);

        assert!(!settings.is_one_time_use("https://shop.example/checkouts/cn/1"));
    }

    #[test]
    fn test_with_error_recovery_swaps_policy() {
        let settings = Settings::default().with_error_recovery(Arc::new(NeverRecover));
        assert!(!settings.error_recovery.should_recover_from_error(&client_error()));
    }

    #[test]
    fn test_concurrent_readers_see_whole_values() {
        // Arrange
        let store = Arc::new(SettingsStore::default());

        // Act: writers alternate between two consistent values while readers check.
        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..200u32 {
                    let level = if i % 2 == 0 { "debug" } else { "warn" };
                    store.replace(Settings {
                        log_level: level.to_string(),
                        max_recovery_attempts: if i % 2 == 0 { 10 } else { 20 },
                        ..Settings::default()
                    });
                }
            })
        };
        for _ in 0..200 {
            let s = store.snapshot();
            // Assert: level and limit always come from the same write.
            match s.log_level.as_str() {
                "debug" => assert_eq!(s.max_recovery_attempts, 10),
                "warn" => assert_eq!(s.max_recovery_attempts, 20),
                _ => assert_eq!(s.max_recovery_attempts, 3),
            }
        }
        writer.join().unwrap();
    }
}

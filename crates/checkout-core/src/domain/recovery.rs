//! Error recovery policies.
//!
//! When the page reports a [`CheckoutException`], the host decides between
//! reloading the page (recover) and giving up (terminate).  That decision is
//! delegated to an [`ErrorRecovery`] implementation so hosts can plug in their
//! own rules, for example never reloading on a particular error code, or
//! emitting telemetry just before a reload.
//!
//! Both methods have default bodies, so a host only overrides what it needs:
//!
//! ```rust
//! use checkout_core::domain::{CheckoutException, ErrorRecovery};
//!
//! struct NoReloadOnExpiry;
//!
//! impl ErrorRecovery for NoReloadOnExpiry {
//!     fn should_recover_from_error(&self, exception: &CheckoutException) -> bool {
//!         exception.is_recoverable() && exception.error_code() != "cart_expired"
//!     }
//! }
//! ```

use super::exception::CheckoutException;

/// Host-pluggable recover-or-terminate policy.
pub trait ErrorRecovery: Send + Sync {
    /// Returns `true` to reload the page, `false` to report a terminal failure.
    ///
    /// The default follows the exception's static recoverability.
    fn should_recover_from_error(&self, exception: &CheckoutException) -> bool {
        exception.is_recoverable()
    }

    /// Runs immediately before a reload of `current_url`.
    ///
    /// Only called when [`should_recover_from_error`](Self::should_recover_from_error)
    /// returned `true`.  The default does nothing.
    fn pre_recovery_actions(&self, _exception: &CheckoutException, _current_url: &str) {}
}

/// The built-in policy: recover exactly when the exception is recoverable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorRecovery;

impl ErrorRecovery for DefaultErrorRecovery {}

/// A policy that never reloads.  Every error becomes terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverRecover;

impl ErrorRecovery for NeverRecover {
    fn should_recover_from_error(&self, _exception: &CheckoutException) -> bool {
        false
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

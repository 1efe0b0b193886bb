//! CheckoutSession: the lifecycle of one checkout presentation.
//!
//! ```text
//!            present(url)
//!   Idle ───────────────▶ Presenting ──┬── completed message ──────▶ Completed
//!                          │    ▲      ├── error, policy gives up ─▶ FailedTerminal
//!                          │    │      └── cancel() ───────────────▶ Canceled
//!                          └────┘
//!                recoverable error (reload)
//! ```
//!
//! Terminal states never leave, and messages arriving in them (or before
//! `present`) are dropped without reaching the host.  Reloads are bounded by
//! [`Settings::max_recovery_attempts`]: once the router has requested that
//! many in a row, the next error is handled as unrecoverable.  Any handled
//! message in between starts the count again.  A one-time-use URL (see
//! [`Settings::is_one_time_use`]) is never reloaded.
//!
//! Replies to page requests go through [`CheckoutSession::respond`], which
//! accepts each pending request id exactly once.

use std::fmt;
use std::sync::Arc;

use checkout_core::{
    BridgeMessage, Channel, CheckoutException, DeliveryAddressChange, ErrorRecovery, PayloadError,
    RpcResponse,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::processor::EventProcessor;
use super::router::{Router, RoutingOutcome};
use super::settings::Settings;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Presenting,
    Completed,
    Canceled,
    FailedTerminal,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionState::Completed | SessionState::Canceled | SessionState::FailedTerminal
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Idle => "idle",
            SessionState::Presenting => "presenting",
            SessionState::Completed => "completed",
            SessionState::Canceled => "canceled",
            SessionState::FailedTerminal => "failed",
        };
        f.write_str(s)
    }
}

/// Error type for session lifecycle operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session can only be presented from idle (state: {0})")]
    NotIdle(SessionState),
    #[error("checkout URL must not be empty")]
    EmptyUrl,
    #[error("cannot reply while the session is {0}")]
    NotPresenting(SessionState),
    #[error("no pending request with id '{0}'")]
    UnknownRequest(String),
    #[error("invalid reply: {0}")]
    InvalidReply(#[from] PayloadError),
    #[error("failed to encode reply: {0}")]
    EncodeReply(String),
}

// ── CappedRecovery ────────────────────────────────────────────────────────────

/// Wraps a recovery policy and refuses once `attempts` reaches `max_attempts`.
///
/// `pre_recovery_actions` is forwarded unchanged.
pub struct CappedRecovery<'a> {
    inner: &'a dyn ErrorRecovery,
    attempts: u32,
    max_attempts: u32,
}

impl<'a> CappedRecovery<'a> {
    pub fn new(inner: &'a dyn ErrorRecovery, attempts: u32, max_attempts: u32) -> Self {
        Self {
            inner,
            attempts,
            max_attempts,
        }
    }
}

impl ErrorRecovery for CappedRecovery<'_> {
    fn should_recover_from_error(&self, exception: &CheckoutException) -> bool {
        if self.attempts >= self.max_attempts {
            debug!(
                attempts = self.attempts,
                max = self.max_attempts,
                "recovery limit reached"
            );
            return false;
        }
        self.inner.should_recover_from_error(exception)
    }

    fn pre_recovery_actions(&self, exception: &CheckoutException, current_url: &str) {
        self.inner.pre_recovery_actions(exception, current_url);
    }
}

// ── CheckoutSession ───────────────────────────────────────────────────────────

/// One checkout presentation.
///
/// Owns its [`Router`] and a [`Settings`] snapshot taken at creation.  Not
/// `Clone`: exactly one owner feeds it messages, in arrival order.
pub struct CheckoutSession {
    id: Uuid,
    state: SessionState,
    url: Option<String>,
    router: Router,
    processor: Arc<dyn EventProcessor>,
    settings: Arc<Settings>,
}

impl CheckoutSession {
    pub fn new(processor: Arc<dyn EventProcessor>, settings: Arc<Settings>) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Idle,
            url: None,
            router: Router::new(),
            processor,
            settings,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The URL being presented, once `present` has been called.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Reloads requested back to back, counted against the cap.
    pub fn recovery_attempts(&self) -> u32 {
        self.router.recovery_attempts()
    }

    /// Reloads requested over the whole session.
    pub fn total_recoveries(&self) -> u32 {
        self.router.total_recoveries()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Starts presenting `url`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotIdle`] if the session was already presented,
    /// [`SessionError::EmptyUrl`] for a blank URL.
    pub fn present(&mut self, url: impl Into<String>) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            return Err(SessionError::NotIdle(self.state));
        }
        let url = url.into();
        if url.trim().is_empty() {
            return Err(SessionError::EmptyUrl);
        }
        info!(session = %self.id, %url, "presenting checkout");
        self.url = Some(url);
        self.router.reset_recovery_attempts();
        self.state = SessionState::Presenting;
        Ok(())
    }

    /// Routes one message and advances the state machine.
    ///
    /// Returns [`RoutingOutcome::Ignored`] without calling the host when the
    /// session is not presenting.
    pub fn handle(&mut self, message: BridgeMessage) -> RoutingOutcome {
        if self.state != SessionState::Presenting {
            debug!(
                session = %self.id,
                state = %self.state,
                channel = message.channel_name(),
                "dropping message outside presentation"
            );
            return RoutingOutcome::Ignored;
        }

        let completes = message.channel() == Channel::Completed;
        let url = self.url.as_deref().unwrap_or_default();
        let max_attempts = if self.settings.is_one_time_use(url) {
            0
        } else {
            self.settings.max_recovery_attempts
        };
        let recovery = CappedRecovery::new(
            self.settings.error_recovery.as_ref(),
            self.router.recovery_attempts(),
            max_attempts,
        );
        let outcome = self
            .router
            .route(message, self.processor.as_ref(), &recovery, url);

        match &outcome {
            RoutingOutcome::Handled if completes => self.transition(SessionState::Completed),
            RoutingOutcome::Terminate => self.transition(SessionState::FailedTerminal),
            RoutingOutcome::Recover { url } => {
                info!(session = %self.id, %url, attempt = self.router.recovery_attempts(), "reloading checkout");
            }
            RoutingOutcome::Handled | RoutingOutcome::Ignored => {}
        }
        outcome
    }

    /// Builds the reply to the pending request `id`.
    ///
    /// Each request is answered at most once; the caller posts the returned
    /// response to the page.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotPresenting`] outside [`SessionState::Presenting`],
    /// [`SessionError::UnknownRequest`] if `id` was never routed or was
    /// already answered.
    pub fn respond(&mut self, id: &str, result: Value) -> Result<RpcResponse, SessionError> {
        if self.state != SessionState::Presenting {
            return Err(SessionError::NotPresenting(self.state));
        }
        if !self.router.take_pending_request(id) {
            warn!(session = %self.id, %id, "reply for unknown or answered request");
            return Err(SessionError::UnknownRequest(id.to_string()));
        }
        debug!(session = %self.id, %id, "replying to page request");
        Ok(RpcResponse::new(id, result))
    }

    /// Validates `reply` and answers the address change request `id` with it.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidReply`] if the reply fails validation; the
    /// request stays pending so a corrected reply can follow.  Otherwise as
    /// for [`respond`](Self::respond).
    pub fn respond_to_address_change(
        &mut self,
        id: &str,
        reply: &DeliveryAddressChange,
    ) -> Result<RpcResponse, SessionError> {
        reply.validate()?;
        let result =
            serde_json::to_value(reply).map_err(|e| SessionError::EncodeReply(e.to_string()))?;
        self.respond(id, result)
    }

    /// Dismisses a presenting session.
    ///
    /// Fires `on_checkout_canceled` and returns `true` the first time; does
    /// nothing and returns `false` in any other state.
    pub fn cancel(&mut self) -> bool {
        if self.state != SessionState::Presenting {
            return false;
        }
        self.transition(SessionState::Canceled);
        self.processor.on_checkout_canceled();
        true
    }

    fn transition(&mut self, next: SessionState) {
        info!(session = %self.id, from = %self.state, to = %next, "session state changed");
        self.state = next;
    }
}

impl fmt::Debug for CheckoutSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutSession")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("url", &self.url)
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Router: turns one bridge message into one host callback and one outcome.
//!
//! ```text
//! BridgeMessage ─decode─▶ Pixel                  → on_pixel_event               → Handled
//!                         Completed              → on_checkout_completed        → Handled
//!                         AddressChangeRequested → on_address_change_requested  → Handled
//!                         CheckoutStart          → on_checkout_started          → Handled
//!                         SubmitStart            → on_submit_started            → Handled
//!                         PaymentMethodChangeStart
//!                                   → on_payment_method_change_started          → Handled
//!                         Error ─policy─▶ recover   → pre_recovery_actions      → Recover { url }
//!                                        └ give up  → on_checkout_failed        → Terminate
//!               ─fails──▶ on_decoding_failed                                    → Ignored
//! unknown channel                                                               → Ignored
//! ```
//!
//! The router never reloads or closes anything itself.  The caller acts on
//! the returned [`RoutingOutcome`].
//!
//! Request messages that carry an id are remembered as pending until the
//! host replies through [`Router::take_pending_request`].

use std::collections::HashSet;

use checkout_core::{
    decode_message, BridgeMessage, Channel, CheckoutException, DecodedMessage, ErrorRecovery,
};
use tracing::{debug, warn};

use super::processor::{DecodingFailure, EventProcessor};

/// Longest body prefix (in characters) written to the log for a decode failure.
pub const LOGGED_BODY_LIMIT: usize = 1500;

/// What the caller should do after a message was routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingOutcome {
    /// A callback ran; nothing else to do.
    Handled,
    /// Reload the page at `url`.
    Recover { url: String },
    /// Tear the presentation down.
    Terminate,
    /// Nothing was delivered to the host.
    Ignored,
}

/// Routes bridge messages for one presentation.
///
/// Counts the recoveries it has requested.  The consecutive count, which a
/// capping policy reads to bound reload loops, drops back to zero as soon as
/// a message is handled, since that shows the reloaded page is working.
#[derive(Debug, Default)]
pub struct Router {
    recovery_attempts: u32,
    total_recoveries: u32,
    pending_requests: HashSet<String>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of [`RoutingOutcome::Recover`] outcomes returned back to back,
    /// with no [`RoutingOutcome::Handled`] in between.
    pub fn recovery_attempts(&self) -> u32 {
        self.recovery_attempts
    }

    /// Number of [`RoutingOutcome::Recover`] outcomes returned since creation
    /// or the last [`reset_recovery_attempts`](Self::reset_recovery_attempts).
    pub fn total_recoveries(&self) -> u32 {
        self.total_recoveries
    }

    pub fn reset_recovery_attempts(&mut self) {
        self.recovery_attempts = 0;
        self.total_recoveries = 0;
    }

    /// Whether a request with `id` was routed and has not been answered.
    pub fn is_pending(&self, id: &str) -> bool {
        self.pending_requests.contains(id)
    }

    /// Marks the request `id` as answered.  Returns `false` if it was never
    /// routed or was already answered.
    pub fn take_pending_request(&mut self, id: &str) -> bool {
        self.pending_requests.remove(id)
    }

    /// Decodes `message`, invokes the matching `processor` callback, and
    /// applies `recovery` to errors.
    ///
    /// Exactly one of `on_checkout_failed` or `pre_recovery_actions` runs for
    /// each error message.  `current_url` is the page currently presented.
    pub fn route(
        &mut self,
        message: BridgeMessage,
        processor: &dyn EventProcessor,
        recovery: &dyn ErrorRecovery,
        current_url: &str,
    ) -> RoutingOutcome {
        if let Channel::Unknown(name) = message.channel() {
            debug!(channel = %name, "ignoring message on unknown channel");
            return RoutingOutcome::Ignored;
        }

        let decoded = match decode_message(&message) {
            Ok(decoded) => decoded,
            Err(error) => {
                let (channel, body) = message.into_parts();
                warn!(
                    %channel,
                    body = body_prefix(&body, LOGGED_BODY_LIMIT),
                    error = %error,
                    "failed to decode bridge message"
                );
                processor.on_decoding_failed(&DecodingFailure {
                    channel,
                    body,
                    error,
                });
                return RoutingOutcome::Ignored;
            }
        };

        if let Some(id) = decoded.request_id() {
            if !self.pending_requests.insert(id.to_string()) {
                warn!(%id, "request id reused before it was answered");
            }
        }
        let outcome = self.dispatch(decoded, processor, recovery, current_url);
        if outcome == RoutingOutcome::Handled {
            self.recovery_attempts = 0;
        }
        outcome
    }

    fn dispatch(
        &mut self,
        decoded: DecodedMessage,
        processor: &dyn EventProcessor,
        recovery: &dyn ErrorRecovery,
        current_url: &str,
    ) -> RoutingOutcome {
        match decoded {
            DecodedMessage::Pixel(event) => {
                processor.on_pixel_event(&event);
                RoutingOutcome::Handled
            }
            DecodedMessage::Completed(event) => {
                processor.on_checkout_completed(&event);
                RoutingOutcome::Handled
            }
            DecodedMessage::AddressChangeRequested(event) => {
                processor.on_address_change_requested(&event);
                RoutingOutcome::Handled
            }
            DecodedMessage::CheckoutStart(event) => {
                processor.on_checkout_started(&event);
                RoutingOutcome::Handled
            }
            DecodedMessage::SubmitStart(event) => {
                processor.on_submit_started(&event);
                RoutingOutcome::Handled
            }
            DecodedMessage::PaymentMethodChangeStart(event) => {
                processor.on_payment_method_change_started(&event);
                RoutingOutcome::Handled
            }
            DecodedMessage::Error(error) => self.route_error(error, processor, recovery, current_url),
        }
    }

    fn route_error(
        &mut self,
        error: CheckoutException,
        processor: &dyn EventProcessor,
        recovery: &dyn ErrorRecovery,
        current_url: &str,
    ) -> RoutingOutcome {
        if recovery.should_recover_from_error(&error) {
            self.recovery_attempts += 1;
            self.total_recoveries += 1;
            debug!(
                kind = %error.kind(),
                code = error.error_code(),
                attempt = self.recovery_attempts,
                total = self.total_recoveries,
                "recovering from checkout error"
            );
            recovery.pre_recovery_actions(&error, current_url);
            RoutingOutcome::Recover {
                url: current_url.to_string(),
            }
        } else {
            warn!(
                kind = %error.kind(),
                code = error.error_code(),
                recoverable = error.is_recoverable(),
                "checkout failed"
            );
            processor.on_checkout_failed(&error);
            RoutingOutcome::Terminate
        }
    }
}

/// Returns at most the first `limit` characters of `body`.
fn body_prefix(body: &str, limit: usize) -> &str {
    match body.char_indices().nth(limit) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

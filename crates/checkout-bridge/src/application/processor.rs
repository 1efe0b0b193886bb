//! EventProcessor: the callbacks a host implements to react to checkout events.
//!
//! Every method has an empty default body so a host only overrides what it
//! cares about.  The router calls at most one method per message.

use checkout_core::{
    AddressChangeRequestedEvent, CheckoutCompletedEvent, CheckoutException, CheckoutStartEvent,
    DecodingError, PaymentMethodChangeStartEvent, PixelEvent, SubmitStartEvent,
};

/// A message whose body could not be decoded.
///
/// Carries the raw channel name and body so a host can report them.
#[derive(Debug)]
pub struct DecodingFailure {
    pub channel: String,
    pub body: String,
    pub error: DecodingError,
}

/// Host callbacks for checkout events.
///
/// Implementations must be `Send + Sync` because the session worker runs on a
/// tokio task.
pub trait EventProcessor: Send + Sync {
    /// An analytics event was posted.
    fn on_pixel_event(&self, _event: &PixelEvent) {}

    /// The buyer completed checkout.
    fn on_checkout_completed(&self, _event: &CheckoutCompletedEvent) {}

    /// Checkout failed and will not be reloaded.
    ///
    /// Use [`CheckoutException::is_recoverable`] to read the recoverable flag.
    fn on_checkout_failed(&self, _error: &CheckoutException) {}

    /// The buyer or the host dismissed checkout before it finished.
    fn on_checkout_canceled(&self) {}

    /// The buyer asked to choose a different address.
    ///
    /// When `event.id` is set the page waits for a reply; send one through
    /// the session with the same id.
    fn on_address_change_requested(&self, _event: &AddressChangeRequestedEvent) {}

    /// Checkout has loaded.
    fn on_checkout_started(&self, _event: &CheckoutStartEvent) {}

    /// The buyer submitted checkout.
    fn on_submit_started(&self, _event: &SubmitStartEvent) {}

    /// The buyer asked to change payment method.
    fn on_payment_method_change_started(&self, _event: &PaymentMethodChangeStartEvent) {}

    /// A message on a known channel had a body that could not be decoded.
    fn on_decoding_failed(&self, _failure: &DecodingFailure) {}
}

// ── Legacy callback shim ──────────────────────────────────────────────────────

/// Callbacks for hosts that expect the recoverable flag as a separate argument.
pub trait LegacyEventProcessor: Send + Sync {
    fn on_pixel_event(&self, _event: &PixelEvent) {}
    fn on_checkout_completed(&self, _event: &CheckoutCompletedEvent) {}
    fn on_checkout_failed(&self, _error: &CheckoutException, _recoverable: bool) {}
    fn on_checkout_canceled(&self) {}
    fn on_address_change_requested(&self, _event: &AddressChangeRequestedEvent) {}
    fn on_checkout_started(&self, _event: &CheckoutStartEvent) {}
    fn on_submit_started(&self, _event: &SubmitStartEvent) {}
    fn on_payment_method_change_started(&self, _event: &PaymentMethodChangeStartEvent) {}
    fn on_decoding_failed(&self, _failure: &DecodingFailure) {}
}

/// Adapts a [`LegacyEventProcessor`] to [`EventProcessor`].
///
/// The recoverable flag passed to the legacy failure callback is read from
/// the exception itself.
#[derive(Debug, Clone)]
pub struct LegacyFailureAdapter<P> {
    inner: P,
}

impl<P: LegacyEventProcessor> LegacyFailureAdapter<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: LegacyEventProcessor> EventProcessor for LegacyFailureAdapter<P> {
    fn on_pixel_event(&self, event: &PixelEvent) {
        self.inner.on_pixel_event(event);
    }

    fn on_checkout_completed(&self, event: &CheckoutCompletedEvent) {
        self.inner.on_checkout_completed(event);
    }

    fn on_checkout_failed(&self, error: &CheckoutException) {
        self.inner.on_checkout_failed(error, error.is_recoverable());
    }

    fn on_checkout_canceled(&self) {
        self.inner.on_checkout_canceled();
    }

    fn on_address_change_requested(&self, event: &AddressChangeRequestedEvent) {
        self.inner.on_address_change_requested(event);
    }

    fn on_checkout_started(&self, event: &CheckoutStartEvent) {
        self.inner.on_checkout_started(event);
    }

    fn on_submit_started(&self, event: &SubmitStartEvent) {
        self.inner.on_submit_started(event);
    }

    fn on_payment_method_change_started(&self, event: &PaymentMethodChangeStartEvent) {
        self.inner.on_payment_method_change_started(event);
    }

    fn on_decoding_failed(&self, failure: &DecodingFailure) {
        self.inner.on_decoding_failed(failure);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

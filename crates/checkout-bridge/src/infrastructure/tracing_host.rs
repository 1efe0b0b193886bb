//! Log-only host implementations used by the replay binary.
//!
//! [`TracingEventProcessor`] writes each callback as a structured `tracing`
//! event and counts them; [`TracingSurface`] logs reload and tear-down
//! requests instead of driving a real web view.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use checkout_core::{
    AddressChangeRequestedEvent, CheckoutCompletedEvent, CheckoutException, CheckoutStartEvent,
    PaymentMethodChangeStartEvent, PixelEvent, SubmitStartEvent,
};
use tracing::{info, warn};

use super::session_worker::PresentationSurface;
use crate::application::processor::{DecodingFailure, EventProcessor};

/// Counts of callbacks seen by a [`TracingEventProcessor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallbackCounts {
    pub pixel_events: u64,
    pub completed: u64,
    pub failed: u64,
    pub canceled: u64,
    pub address_changes: u64,
    pub lifecycle_events: u64,
    pub decoding_failures: u64,
}

/// Event processor that logs every callback.
#[derive(Debug, Default)]
pub struct TracingEventProcessor {
    pixel_events: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
    canceled: AtomicU64,
    address_changes: AtomicU64,
    lifecycle_events: AtomicU64,
    decoding_failures: AtomicU64,
}

impl TracingEventProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> CallbackCounts {
        CallbackCounts {
            pixel_events: self.pixel_events.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            canceled: self.canceled.load(Ordering::Relaxed),
            address_changes: self.address_changes.load(Ordering::Relaxed),
            lifecycle_events: self.lifecycle_events.load(Ordering::Relaxed),
            decoding_failures: self.decoding_failures.load(Ordering::Relaxed),
        }
    }
}

impl EventProcessor for TracingEventProcessor {
    fn on_pixel_event(&self, event: &PixelEvent) {
        self.pixel_events.fetch_add(1, Ordering::Relaxed);
        info!(
            name = event.name().unwrap_or_default(),
            id = event.id().unwrap_or_default(),
            "pixel event"
        );
    }

    fn on_checkout_completed(&self, event: &CheckoutCompletedEvent) {
        self.completed.fetch_add(1, Ordering::Relaxed);
        info!(
            order_id = event.order_id(),
            legacy = event.is_legacy(),
            "checkout completed"
        );
    }

    fn on_checkout_failed(&self, error: &CheckoutException) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        warn!(
            kind = %error.kind(),
            code = error.error_code(),
            description = error.error_description(),
            recoverable = error.is_recoverable(),
            "checkout failed"
        );
    }

    fn on_checkout_canceled(&self) {
        self.canceled.fetch_add(1, Ordering::Relaxed);
        info!("checkout canceled");
    }

    fn on_address_change_requested(&self, event: &AddressChangeRequestedEvent) {
        self.address_changes.fetch_add(1, Ordering::Relaxed);
        info!(
            address_type = %event.address_type,
            id = event.id.as_deref().unwrap_or_default(),
            "address change requested"
        );
    }

    fn on_checkout_started(&self, _event: &CheckoutStartEvent) {
        self.lifecycle_events.fetch_add(1, Ordering::Relaxed);
        info!("checkout started");
    }

    fn on_submit_started(&self, event: &SubmitStartEvent) {
        self.lifecycle_events.fetch_add(1, Ordering::Relaxed);
        info!(id = event.id.as_deref().unwrap_or_default(), "checkout submitted");
    }

    fn on_payment_method_change_started(&self, event: &PaymentMethodChangeStartEvent) {
        self.lifecycle_events.fetch_add(1, Ordering::Relaxed);
        info!(
            id = event.id.as_deref().unwrap_or_default(),
            brand = event.current_card.as_ref().map(|c| c.brand.as_str()).unwrap_or_default(),
            "payment method change requested"
        );
    }

    fn on_decoding_failed(&self, failure: &DecodingFailure) {
        self.decoding_failures.fetch_add(1, Ordering::Relaxed);
        warn!(channel = %failure.channel, error = %failure.error, "message dropped");
    }
}

/// Presentation surface that only logs.
#[derive(Debug, Default)]
pub struct TracingSurface;

#[async_trait]
impl PresentationSurface for TracingSurface {
    async fn reload(&self, url: &str) {
        info!(%url, "reload requested");
    }

    async fn tear_down(&self) {
        info!("tear-down requested");
    }

    async fn post_response(&self, response: &str) {
        info!(%response, "reply posted");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

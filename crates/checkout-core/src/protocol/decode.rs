//! Channel-level decoding: picks the decoder for a [`BridgeMessage`] and runs it.
//!
//! ```text
//! BridgeMessage ──channel──▶ pixel-analytics        → decode_pixel_event      → PixelEvent
//!                            completed              → decode_completed_event  → CheckoutCompletedEvent
//!                            error                  → decode_checkout_error   → CheckoutException
//!                            addressChangeRequested → decode_address_change   → AddressChangeRequestedEvent
//!                            checkout.start         → decode_checkout_start   → CheckoutStartEvent
//!                            checkout.submitStart   → decode_submit_start     → SubmitStartEvent
//!                            checkout.paymentMethodChangeStart
//!                                 → decode_payment_method_change_start        → PaymentMethodChangeStartEvent
//!                            anything else          → DecodingError::UnsupportedChannel
//! ```
//!
//! Every decoder here is a pure function of the body string: no shared state,
//! safe to call from any thread.

use thiserror::Error;

use super::address_change::{decode_address_change, AddressChangeRequestedEvent};
use super::completed::{decode_completed_event, CheckoutCompletedEvent};
use super::error::decode_checkout_error;
use super::lifecycle::{
    decode_checkout_start, decode_payment_method_change_start, decode_submit_start,
    CheckoutStartEvent, PaymentMethodChangeStartEvent, SubmitStartEvent,
};
use super::message::{BridgeMessage, Channel};
use super::pixel::{decode_pixel_event, PixelEvent};
use crate::domain::exception::CheckoutException;

// ── Error type ────────────────────────────────────────────────────────────────

/// The body of a bridge message could not be turned into a typed value.
///
/// These never reach the host as a [`CheckoutException`]; the router reports
/// them through a diagnostic callback and drops the message.
#[derive(Debug, Error)]
pub enum DecodingError {
    /// The body is not valid JSON or does not have the expected shape.
    #[error("malformed message body: {0}")]
    Json(#[from] serde_json::Error),

    /// A pixel event whose `event.type` is absent or not recognised.
    #[error("unknown pixel event type: {}", .0.as_deref().unwrap_or("<absent>"))]
    UnknownPixelEventType(Option<String>),

    /// An error channel message carrying an empty array.
    #[error("error payload contains no descriptors")]
    EmptyErrorPayload,

    /// A completed event with neither `orderConfirmation` nor `orderDetails`.
    #[error("completed payload has neither orderConfirmation nor orderDetails")]
    UnknownCompletedSchema,

    /// No decoder exists for the channel.
    #[error("no decoder for channel '{0}'")]
    UnsupportedChannel(String),
}

// ── Decoded values ────────────────────────────────────────────────────────────

/// The typed result of decoding one bridge message.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedMessage {
    Pixel(PixelEvent),
    Completed(CheckoutCompletedEvent),
    Error(CheckoutException),
    AddressChangeRequested(AddressChangeRequestedEvent),
    CheckoutStart(CheckoutStartEvent),
    SubmitStart(SubmitStartEvent),
    PaymentMethodChangeStart(PaymentMethodChangeStartEvent),
}

impl DecodedMessage {
    /// The id the page expects echoed in a reply, for request messages that carry one.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            DecodedMessage::AddressChangeRequested(e) => e.id.as_deref(),
            DecodedMessage::SubmitStart(e) => e.id.as_deref(),
            DecodedMessage::PaymentMethodChangeStart(e) => e.id.as_deref(),
            _ => None,
        }
    }
}

/// Decodes `message` with the decoder for its channel.
///
/// # Errors
///
/// Returns the channel decoder's [`DecodingError`], or
/// [`DecodingError::UnsupportedChannel`] for unknown channels.
pub fn decode_message(message: &BridgeMessage) -> Result<DecodedMessage, DecodingError> {
    let body = message.body();
    match message.channel() {
        Channel::PixelAnalytics => decode_pixel_event(body).map(DecodedMessage::Pixel),
        Channel::Completed => decode_completed_event(body).map(DecodedMessage::Completed),
        Channel::Error => decode_checkout_error(body).map(DecodedMessage::Error),
        Channel::AddressChangeRequested => {
            decode_address_change(body).map(DecodedMessage::AddressChangeRequested)
        }
        Channel::CheckoutStart => decode_checkout_start(body).map(DecodedMessage::CheckoutStart),
        Channel::SubmitStart => decode_submit_start(body).map(DecodedMessage::SubmitStart),
        Channel::PaymentMethodChangeStart => {
            decode_payment_method_change_start(body).map(DecodedMessage::PaymentMethodChangeStart)
        }
        Channel::Unknown(name) => Err(DecodingError::UnsupportedChannel(name)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

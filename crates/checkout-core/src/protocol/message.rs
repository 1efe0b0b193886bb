//! The raw bridge message and the channel names it can arrive on.
//!
//! The embedded checkout page talks to the host by posting small JSON
//! envelopes.  Each envelope names a *channel* and carries a *body*, which is
//! itself a JSON document serialised into a string:
//!
//! ```json
//! {"name":"error","body":"[{\"group\":\"expired\",\"reason\":\"...\",\"code\":\"cart_completed\"}]"}
//! ```
//!
//! [`BridgeMessage`] is the value the transport boundary hands to the router.
//! It performs no parsing of its own; the body stays a raw string until a
//! decoder for the channel looks at it.

use std::fmt;

// ── Channel ───────────────────────────────────────────────────────────────────

/// Wire name of the pixel analytics channel.
pub const PIXEL_ANALYTICS: &str = "pixel-analytics";
/// Older wire name of the pixel analytics channel, still sent by some pages.
pub const WEB_PIXELS: &str = "webPixels";
/// Wire name of the checkout completed channel.
pub const COMPLETED: &str = "completed";
/// Wire name of the error channel.
pub const ERROR: &str = "error";
/// Wire name of the address change request channel.
pub const ADDRESS_CHANGE_REQUESTED: &str = "addressChangeRequested";
/// Wire name of the notification sent once the page has loaded checkout.
pub const CHECKOUT_START: &str = "checkout.start";
/// Wire name of the request sent when the buyer submits checkout.
pub const SUBMIT_START: &str = "checkout.submitStart";
/// Wire name of the request sent when the buyer wants to change payment method.
pub const PAYMENT_METHOD_CHANGE_START: &str = "checkout.paymentMethodChangeStart";

/// The set of channels the host understands.
///
/// Anything else is kept as [`Channel::Unknown`] so newer pages can add
/// channels without breaking older hosts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Analytics ("web pixel") events, standard or custom.
    PixelAnalytics,
    /// The buyer finished checkout.
    Completed,
    /// The page reported one or more failures.
    Error,
    /// The buyer asked to pick a different address.
    AddressChangeRequested,
    /// Checkout has loaded and shows the buyer's cart.
    CheckoutStart,
    /// The buyer pressed the pay button.
    SubmitStart,
    /// The buyer asked to pick a different payment method.
    PaymentMethodChangeStart,
    /// A channel this version of the host does not know.
    Unknown(String),
}

impl Channel {
    /// Maps a wire channel name to a [`Channel`].
    pub fn from_name(name: &str) -> Self {
        match name {
            PIXEL_ANALYTICS | WEB_PIXELS => Channel::PixelAnalytics,
            COMPLETED => Channel::Completed,
            ERROR => Channel::Error,
            ADDRESS_CHANGE_REQUESTED => Channel::AddressChangeRequested,
            CHECKOUT_START => Channel::CheckoutStart,
            SUBMIT_START => Channel::SubmitStart,
            PAYMENT_METHOD_CHANGE_START => Channel::PaymentMethodChangeStart,
            other => Channel::Unknown(other.to_string()),
        }
    }

    /// Returns the canonical wire name for this channel.
    pub fn as_str(&self) -> &str {
        match self {
            Channel::PixelAnalytics => PIXEL_ANALYTICS,
            Channel::Completed => COMPLETED,
            Channel::Error => ERROR,
            Channel::AddressChangeRequested => ADDRESS_CHANGE_REQUESTED,
            Channel::CheckoutStart => CHECKOUT_START,
            Channel::SubmitStart => SUBMIT_START,
            Channel::PaymentMethodChangeStart => PAYMENT_METHOD_CHANGE_START,
            Channel::Unknown(name) => name,
        }
    }

    /// `true` for every channel except [`Channel::Unknown`].
    pub fn is_known(&self) -> bool {
        !matches!(self, Channel::Unknown(_))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── BridgeMessage ─────────────────────────────────────────────────────────────

/// One message posted by the embedded page: a channel name and a raw JSON body.
///
/// Immutable once built.  The router consumes each message exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeMessage {
    channel: String,
    body: String,
}

impl BridgeMessage {
    /// Creates a message from a channel name and its raw JSON body.
    pub fn new(channel: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            body: body.into(),
        }
    }

    /// The channel name exactly as it arrived on the wire.
    pub fn channel_name(&self) -> &str {
        &self.channel
    }

    /// The parsed channel.
    pub fn channel(&self) -> Channel {
        Channel::from_name(&self.channel)
    }

    /// The raw JSON body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consumes the message, returning `(channel name, body)`.
    pub fn into_parts(self) -> (String, String) {
        (self.channel, self.body)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

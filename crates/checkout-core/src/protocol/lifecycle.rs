//! Checkout lifecycle messages.
//!
//! The page announces when checkout has loaded, when the buyer submits it, and
//! when the buyer wants a different payment method.  The last two are
//! requests: they carry an `id` the host echoes in its reply.
//!
//! Cart and checkout snapshots are passed through as raw JSON.  Their shape
//! follows the storefront API and changes more often than the host cares about.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::decode::DecodingError;

/// Checkout has loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutStartEvent {
    #[serde(default)]
    pub cart: Value,
}

/// The buyer submitted checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitStartEvent {
    /// Request id to echo in the reply.  Absent when the page expects none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub cart: Value,
    #[serde(default)]
    pub checkout: Value,
}

/// The buyer wants to change payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodChangeStartEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The card currently selected, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_card: Option<CurrentCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentCard {
    pub last4: String,
    pub brand: String,
}

pub fn decode_checkout_start(body: &str) -> Result<CheckoutStartEvent, DecodingError> {
    Ok(serde_json::from_str(body)?)
}

pub fn decode_submit_start(body: &str) -> Result<SubmitStartEvent, DecodingError> {
    Ok(serde_json::from_str(body)?)
}

pub fn decode_payment_method_change_start(
    body: &str,
) -> Result<PaymentMethodChangeStartEvent, DecodingError> {
    Ok(serde_json::from_str(body)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

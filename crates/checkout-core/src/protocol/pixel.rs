//! Analytics ("web pixel") events.
//!
//! The page wraps every analytics event in a small envelope:
//!
//! ```json
//! {
//!   "name": "checkout_started",
//!   "event": {
//!     "type": "standard",
//!     "id": "sh-1",
//!     "name": "checkout_started",
//!     "timestamp": "2023-12-20T16:39:23+0000",
//!     "data": { "checkout": { "order": { "id": "123" } } }
//!   }
//! }
//! ```
//!
//! # Decoding order
//!
//! [`decode_pixel_event`] looks at `event.type` *before* touching anything
//! else.  Only once the variant is known does it decode the variant's fields.
//! This keeps one bad or unfamiliar sub-field from hiding the fields that are
//! fine: every field below is optional and absent data decodes as `None`.
//!
//! An absent or unrecognised `type` is a [`DecodingError`], never a guess.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::decode::DecodingError;
use super::money::MoneyV2;

/// Discriminator value for [`PixelEvent::Standard`].
pub const STANDARD: &str = "standard";
/// Discriminator value for [`PixelEvent::Custom`].
pub const CUSTOM: &str = "custom";

// ── Event variants ────────────────────────────────────────────────────────────

/// A decoded analytics event.
///
/// Serialises back to the `event` object shape, `type` field included.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PixelEvent {
    Standard(StandardPixelEvent),
    Custom(CustomPixelEvent),
}

impl PixelEvent {
    pub fn id(&self) -> Option<&str> {
        match self {
            PixelEvent::Standard(e) => e.id.as_deref(),
            PixelEvent::Custom(e) => e.id.as_deref(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            PixelEvent::Standard(e) => e.name.as_deref(),
            PixelEvent::Custom(e) => e.name.as_deref(),
        }
    }

    pub fn timestamp(&self) -> Option<&str> {
        match self {
            PixelEvent::Standard(e) => e.timestamp.as_deref(),
            PixelEvent::Custom(e) => e.timestamp.as_deref(),
        }
    }
}

/// One of the platform-defined analytics events (`page_viewed`,
/// `checkout_started`, `checkout_completed`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardPixelEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Passed through exactly as sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<StandardPixelEventData>,
}

/// A merchant-defined analytics event with an arbitrary payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPixelEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    /// The merchant's payload, untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<Value>,
}

impl CustomPixelEvent {
    /// The custom payload re-serialised as a JSON string.
    pub fn custom_data_string(&self) -> Option<String> {
        self.custom_data.as_ref().map(Value::to_string)
    }

    /// Decodes the custom payload into a host-defined type.
    ///
    /// Returns `Ok(None)` when the event carried no payload.
    pub fn custom_data_as<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        self.custom_data
            .clone()
            .map(serde_json::from_value)
            .transpose()
    }
}

// ── Standard event data ───────────────────────────────────────────────────────

/// The known sub-tree of a standard event.  Which member is populated depends
/// on the event name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardPixelEventData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout: Option<Checkout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_variant: Option<ProductVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_line: Option<CartLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_result: Option<SearchResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Attribute>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<MailingAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_applications: Option<Vec<DiscountApplication>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<CheckoutLineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<MailingAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_line: Option<ShippingRate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal_price: Option<MoneyV2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<MoneyV2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tax: Option<MoneyV2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailingAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// A discount applied to the checkout.
///
/// `allocationMethod`, `targetSelection` and `targetType` are kept as strings;
/// new values appear on the wire faster than hosts upgrade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountApplication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_selection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<DiscountValue>,
}

/// Either a fixed amount or a percentage; whichever fields are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountValue {
    #[serde(
        default,
        deserialize_with = "super::money::optional_amount::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_allocations: Option<Vec<DiscountAllocation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<ProductVariant>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountAllocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<MoneyV2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_application: Option<DiscountApplication>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingRate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<MoneyV2>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<MoneyV2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<MoneyV2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub untranslated_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub untranslated_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<CartLineCost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchandise: Option<ProductVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineCost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<MoneyV2>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_variants: Option<Vec<ProductVariant>>,
}

// ── Browser context ───────────────────────────────────────────────────────────

/// Snapshot of the browser at the time the event fired.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigator: Option<Navigator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<Window>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_x_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_y_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<Screen>,
    #[serde(default, rename = "screenX", skip_serializing_if = "Option::is_none")]
    pub screen_x: Option<f64>,
    #[serde(default, rename = "screenY", skip_serializing_if = "Option::is_none")]
    pub screen_y: Option<f64>,
    #[serde(default, rename = "scrollX", skip_serializing_if = "Option::is_none")]
    pub scroll_x: Option<f64>,
    #[serde(default, rename = "scrollY", skip_serializing_if = "Option::is_none")]
    pub scroll_y: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

// ── Decoding ──────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PixelEnvelope {
    #[serde(default)]
    name: Option<String>,
    event: Value,
}

/// Decodes a pixel channel body into a [`PixelEvent`].
///
/// When the inner event omits `name`, the envelope's `name` is used.
///
/// # Errors
///
/// - [`DecodingError::Json`] if the body is not JSON, has no `event` object,
///   or a present field has the wrong shape.
/// - [`DecodingError::UnknownPixelEventType`] if `event.type` is absent or is
///   neither `"standard"` nor `"custom"`.
pub fn decode_pixel_event(body: &str) -> Result<PixelEvent, DecodingError> {
    let envelope: PixelEnvelope = serde_json::from_str(body)?;

    // Discriminator first; nothing else is looked at until the variant is known.
    let event_type = envelope
        .event
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_owned);

    let event = match event_type.as_deref() {
        Some(STANDARD) => {
            let mut e: StandardPixelEvent = serde_json::from_value(envelope.event)?;
            if e.name.is_none() {
                e.name = envelope.name;
            }
            PixelEvent::Standard(e)
        }
        Some(CUSTOM) => {
            let mut e: CustomPixelEvent = serde_json::from_value(envelope.event)?;
            if e.name.is_none() {
                e.name = envelope.name;
            }
            PixelEvent::Custom(e)
        }
        _ => return Err(DecodingError::UnknownPixelEventType(event_type)),
    };

    Ok(event)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKOUT_STARTED: &str = r#"{"name":"checkout_started","event":{"type":"standard","id":"sh-1","name":"checkout_started","timestamp":"2023-12-20T16:39:23+0000","data":{"checkout":{"order":{"id":"123"}}}}}"#;

    #[test]
    fn test_standard_event_exposes_order_id() {
        // Act
        let event = decode_pixel_event(CHECKOUT_STARTED).unwrap();

        // Assert
        match event {
            PixelEvent::Standard(e) => {
                assert_eq!(e.id.as_deref(), Some("sh-1"));
                assert_eq!(e.name.as_deref(), Some("checkout_started"));
                assert_eq!(e.timestamp.as_deref(), Some("2023-12-20T16:39:23+0000"));
                let order_id = e
                    .data
                    .and_then(|d| d.checkout)
                    .and_then(|c| c.order)
                    .and_then(|o| o.id);
                assert_eq!(order_id.as_deref(), Some("123"));
            }
            other => panic!("expected Standard, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_type_is_decoding_error() {
        let body = r#"{"name":"page_viewed","event":{"id":"sh-2"}}"#;
        let err = decode_pixel_event(body).unwrap_err();
        assert!(matches!(err, DecodingError::UnknownPixelEventType(None)));
    }

    #[test]
    fn test_unrecognised_type_is_decoding_error() {
        let body = r#"{"name":"clicked","event":{"type":"dom","id":"sh-3"}}"#;
        let err = decode_pixel_event(body).unwrap_err();
        match err {
            DecodingError::UnknownPixelEventType(Some(t)) => assert_eq!(t, "dom"),
            other => panic!("expected UnknownPixelEventType, got {:?}", other),
        }
    }

    #[test]
    fn test_non_string_type_is_decoding_error() {
        let body = r#"{"name":"x","event":{"type":1}}"#;
        assert!(matches!(
            decode_pixel_event(body),
            Err(DecodingError::UnknownPixelEventType(None))
        ));
    }

    #[test]
    fn test_missing_event_object_is_json_error() {
        let err = decode_pixel_event(r#"{"name":"page_viewed"}"#).unwrap_err();
        assert!(matches!(err, DecodingError::Json(_)));
    }

    #[test]
    fn test_custom_event_keeps_payload() {
        // Arrange
        let body = r#"{"name":"my_event","event":{"type":"custom","id":"sh-4","timestamp":"t","customData":{"wishlist":["a","b"],"count":2}}}"#;

        // Act
        let event = decode_pixel_event(body).unwrap();

        // Assert
        let PixelEvent::Custom(e) = event else {
            panic!("expected Custom");
        };
        assert_eq!(e.name.as_deref(), Some("my_event"), "envelope name fills the gap");
        let raw = e.custom_data_string().unwrap();
        assert_eq!(raw, r#"{"count":2,"wishlist":["a","b"]}"#);

        #[derive(Deserialize)]
        struct Wishlist {
            wishlist: Vec<String>,
        }
        let typed: Wishlist = e.custom_data_as().unwrap().unwrap();
        assert_eq!(typed.wishlist, vec!["a", "b"]);
    }

    #[test]
    fn test_custom_event_without_payload() {
        let body = r#"{"name":"n","event":{"type":"custom"}}"#;
        let PixelEvent::Custom(e) = decode_pixel_event(body).unwrap() else {
            panic!("expected Custom");
        };
        assert!(e.custom_data_string().is_none());
        assert!(e.custom_data_as::<Value>().unwrap().is_none());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let body = r#"{"name":"page_viewed","extra":1,"event":{"type":"standard","id":"sh-5","brandNew":{"x":1},"data":{"somethingElse":true}}}"#;
        let event = decode_pixel_event(body).unwrap();
        assert_eq!(event.id(), Some("sh-5"));
    }

    #[test]
    fn test_context_is_decoded() {
        let body = r#"{"name":"page_viewed","event":{"type":"standard","context":{"navigator":{"language":"en-GB","cookieEnabled":true},"window":{"innerWidth":390,"screenX":0}}}}"#;
        let PixelEvent::Standard(e) = decode_pixel_event(body).unwrap() else {
            panic!("expected Standard");
        };
        let ctx = e.context.unwrap();
        let nav = ctx.navigator.unwrap();
        assert_eq!(nav.language.as_deref(), Some("en-GB"));
        assert_eq!(nav.cookie_enabled, Some(true));
        let window = ctx.window.unwrap();
        assert_eq!(window.inner_width, Some(390.0));
        assert_eq!(window.screen_x, Some(0.0));
        assert!(ctx.document.is_none());
    }

    #[test]
    fn test_reserialised_event_keeps_known_fields() {
        // Arrange
        let event = decode_pixel_event(CHECKOUT_STARTED).unwrap();

        // Act
        let value = serde_json::to_value(&event).unwrap();

        // Assert
        assert_eq!(value["type"], "standard");
        assert_eq!(value["id"], "sh-1");
        assert_eq!(value["name"], "checkout_started");
        assert_eq!(value["timestamp"], "2023-12-20T16:39:23+0000");
        assert_eq!(value["data"]["checkout"]["order"]["id"], "123");
        assert!(value.get("context").is_none(), "absent fields stay absent");
    }
}

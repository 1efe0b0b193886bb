//! Integration tests for bridge message decoding.
//!
//! These tests drive the public `decode_message` entry point with complete
//! bodies as the checkout page sends them, and check the typed results the
//! host sees.

use checkout_core::protocol::completed::CheckoutCompletedEvent;
use checkout_core::protocol::pixel::PixelEvent;
use checkout_core::{decode_message, BridgeMessage, DecodedMessage, DecodingError, ExceptionKind};

fn decode(channel: &str, body: &str) -> Result<DecodedMessage, DecodingError> {
    decode_message(&BridgeMessage::new(channel, body))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_checkout_started_pixel_scenario() {
    // Arrange
    let body = r#"{"name":"checkout_started","event":{"type":"standard","id":"sh-1","name":"checkout_started","timestamp":"2023-12-20T16:39:23+0000","data":{"checkout":{"order":{"id":"123"}}}}}"#;

    // Act
    let decoded = decode("pixel-analytics", body).expect("pixel must decode");

    // Assert
    let DecodedMessage::Pixel(PixelEvent::Standard(event)) = decoded else {
        panic!("expected a standard pixel event");
    };
    let order_id = event
        .data
        .as_ref()
        .and_then(|d| d.checkout.as_ref())
        .and_then(|c| c.order.as_ref())
        .and_then(|o| o.id.as_deref());
    assert_eq!(order_id, Some("123"));
}

#[test]
fn test_standard_pixel_reserialises_known_fields() {
    // Arrange: a fuller standard event with money, line items and context.
    let body = r#"{
        "name": "checkout_completed",
        "event": {
            "type": "standard",
            "id": "sh-88153c5a-8F2D-4CCA-3231-EF5C032A4C3B",
            "name": "checkout_completed",
            "timestamp": "2023-12-20T16:39:23+0000",
            "context": {"document": {"title": "Checkout", "location": {"href": "https://shop.example/checkouts/1"}}},
            "data": {
                "checkout": {
                    "currencyCode": "GBP",
                    "email": "a.user@shopify.com",
                    "order": {"id": "123"},
                    "totalPrice": {"amount": 13.99, "currencyCode": "GBP"},
                    "lineItems": [{"id": "li-1", "title": "The Box"}]
                }
            }
        }
    }"#;

    // Act
    let DecodedMessage::Pixel(event) = decode("pixel-analytics", body).unwrap() else {
        panic!("expected pixel");
    };
    let value = serde_json::to_value(&event).unwrap();

    // Assert
    let original: serde_json::Value = serde_json::from_str(body).unwrap();
    let original_event = &original["event"];
    for key in ["type", "id", "name", "timestamp", "context", "data"] {
        assert_eq!(value[key], original_event[key], "field {key} must survive re-serialisation");
    }
}

#[test]
fn test_pixel_without_type_never_defaults_to_a_variant() {
    for body in [
        r#"{"name":"page_viewed","event":{"id":"1"}}"#,
        r#"{"name":"page_viewed","event":{"type":"","id":"1"}}"#,
        r#"{"name":"page_viewed","event":{"type":"STANDARD","id":"1"}}"#,
    ] {
        let result = decode("pixel-analytics", body);
        assert!(
            matches!(result, Err(DecodingError::UnknownPixelEventType(_))),
            "body {body} must fail, got {:?}",
            result
        );
    }
}

#[test]
fn test_expired_error_scenario() {
    // Act
    let decoded = decode(
        "error",
        r#"[{"group":"expired","reason":"Checkout has expired","code":"cart_completed"}]"#,
    )
    .unwrap();

    // Assert
    let DecodedMessage::Error(e) = decoded else {
        panic!("expected error");
    };
    assert_eq!(e.kind(), ExceptionKind::Expired);
    assert_eq!(e.error_code(), "cart_completed");
    assert_eq!(e.error_description(), "Checkout has expired");
    assert!(!e.is_recoverable());
}

#[test]
fn test_empty_error_array_is_decoding_error() {
    assert!(matches!(decode("error", "[]"), Err(DecodingError::EmptyErrorPayload)));
}

#[test]
fn test_legacy_completed_scenario() {
    // Arrange
    let body = r#"{
        "orderDetails": {
            "id": "gid://shopify/OrderIdentity/9697125302294",
            "cart": {
                "token": "123",
                "lines": [{"title": "The Box", "quantity": 1, "price": {"amount": 8, "currencyCode": "GBP"}}],
                "price": {}
            }
        }
    }"#;

    // Act
    let DecodedMessage::Completed(event) = decode("completed", body).unwrap() else {
        panic!("expected completed");
    };

    // Assert
    assert_eq!(event.order_id(), "gid://shopify/OrderIdentity/9697125302294");
    let CheckoutCompletedEvent::Legacy(legacy) = &event else {
        panic!("expected legacy schema");
    };
    assert_eq!(legacy.order_details.cart.lines[0].price.amount, Some(8.0));
    assert!(legacy.order_details.cart.price.total.is_none());
    assert!(legacy.order_details.shipping_address.is_none());
}

#[test]
fn test_amount_forms_normalise_across_completed_event() {
    let amounts = ["8", "8.0", r#""8.00""#];
    let decoded: Vec<Option<f64>> = amounts
        .iter()
        .map(|amount| {
            let body = format!(
                r#"{{"orderDetails":{{"id":"o","cart":{{"lines":[{{"title":"t","quantity":1,"price":{{"amount":{amount},"currencyCode":"GBP"}}}}]}}}}}}"#
            );
            match decode("completed", &body).unwrap() {
                DecodedMessage::Completed(CheckoutCompletedEvent::Legacy(l)) => {
                    l.order_details.cart.lines[0].price.amount
                }
                other => panic!("expected legacy completed, got {:?}", other),
            }
        })
        .collect();

    assert_eq!(decoded, vec![Some(8.0), Some(8.0), Some(8.0)]);
}

#[test]
fn test_unsupported_channel_reports_its_name() {
    match decode("checkoutBlockingEvent", "{}") {
        Err(DecodingError::UnsupportedChannel(name)) => assert_eq!(name, "checkoutBlockingEvent"),
        other => panic!("expected UnsupportedChannel, got {:?}", other),
    }
}

//! Checkout completed events.
//!
//! Two generations of the payload are in circulation and there is no
//! discriminator field to tell them apart.  The generation is chosen by which
//! top-level key is present:
//!
//! ```text
//! { "orderConfirmation": {...}, "cart": {...} }  →  Current   (checked first)
//! { "orderDetails": {...} }                      →  Legacy
//! anything else                                  →  DecodingError::UnknownCompletedSchema
//! ```
//!
//! The current generation supersedes the legacy one, so a body carrying both
//! keys decodes as [`CheckoutCompletedEvent::Current`].

pub mod current;
pub mod legacy;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::decode::DecodingError;

pub use current::CurrentCompletedEvent;
pub use legacy::LegacyCompletedEvent;

const ORDER_CONFIRMATION_KEY: &str = "orderConfirmation";
const ORDER_DETAILS_KEY: &str = "orderDetails";

/// A decoded checkout completed event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CheckoutCompletedEvent {
    Legacy(LegacyCompletedEvent),
    Current(CurrentCompletedEvent),
}

impl CheckoutCompletedEvent {
    /// The order identifier, whichever generation carried it.
    pub fn order_id(&self) -> &str {
        match self {
            CheckoutCompletedEvent::Legacy(e) => &e.order_details.id,
            CheckoutCompletedEvent::Current(e) => &e.order_confirmation.order.id,
        }
    }

    /// The buyer's email address, if the page sent one.
    pub fn email(&self) -> Option<&str> {
        match self {
            CheckoutCompletedEvent::Legacy(e) => e.order_details.email.as_deref(),
            CheckoutCompletedEvent::Current(e) => e.cart.buyer_identity.email.as_deref(),
        }
    }

    /// Number of cart lines in the completed order.
    pub fn line_count(&self) -> usize {
        match self {
            CheckoutCompletedEvent::Legacy(e) => e.order_details.cart.lines.len(),
            CheckoutCompletedEvent::Current(e) => e.cart.lines.len(),
        }
    }

    /// Order total amount, if known.
    pub fn total_amount(&self) -> Option<f64> {
        match self {
            CheckoutCompletedEvent::Legacy(e) => e
                .order_details
                .cart
                .price
                .total
                .as_ref()
                .and_then(|m| m.amount),
            CheckoutCompletedEvent::Current(e) => Some(e.cart.cost.total_amount.amount),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, CheckoutCompletedEvent::Legacy(_))
    }
}

/// Decodes a completed channel body.
///
/// # Errors
///
/// - [`DecodingError::Json`] if the body is not a JSON object or the selected
///   generation is missing required fields.
/// - [`DecodingError::UnknownCompletedSchema`] if neither generation's root
///   key is present.
pub fn decode_completed_event(body: &str) -> Result<CheckoutCompletedEvent, DecodingError> {
    let value: Value = serde_json::from_str(body)?;
    let is_object_with = |key: &str| value.get(key).is_some_and(|v| !v.is_null());

    if is_object_with(ORDER_CONFIRMATION_KEY) {
        debug!("decoding current-generation completed event");
        let event: CurrentCompletedEvent = serde_json::from_value(value)?;
        Ok(CheckoutCompletedEvent::Current(event))
    } else if is_object_with(ORDER_DETAILS_KEY) {
        debug!("decoding legacy completed event");
        let event: LegacyCompletedEvent = serde_json::from_value(value)?;
        Ok(CheckoutCompletedEvent::Legacy(event))
    } else {
        Err(DecodingError::UnknownCompletedSchema)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::current::DiscountValue;
    use super::*;

    const LEGACY: &str = r#"{
      "flowType": "regular",
      "orderDetails": {
        "id": "gid://shopify/OrderIdentity/9697125302294",
        "cart": {
          "token": "123",
          "lines": [{
            "image": {"sm": "s.jpg", "md": "m.jpg", "lg": "l.jpg"},
            "quantity": 1,
            "title": "The Box",
            "price": {"amount": 8, "currencyCode": "GBP"},
            "merchandiseId": "gid://shopify/ProductVariant/43835075002390",
            "productId": "gid://shopify/Product/8013997834262"
          }],
          "price": {
            "total": {"amount": 13.99, "currencyCode": "GBP"},
            "subtotal": {"amount": 8, "currencyCode": "GBP"},
            "taxes": {"amount": 0, "currencyCode": "GBP"},
            "shipping": {"amount": 5.99, "currencyCode": "GBP"}
          }
        },
        "email": "a.user@shopify.com",
        "shippingAddress": {
          "city": "Swansea", "countryCode": "GB", "postalCode": "SA1 1AB",
          "address1": "100 Street Avenue", "firstName": "Andrew", "lastName": "Person",
          "name": "Andrew", "zoneCode": "WLS", "phone": "+447915123456",
          "coordinates": {"latitude": 54.5936785, "longitude": -3.013167399999999}
        },
        "billingAddress": {
          "city": "Swansea", "countryCode": "GB", "postalCode": "SA1 1AB",
          "address1": "100 Street Avenue", "firstName": "Andrew", "lastName": "Person",
          "zoneCode": "WLS", "phone": "+447915123456"
        },
        "paymentMethods": [
          {"type": "wallet", "details": {"amount": "13.99", "currency": "GBP", "name": "SHOP_PAY"}}
        ],
        "deliveries": [
          {"method": "SHIPPING", "details": {"location": {"city": "Swansea", "countryCode": "GB"}}}
        ]
      },
      "orderId": "gid://shopify/OrderIdentity/9697125302294"
    }"#;

    const CURRENT: &str = r#"{
      "orderConfirmation": {
        "url": null,
        "order": {"id": "order-123"},
        "number": "1001",
        "isFirstOrder": true
      },
      "cart": {
        "id": "cart-456",
        "lines": [{
          "id": "line-1",
          "quantity": 2,
          "merchandise": {
            "id": "gid://shopify/ProductVariant/1",
            "title": "Mug",
            "product": {"id": "gid://shopify/Product/1", "title": "Mug"},
            "selectedOptions": [{"name": "Colour", "value": "Blue"}]
          },
          "cost": {
            "amountPerQuantity": {"amount": "50.00", "currencyCode": "USD"},
            "subtotalAmount": {"amount": "100.00", "currencyCode": "USD"},
            "totalAmount": {"amount": "100.00", "currencyCode": "USD"}
          }
        }],
        "cost": {
          "subtotalAmount": {"amount": "100.00", "currencyCode": "USD"},
          "totalAmount": {"amount": "90.00", "currencyCode": "USD"}
        },
        "buyerIdentity": {"email": "test@example.com", "phone": null, "countryCode": "US"},
        "deliveryGroups": [],
        "discountCodes": [{"code": "SAVE10", "applicable": true}],
        "appliedGiftCards": [],
        "discountAllocations": [{
          "discountedAmount": {"amount": "10.00", "currencyCode": "USD"},
          "discountApplication": {
            "allocationMethod": "ACROSS",
            "targetSelection": "ALL",
            "targetType": "LINE_ITEM",
            "value": {"percentage": 10.0}
          },
          "targetType": "LINE_ITEM"
        }],
        "delivery": {"addresses": [{"address": {"city": "Ottawa", "countryCode": "CA"}}]}
      }
    }"#;

    #[test]
    fn test_legacy_event_order_id_and_line_price() {
        // Act
        let event = decode_completed_event(LEGACY).unwrap();

        // Assert
        assert!(event.is_legacy());
        assert_eq!(event.order_id(), "gid://shopify/OrderIdentity/9697125302294");
        let CheckoutCompletedEvent::Legacy(legacy) = &event else {
            panic!("expected Legacy");
        };
        assert_eq!(legacy.order_details.cart.lines[0].price.amount, Some(8.0));
        assert_eq!(legacy.flow_type.as_deref(), Some("regular"));
    }

    #[test]
    fn test_legacy_event_price_breakdown() {
        let event = decode_completed_event(LEGACY).unwrap();
        let CheckoutCompletedEvent::Legacy(legacy) = event else {
            panic!("expected Legacy");
        };
        let price = legacy.order_details.cart.price;
        assert_eq!(price.total.unwrap().amount, Some(13.99));
        assert_eq!(price.taxes.unwrap().amount, Some(0.0));
        assert_eq!(price.shipping.unwrap().amount, Some(5.99));
        assert!(price.discounts.is_empty());
    }

    #[test]
    fn test_legacy_coordinates_present_only_where_sent() {
        let event = decode_completed_event(LEGACY).unwrap();
        let CheckoutCompletedEvent::Legacy(legacy) = event else {
            panic!("expected Legacy");
        };
        let shipping = legacy.order_details.shipping_address.unwrap();
        let coords = shipping.coordinates.unwrap();
        assert_eq!(coords.latitude, 54.5936785);
        let billing = legacy.order_details.billing_address.unwrap();
        assert!(billing.coordinates.is_none(), "absent coordinates must be None, not (0, 0)");
        assert_eq!(billing.zone_code.as_deref(), Some("WLS"));
    }

    #[test]
    fn test_legacy_image_alt_text_absent() {
        let event = decode_completed_event(LEGACY).unwrap();
        let CheckoutCompletedEvent::Legacy(legacy) = event else {
            panic!("expected Legacy");
        };
        let image = legacy.order_details.cart.lines[0].image.clone().unwrap();
        assert_eq!(image.sm, "s.jpg");
        assert!(image.alt_text.is_none());
    }

    #[test]
    fn test_legacy_payment_and_delivery_descriptors() {
        let event = decode_completed_event(LEGACY).unwrap();
        let CheckoutCompletedEvent::Legacy(legacy) = event else {
            panic!("expected Legacy");
        };
        let payment = &legacy.order_details.payment_methods[0];
        assert_eq!(payment.method_type, "wallet");
        assert_eq!(payment.detail("name"), Some("SHOP_PAY"));
        let delivery = &legacy.order_details.deliveries[0];
        assert_eq!(delivery.method, "SHIPPING");
        assert_eq!(
            delivery.details.location.as_ref().and_then(|l| l.city.as_deref()),
            Some("Swansea")
        );
    }

    #[test]
    fn test_current_event_decodes_cart() {
        // Act
        let event = decode_completed_event(CURRENT).unwrap();

        // Assert
        assert!(!event.is_legacy());
        assert_eq!(event.order_id(), "order-123");
        assert_eq!(event.email(), Some("test@example.com"));
        assert_eq!(event.line_count(), 1);
        assert_eq!(event.total_amount(), Some(90.0));

        let CheckoutCompletedEvent::Current(current) = event else {
            panic!("expected Current");
        };
        assert!(current.order_confirmation.url.is_none());
        assert!(current.order_confirmation.is_first_order);
        let line = &current.cart.lines[0];
        assert_eq!(line.cost.amount_per_quantity.amount, 50.0);
        assert!(line.merchandise.image.is_none());
        assert_eq!(current.cart.delivery.addresses[0].address.city.as_deref(), Some("Ottawa"));
    }

    #[test]
    fn test_current_discount_value_selected_by_keys() {
        let event = decode_completed_event(CURRENT).unwrap();
        let CheckoutCompletedEvent::Current(current) = event else {
            panic!("expected Current");
        };
        let value = &current.cart.discount_allocations[0].discount_application.value;
        assert_eq!(*value, DiscountValue::Percentage(current::PercentageValue { percentage: 10.0 }));
    }

    #[test]
    fn test_discount_value_money_form() {
        let value: DiscountValue =
            serde_json::from_str(r#"{"amount":"5.00","currencyCode":"EUR"}"#).unwrap();
        match value {
            DiscountValue::Money(m) => assert_eq!(m.amount, 5.0),
            other => panic!("expected Money, got {:?}", other),
        }
    }

    #[test]
    fn test_discount_value_without_known_keys_fails() {
        assert!(serde_json::from_str::<DiscountValue>(r#"{"fixed":1}"#).is_err());
    }

    #[test]
    fn test_order_confirmation_wins_over_order_details() {
        // Arrange: a body carrying both roots.
        let mut value: Value = serde_json::from_str(CURRENT).unwrap();
        let legacy: Value = serde_json::from_str(LEGACY).unwrap();
        value["orderDetails"] = legacy["orderDetails"].clone();

        // Act
        let event = decode_completed_event(&value.to_string()).unwrap();

        // Assert
        assert_eq!(event.order_id(), "order-123");
    }

    #[test]
    fn test_neither_root_key_is_unknown_schema() {
        let err = decode_completed_event(r#"{"orderId":"1","cart":{}}"#).unwrap_err();
        assert!(matches!(err, DecodingError::UnknownCompletedSchema));
    }

    #[test]
    fn test_invalid_decimal_amount_fails_current_event() {
        let broken = CURRENT.replace(r#""amount": "90.00""#, r#""amount": "ninety""#);
        let err = decode_completed_event(&broken).unwrap_err();
        assert!(matches!(err, DecodingError::Json(_)));
    }
}

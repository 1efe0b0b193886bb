//! Error channel payloads and their classification.
//!
//! The page reports failures as an array of descriptors:
//!
//! ```json
//! [{"group": "expired", "reason": "Checkout has expired", "code": "cart_completed"}]
//! ```
//!
//! Only the first descriptor is turned into a [`CheckoutException`]; the page
//! has so far only ever sent one.  [`decode_error_descriptors`] returns the
//! whole array for callers that want to log the rest.
//!
//! # Classification table
//!
//! | `group`          | Kind             |
//! |------------------|------------------|
//! | `expired`        | `Expired`        |
//! | `unrecoverable`  | `Client`         |
//! | `checkout`       | `Client`         |
//! | `invalid`        | `Client`         |
//! | `configuration`  | `Configuration`  |
//! | `authentication` | `Authentication` |
//! | anything else    | `Internal`       |
//!
//! The table is total: every group, known or not, maps to exactly one kind.

use serde::{Deserialize, Serialize};

use super::decode::DecodingError;
use crate::domain::exception::{CheckoutException, ExceptionKind};

/// One entry of an error channel payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescriptor {
    pub group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_type: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl ErrorDescriptor {
    /// Builds the typed exception for this descriptor.
    pub fn to_exception(&self) -> CheckoutException {
        CheckoutException::new(
            classify_group(&self.group),
            self.code.as_deref().unwrap_or_default(),
            self.reason.as_deref().unwrap_or_default(),
        )
    }
}

/// Maps an error `group` to its exception kind.
pub fn classify_group(group: &str) -> ExceptionKind {
    match group {
        "expired" => ExceptionKind::Expired,
        "unrecoverable" | "checkout" | "invalid" => ExceptionKind::Client,
        "configuration" => ExceptionKind::Configuration,
        "authentication" => ExceptionKind::Authentication,
        _ => ExceptionKind::Internal,
    }
}

/// Parses an error channel body into its descriptors.
///
/// # Errors
///
/// - [`DecodingError::Json`] if the body is not an array of descriptors.
/// - [`DecodingError::EmptyErrorPayload`] if the array is empty.
pub fn decode_error_descriptors(body: &str) -> Result<Vec<ErrorDescriptor>, DecodingError> {
    let descriptors: Vec<ErrorDescriptor> = serde_json::from_str(body)?;
    if descriptors.is_empty() {
        return Err(DecodingError::EmptyErrorPayload);
    }
    Ok(descriptors)
}

/// Decodes an error channel body into the exception for its first descriptor.
///
/// Pure: identical input always yields an identical exception.
///
/// # Errors
///
/// See [`decode_error_descriptors`].
pub fn decode_checkout_error(body: &str) -> Result<CheckoutException, DecodingError> {
    let descriptors = decode_error_descriptors(body)?;
    Ok(descriptors[0].to_exception())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn body(group: &str, reason: &str, code: &str) -> String {
        format!(r#"[{{"group":"{group}","reason":"{reason}","code":"{code}"}}]"#)
    }

    #[test]
    fn test_expired_cart_completed() {
        // Act
        let e = decode_checkout_error(&body("expired", "Checkout has expired", "cart_completed")).unwrap();

        // Assert
        assert_eq!(e.kind(), ExceptionKind::Expired);
        assert_eq!(e.error_code(), "cart_completed");
        assert_eq!(e.error_description(), "Checkout has expired");
        assert!(!e.is_recoverable());
    }

    #[test]
    fn test_every_table_group_has_static_recoverability() {
        let table = [
            ("expired", false),
            ("unrecoverable", true),
            ("checkout", true),
            ("invalid", true),
            ("configuration", false),
            ("authentication", false),
            ("unsupported", false),
            ("brand_new_group", false),
        ];
        for (group, recoverable) in table {
            // Reason and code content must not matter.
            for (reason, code) in [("a", "b"), ("", ""), ("Retry later", "unknown")] {
                let e = decode_checkout_error(&body(group, reason, code)).unwrap();
                assert_eq!(e.is_recoverable(), recoverable, "group {group}");
            }
        }
    }

    #[test]
    fn test_unknown_group_is_internal() {
        let e = decode_checkout_error(&body("violation", "x", "y")).unwrap();
        assert_eq!(e.kind(), ExceptionKind::Internal);
    }

    #[test]
    fn test_empty_array_is_decoding_error() {
        assert!(matches!(
            decode_checkout_error("[]"),
            Err(DecodingError::EmptyErrorPayload)
        ));
    }

    #[test]
    fn test_non_array_body_is_json_error() {
        assert!(matches!(
            decode_checkout_error(r#"{"group":"expired"}"#),
            Err(DecodingError::Json(_))
        ));
    }

    #[test]
    fn test_only_first_descriptor_is_used() {
        let body = r#"[
            {"group":"unrecoverable","reason":"first","code":"a"},
            {"group":"expired","reason":"second","code":"b"}
        ]"#;
        let e = decode_checkout_error(body).unwrap();
        assert_eq!(e.kind(), ExceptionKind::Client);
        assert_eq!(e.error_description(), "first");
        assert_eq!(decode_error_descriptors(body).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_reason_and_code_use_defaults() {
        let e = decode_checkout_error(r#"[{"group":"expired"}]"#).unwrap();
        assert_eq!(e.error_code(), "cart_expired");
        assert!(e.error_description().starts_with("Checkout is no longer available"));
    }

    #[test]
    fn test_extra_descriptor_fields_are_kept() {
        let d = &decode_error_descriptors(
            r#"[{"group":"configuration","reason":"r","code":"storefront_password_required","flowType":"regular","type":"error","extra":1}]"#,
        )
        .unwrap()[0];
        assert_eq!(d.flow_type.as_deref(), Some("regular"));
        assert_eq!(d.error_type.as_deref(), Some("error"));
        assert_eq!(d.to_exception().error_code(), "storefront_password_required");
    }

    #[test]
    fn test_decoding_is_deterministic() {
        let b = body("checkout", "Try again", "client_error");
        assert_eq!(decode_checkout_error(&b).unwrap(), decode_checkout_error(&b).unwrap());
    }
}

//! Monetary values and the tolerant amount decoder they share.
//!
//! Checkout pages are not consistent about how they put amounts on the wire.
//! The same price has been observed as all three of:
//!
//! ```json
//! {"amount": 8,      "currencyCode": "GBP"}
//! {"amount": 8.0,    "currencyCode": "GBP"}
//! {"amount": "8.00", "currencyCode": "GBP"}
//! ```
//!
//! Every amount field in this crate goes through [`amount`] (or
//! [`optional_amount`] when the field may be absent), which accepts any of
//! those forms and normalises to one `f64`.  A string that is not a plain
//! decimal number (`"8,00"`, `"1e3"`, `"abc"`) is rejected rather than guessed
//! at.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

// ── Money types ───────────────────────────────────────────────────────────────

/// An amount with its ISO 4217 currency code.  Both fields are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    #[serde(deserialize_with = "amount::deserialize")]
    pub amount: f64,
    pub currency_code: String,
}

impl Money {
    pub fn new(amount: f64, currency_code: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
        }
    }
}

/// Money as it appears in analytics payloads and legacy completed events,
/// where either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyV2 {
    #[serde(
        default,
        deserialize_with = "optional_amount::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

// ── Amount parsing ────────────────────────────────────────────────────────────

/// Parses a plain decimal string: optional sign, digits, optional fraction.
///
/// Returns `None` for anything else, including exponents, thousands
/// separators, surrounding whitespace and the empty string.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) {
        return None;
    }
    if let Some(frac) = frac_part {
        if !all_digits(frac) {
            return None;
        }
    }

    text.parse::<f64>().ok()
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        parse_decimal(v)
            .ok_or_else(|| E::custom(format!("invalid money amount: '{v}' (must be a valid decimal number)")))
    }
}

/// `deserialize_with` helper for required amount fields.
pub mod amount {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// `deserialize_with` helper for optional amount fields.  `null` is `None`.
pub mod optional_amount {
    use super::*;

    struct OptionalAmountVisitor;

    impl<'de> Visitor<'de> for OptionalAmountVisitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("null, a number or a decimal string")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            super::amount::deserialize(deserializer).map(Some)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionalAmountVisitor)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

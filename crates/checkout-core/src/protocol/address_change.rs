//! Address change requests.
//!
//! Sent when the buyer asks to choose a different shipping or billing address
//! from the host's own address book instead of typing one into the page.  The
//! host answers with a [`DeliveryAddressChange`] listing the addresses to offer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::decode::DecodingError;

/// The buyer wants to pick a different address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressChangeRequestedEvent {
    /// Request id to echo in the reply.  Older pages send none and expect no reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `"shipping"` or `"billing"`.
    pub address_type: String,
    /// The address currently selected on the page, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_address: Option<SelectedAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

// ── Reply payload ─────────────────────────────────────────────────────────────

/// The host's answer to an address change request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddressChange {
    pub delivery: CartDelivery,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartDelivery {
    pub addresses: Vec<SelectableAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectableAddress {
    pub address: SelectedAddress,
}

/// Why a [`DeliveryAddressChange`] cannot be sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("an address change reply must offer at least one address")]
    NoAddresses,
    #[error("address {index} has an invalid country code {code:?}; expected two letters")]
    InvalidCountryCode { index: usize, code: Option<String> },
}

impl DeliveryAddressChange {
    /// Offers `addresses` in the given order.
    pub fn new(addresses: impl IntoIterator<Item = SelectedAddress>) -> Self {
        Self {
            delivery: CartDelivery {
                addresses: addresses
                    .into_iter()
                    .map(|address| SelectableAddress { address })
                    .collect(),
            },
        }
    }

    /// Checks the reply before it goes to the page.
    ///
    /// # Errors
    ///
    /// [`PayloadError::NoAddresses`] for an empty list, and
    /// [`PayloadError::InvalidCountryCode`] for the first address whose
    /// country code is missing or not exactly two characters.
    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.delivery.addresses.is_empty() {
            return Err(PayloadError::NoAddresses);
        }
        for (index, entry) in self.delivery.addresses.iter().enumerate() {
            let code = entry.address.country_code.as_deref();
            if !matches!(code, Some(c) if c.chars().count() == 2) {
                return Err(PayloadError::InvalidCountryCode {
                    index,
                    code: code.map(str::to_string),
                });
            }
        }
        Ok(())
    }
}

/// Decodes an address change channel body.
///
/// # Errors
///
/// Returns [`DecodingError::Json`] if the body is malformed or lacks
/// `addressType`.
pub fn decode_address_change(body: &str) -> Result<AddressChangeRequestedEvent, DecodingError> {
    Ok(serde_json::from_str(body)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

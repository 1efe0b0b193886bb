//! The bridge message protocol and its decoders.

pub mod address_change;
pub mod completed;
pub mod decode;
pub mod error;
pub mod lifecycle;
pub mod message;
pub mod money;
pub mod pixel;
pub mod rpc;

pub use address_change::{
    decode_address_change, AddressChangeRequestedEvent, CartDelivery, DeliveryAddressChange,
    PayloadError, SelectableAddress, SelectedAddress,
};
pub use completed::{
    decode_completed_event, CheckoutCompletedEvent, CurrentCompletedEvent, LegacyCompletedEvent,
};
pub use decode::{decode_message, DecodedMessage, DecodingError};
pub use error::{classify_group, decode_checkout_error, decode_error_descriptors, ErrorDescriptor};
pub use lifecycle::{
    decode_checkout_start, decode_payment_method_change_start, decode_submit_start,
    CheckoutStartEvent, CurrentCard, PaymentMethodChangeStartEvent, SubmitStartEvent,
};
pub use message::{BridgeMessage, Channel};
pub use money::{Money, MoneyV2};
pub use pixel::{decode_pixel_event, CustomPixelEvent, PixelEvent, StandardPixelEvent};
pub use rpc::{RpcResponse, JSONRPC_VERSION};

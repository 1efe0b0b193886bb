//! # checkout-core
//!
//! Shared library for hosts that embed a remote checkout page.  It turns the
//! untyped JSON messages the page posts into typed events, classifies the
//! failures the page reports, and defines the policy hook that decides whether
//! a failure is worth a reload.
//!
//! It has no dependencies on UI toolkits, web views, sockets or async runtimes.
//!
//! # Architecture overview (for beginners)
//!
//! The checkout page runs inside the host application and talks to it over a
//! one-way "bridge": each message names a channel and carries a JSON body.
//! The host needs strongly-typed values, not JSON, and it needs to know which
//! failures a reload can fix.
//!
//! - **`protocol`** – What the page sends.  [`BridgeMessage`] is the raw
//!   message; the decoders turn its body into a [`PixelEvent`],
//!   [`CheckoutCompletedEvent`], [`AddressChangeRequestedEvent`], a lifecycle
//!   event or a [`CheckoutException`].  Requests carry an id the host echoes
//!   in an [`RpcResponse`].  Wire variance (numbers as strings, two schema
//!   generations, unknown fields) is absorbed here.
//!
//! - **`domain`** – What the host reasons about.  The [`CheckoutException`]
//!   taxonomy with its static recoverability table, and the [`ErrorRecovery`]
//!   policy trait.
//!
//! Routing decoded values to host callbacks and driving a presentation
//! session live in the `checkout-bridge` crate.

pub mod domain;
pub mod protocol;

pub use domain::exception::{CheckoutException, ExceptionKind};
pub use domain::recovery::{DefaultErrorRecovery, ErrorRecovery, NeverRecover};
pub use protocol::address_change::{AddressChangeRequestedEvent, DeliveryAddressChange, PayloadError};
pub use protocol::completed::CheckoutCompletedEvent;
pub use protocol::decode::{decode_message, DecodedMessage, DecodingError};
pub use protocol::lifecycle::{CheckoutStartEvent, PaymentMethodChangeStartEvent, SubmitStartEvent};
pub use protocol::message::{BridgeMessage, Channel};
pub use protocol::pixel::PixelEvent;
pub use protocol::rpc::RpcResponse;

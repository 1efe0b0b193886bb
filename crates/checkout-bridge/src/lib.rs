//! checkout-bridge library crate.
//!
//! Takes the raw messages an embedded checkout page posts to its host, routes
//! them to the host's event handlers, and drives one presentation session
//! through its lifecycle (presenting, reloading after a recoverable error,
//! completing, failing, or being canceled).
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Embedded checkout page (JSON envelopes)
//!         ↓
//! [checkout-bridge]
//!   ├── domain/           BridgeConfig (pure, serde only)
//!   ├── application/      EventProcessor, Router, CheckoutSession, Settings
//!   └── infrastructure/
//!         ├── config_store/   TOML load/save
//!         ├── envelope/       JSON-line envelope reader
//!         ├── session_worker/ FIFO task that owns a CheckoutSession
//!         └── tracing_host/   Log-only processor and presentation surface
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async.
//! - `application` depends on `domain` and `checkout-core` only.  It is
//!   synchronous: routing a message never awaits.
//! - `infrastructure` depends on all other layers plus `tokio`.
//!
//! # For beginners: where do messages go?
//!
//! A [`BridgeMessage`](checkout_core::BridgeMessage) enters through
//! [`CheckoutSession::handle`](application::session::CheckoutSession::handle),
//! which hands it to the [`Router`](application::router::Router).  The router
//! decodes it, calls exactly one [`EventProcessor`](application::processor::EventProcessor)
//! method, and returns a [`RoutingOutcome`](application::router::RoutingOutcome)
//! telling the session whether to reload, tear down, or carry on.

/// Domain layer: configuration schema.
pub mod domain;

/// Application layer: routing, sessions and process-wide settings.
pub mod application;

/// Infrastructure layer: config file, envelope reader, session worker.
pub mod infrastructure;

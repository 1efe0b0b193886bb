//! Domain layer for checkout-bridge.
//!
//! Pure configuration types with no I/O.  Checkout events, exceptions and the
//! recovery trait come from `checkout-core`.
//!
//! # What does NOT belong here?
//!
//! - Reading or writing the config file (see `infrastructure::config_store`)
//! - Anything that touches `tokio`

pub mod config;

pub use config::{BridgeConfig, LoggingConfig, RecoveryConfig, RecoveryPolicy, SessionConfig};

//! Infrastructure layer for checkout-bridge.
//!
//! Everything that touches the file system, tokio, or the outside world.
//!
//! # Sub-modules
//!
//! - **`config_store`**   – Loads and saves `checkout-bridge.toml`.
//! - **`envelope`**       – Reads `{"name","body"}` JSON lines into bridge messages.
//! - **`session_worker`** – Runs a session on its own task with a FIFO queue and
//!   drives the [`PresentationSurface`](session_worker::PresentationSurface).
//! - **`tracing_host`**   – Log-only processor and surface for the replay binary.

pub mod config_store;
pub mod envelope;
pub mod session_worker;
pub mod tracing_host;

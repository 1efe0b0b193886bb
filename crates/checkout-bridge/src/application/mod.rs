//! Application layer for checkout-bridge.
//!
//! # What is the "application" layer? (for beginners)
//!
//! The application layer sits between the protocol types in `checkout-core`
//! and the I/O in `infrastructure`.  It decides what happens to each message
//! but never reads a file, spawns a task, or touches a web view.
//!
//! # Sub-modules
//!
//! - **`processor`** – The [`EventProcessor`](processor::EventProcessor)
//!   callback trait the host implements, plus a shim for hosts written
//!   against the older two-argument failure callback.
//!
//! - **`router`**    – Decodes one message, invokes one callback, and applies
//!   the recovery policy to errors.  This is the hot path.
//!
//! - **`session`**   – The per-presentation state machine and the attempt cap.
//!
//! - **`settings`**  – Process-wide settings with snapshot reads.

pub mod processor;
pub mod router;
pub mod session;
pub mod settings;

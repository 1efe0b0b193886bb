//! Domain types for checkout failures and the policies that act on them.
//!
//! Nothing here parses JSON or performs I/O.  The protocol layer builds these
//! values; the host application reacts to them.

pub mod exception;
pub mod recovery;

pub use exception::{codes, CheckoutException, ErrorDetails, ExceptionKind};
pub use recovery::{DefaultErrorRecovery, ErrorRecovery, NeverRecover};

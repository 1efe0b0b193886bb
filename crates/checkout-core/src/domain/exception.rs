//! The checkout failure taxonomy.
//!
//! A [`CheckoutException`] is a *domain* failure reported by the embedded page
//! itself ("your cart expired", "this shop is misconfigured").  It is never a
//! parsing problem; those are [`DecodingError`](crate::protocol::DecodingError)s
//! and are handled separately.
//!
//! # Recoverability
//!
//! Whether reloading the page can fix a failure is a property of the failure
//! *kind*, not of the particular instance:
//!
//! | Kind             | Recoverable |
//! |------------------|-------------|
//! | `Expired`        | no          |
//! | `Client`         | yes         |
//! | `Configuration`  | no          |
//! | `Authentication` | no          |
//! | `Internal`       | no          |
//!
//! [`ExceptionKind::is_recoverable`] is the single place this table lives.

use std::fmt;

use thiserror::Error;

/// Well-known `errorCode` values.
pub mod codes {
    pub const CART_EXPIRED: &str = "cart_expired";
    pub const CART_COMPLETED: &str = "cart_completed";
    pub const INVALID_CART: &str = "invalid_cart";
    pub const CLIENT_ERROR: &str = "client_error";
    pub const CUSTOMER_ACCOUNT_REQUIRED: &str = "customer_account_required";
    pub const STOREFRONT_PASSWORD_REQUIRED: &str = "storefront_password_required";
    pub const CHECKOUT_LIQUID_NOT_MIGRATED: &str = "checkout_liquid_not_migrated";
    pub const UNKNOWN: &str = "unknown";
}

// ── Kind ──────────────────────────────────────────────────────────────────────

/// The subtype of a [`CheckoutException`], without its instance data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    /// The checkout URL is no longer usable; a new one must be generated.
    Expired,
    /// A transient client-side failure.  Reloading is expected to help.
    Client,
    /// The shop or checkout is misconfigured.
    Configuration,
    /// The buyer must authenticate before checking out.
    Authentication,
    /// Anything the host does not specifically recognise.
    Internal,
}

impl ExceptionKind {
    pub const ALL: [ExceptionKind; 5] = [
        ExceptionKind::Expired,
        ExceptionKind::Client,
        ExceptionKind::Configuration,
        ExceptionKind::Authentication,
        ExceptionKind::Internal,
    ];

    /// `true` when reloading the page is expected to resolve the failure.
    pub const fn is_recoverable(self) -> bool {
        matches!(self, ExceptionKind::Client)
    }

    /// Code used when the page sends an empty `code`.
    pub const fn default_code(self) -> &'static str {
        match self {
            ExceptionKind::Expired => codes::CART_EXPIRED,
            ExceptionKind::Client => codes::CLIENT_ERROR,
            ExceptionKind::Configuration => codes::UNKNOWN,
            ExceptionKind::Authentication => codes::CUSTOMER_ACCOUNT_REQUIRED,
            ExceptionKind::Internal => codes::UNKNOWN,
        }
    }

    /// Description used when the page sends an empty `reason`.
    pub const fn default_description(self) -> &'static str {
        match self {
            ExceptionKind::Expired => {
                "Checkout is no longer available with the provided token. Please generate a new checkout URL"
            }
            ExceptionKind::Client => "Checkout is currently unavailable due to an internal error",
            ExceptionKind::Configuration => "Checkout is unavailable due to a configuration issue.",
            ExceptionKind::Authentication => "Customer account required.",
            ExceptionKind::Internal => "Checkout encountered an unrecognised error.",
        }
    }
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExceptionKind::Expired => "expired",
            ExceptionKind::Client => "client",
            ExceptionKind::Configuration => "configuration",
            ExceptionKind::Authentication => "authentication",
            ExceptionKind::Internal => "internal",
        };
        f.write_str(name)
    }
}

// ── Exception ─────────────────────────────────────────────────────────────────

/// Instance data carried by every [`CheckoutException`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetails {
    pub code: String,
    pub description: String,
}

/// A failure reported by the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutException {
    #[error("checkout expired ({}): {}", .0.code, .0.description)]
    Expired(ErrorDetails),

    #[error("checkout client error ({}): {}", .0.code, .0.description)]
    Client(ErrorDetails),

    #[error("checkout configuration error ({}): {}", .0.code, .0.description)]
    Configuration(ErrorDetails),

    #[error("checkout authentication required ({}): {}", .0.code, .0.description)]
    Authentication(ErrorDetails),

    #[error("checkout internal error ({}): {}", .0.code, .0.description)]
    Internal(ErrorDetails),
}

impl CheckoutException {
    /// Builds an exception of `kind`, substituting the kind's defaults for an
    /// empty `code` or `description`.
    pub fn new(kind: ExceptionKind, code: &str, description: &str) -> Self {
        let details = ErrorDetails {
            code: non_empty_or(code, kind.default_code()),
            description: non_empty_or(description, kind.default_description()),
        };
        match kind {
            ExceptionKind::Expired => CheckoutException::Expired(details),
            ExceptionKind::Client => CheckoutException::Client(details),
            ExceptionKind::Configuration => CheckoutException::Configuration(details),
            ExceptionKind::Authentication => CheckoutException::Authentication(details),
            ExceptionKind::Internal => CheckoutException::Internal(details),
        }
    }

    pub fn kind(&self) -> ExceptionKind {
        match self {
            CheckoutException::Expired(_) => ExceptionKind::Expired,
            CheckoutException::Client(_) => ExceptionKind::Client,
            CheckoutException::Configuration(_) => ExceptionKind::Configuration,
            CheckoutException::Authentication(_) => ExceptionKind::Authentication,
            CheckoutException::Internal(_) => ExceptionKind::Internal,
        }
    }

    fn details(&self) -> &ErrorDetails {
        match self {
            CheckoutException::Expired(d)
            | CheckoutException::Client(d)
            | CheckoutException::Configuration(d)
            | CheckoutException::Authentication(d)
            | CheckoutException::Internal(d) => d,
        }
    }

    pub fn error_code(&self) -> &str {
        &self.details().code
    }

    pub fn error_description(&self) -> &str {
        &self.details().description
    }

    pub fn is_recoverable(&self) -> bool {
        self.kind().is_recoverable()
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Replies from the host to page requests.
//!
//! Requests ([`AddressChangeRequestedEvent`](super::AddressChangeRequestedEvent),
//! [`SubmitStartEvent`](super::SubmitStartEvent),
//! [`PaymentMethodChangeStartEvent`](super::PaymentMethodChangeStartEvent))
//! carry an `id`.  The host answers with a JSON-RPC 2.0 response that echoes it:
//!
//! ```json
//! {"jsonrpc":"2.0","id":"req-1","result":{"delivery":{"addresses":[]}}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC protocol version written in every response.
pub const JSONRPC_VERSION: &str = "2.0";

/// A reply to one page request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: String,
    pub result: Value,
}

impl RpcResponse {
    pub fn new(id: impl Into<String>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            result,
        }
    }

    /// Serialises the response for posting back to the page.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_echoes_id_and_version() {
        // Arrange
        let response = RpcResponse::new("req-1", json!({"ok": true}));

        // Act
        let text = response.to_json().unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        // Assert
        assert_eq!(value, json!({"jsonrpc": "2.0", "id": "req-1", "result": {"ok": true}}));
    }
}

//! JSON-line envelopes: the transport framing used by the replay binary.
//!
//! Each non-blank line is one envelope:
//!
//! ```json
//! {"name":"completed","body":"{\"orderDetails\":{...}}"}
//! {"name":"completed","body":{"orderDetails":{...}}}
//! ```
//!
//! `body` may be the JSON document serialised into a string (as web views
//! deliver it) or the document inline, which is easier to write by hand.
//! Either way the router receives it as a raw string.

use checkout_core::BridgeMessage;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

/// Error type for envelope parsing and reading.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The underlying reader failed.
    #[error("failed to read envelope stream: {0}")]
    Io(#[from] std::io::Error),

    /// A line was not a valid envelope.
    #[error("malformed envelope on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct Envelope {
    name: String,
    #[serde(default)]
    body: Value,
}

/// Parses one envelope line into a [`BridgeMessage`].
pub fn parse_envelope(line: &str) -> Result<BridgeMessage, serde_json::Error> {
    let envelope: Envelope = serde_json::from_str(line)?;
    let body = match envelope.body {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    };
    Ok(BridgeMessage::new(envelope.name, body))
}

/// Reads envelopes line by line from an async reader.
///
/// A malformed line yields [`EnvelopeError::Malformed`]; the next call
/// continues with the following line.
pub struct EnvelopeReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: AsyncBufRead + Unpin> EnvelopeReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Returns the next message, or `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// [`EnvelopeError::Io`] if reading fails, [`EnvelopeError::Malformed`]
    /// for a line that is not a valid envelope.
    pub async fn next_message(&mut self) -> Result<Option<BridgeMessage>, EnvelopeError> {
        while let Some(line) = self.lines.next_line().await? {
            self.line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return parse_envelope(trimmed)
                .map(Some)
                .map_err(|source| EnvelopeError::Malformed {
                    line: self.line_no,
                    source,
                });
        }
        Ok(None)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    #[test]
    fn test_string_body_is_kept_verbatim() {
        let msg = parse_envelope(r#"{"name":"error","body":"[{\"group\":\"expired\"}]"}"#).unwrap();
        assert_eq!(msg.channel_name(), "error");
        assert_eq!(msg.body(), r#"[{"group":"expired"}]"#);
    }

    #[test]
    fn test_inline_body_is_serialised_to_string() {
        // Arrange / Act
        let msg = parse_envelope(r#"{"name":"addressChangeRequested","body":{"addressType":"shipping"}}"#).unwrap();

        // Assert
        let body: Value = serde_json::from_str(msg.body()).unwrap();
        assert_eq!(body["addressType"], "shipping");
    }

    #[test]
    fn test_missing_body_becomes_empty_string() {
        let msg = parse_envelope(r#"{"name":"completed"}"#).unwrap();
        assert_eq!(msg.body(), "");
    }

    #[test]
    fn test_missing_name_is_an_error() {
        assert!(parse_envelope(r#"{"body":"{}"}"#).is_err());
    }

    #[tokio::test]
    async fn test_reader_skips_blank_lines_and_reports_malformed_line_numbers() {
        // Arrange
        let input = "\n{\"name\":\"completed\",\"body\":\"{}\"}\nnot json\n\n{\"name\":\"error\",\"body\":\"[]\"}\n";
        let mut reader = EnvelopeReader::new(BufReader::new(input.as_bytes()));

        // Act
        let first = reader.next_message().await;
        let second = reader.next_message().await;
        let third = reader.next_message().await;
        let end = reader.next_message().await;

        // Assert
        assert_eq!(first.unwrap().unwrap().channel_name(), "completed");
        assert!(matches!(second, Err(EnvelopeError::Malformed { line: 3, .. })));
        assert_eq!(third.unwrap().unwrap().channel_name(), "error");
        assert!(end.unwrap().is_none());
    }
}

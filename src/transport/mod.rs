//! Transport layer: HTTP wire-format details (serialization/deserialization).

mod send_bulk;
mod send_single;

pub use send_bulk::{decode_bulk_send_json_response, encode_bulk_send_body};
pub use send_single::{decode_single_send_json_response, encode_single_send_body};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct UpstreamErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Extract the optional `message` field from an upstream error body.
///
/// Error bodies are best-effort: a non-JSON or shapeless body yields `None`
/// rather than a decode failure.
pub fn upstream_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<UpstreamErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
}

#[cfg(test)]
mod tests {
    use super::upstream_error_message;

    #[test]
    fn extracts_message_field_when_present() {
        let body = r#"{"message":"Invalid sender","code":400}"#;
        assert_eq!(
            upstream_error_message(body).as_deref(),
            Some("Invalid sender")
        );
    }

    #[test]
    fn missing_message_field_yields_none() {
        assert_eq!(upstream_error_message(r#"{"code":400}"#), None);
    }

    #[test]
    fn non_json_body_yields_none() {
        assert_eq!(upstream_error_message("<html>502</html>"), None);
        assert_eq!(upstream_error_message(""), None);
    }
}

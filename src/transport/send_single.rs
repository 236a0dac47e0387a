use serde::Deserialize;
use serde_json::json;

use crate::domain::{DeliveryStatus, SenderId, SingleSend, SingleSendResponse};

use super::TransportError;

#[derive(Debug, Clone, Deserialize)]
struct SingleSendJsonResponse {
    id: String,
    #[serde(rename = "recipientPhone")]
    recipient_phone: String,
    content: String,
    cost: f64,
    status: String,
}

/// Encode the `messages/send` request body.
///
/// `from` falls back to the configured default sender when the request does
/// not carry an override.
pub fn encode_single_send_body(request: &SingleSend, default_sender: &SenderId) -> String {
    let from = request.from().unwrap_or(default_sender);
    json!({
        "to": request.to().raw(),
        "message": request.message().as_str(),
        "from": from.as_str(),
    })
    .to_string()
}

/// Decode a successful `messages/send` response body.
pub fn decode_single_send_json_response(json: &str) -> Result<SingleSendResponse, TransportError> {
    let parsed: SingleSendJsonResponse = serde_json::from_str(json)?;
    Ok(SingleSendResponse {
        id: parsed.id,
        recipient_phone: parsed.recipient_phone,
        content: parsed.content,
        cost: parsed.cost,
        status: DeliveryStatus::new(parsed.status),
    })
}

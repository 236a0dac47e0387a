use serde::Deserialize;
use serde_json::json;

use crate::domain::{BulkMessageResult, BulkSend, BulkSendResponse, DeliveryStatus, SenderId};

use super::TransportError;

#[derive(Debug, Clone, Deserialize)]
struct BulkSendJsonResponse {
    total: u32,
    accepted: u32,
    rejected: u32,
    #[serde(rename = "totalCost")]
    total_cost: f64,
    #[serde(default)]
    messages: Vec<BulkMessageJsonResult>,
}

// Upstream mixes casings here: `message_id` is snake_case while
// `recipientPhone` is camelCase. Both are preserved verbatim.
#[derive(Debug, Clone, Deserialize)]
struct BulkMessageJsonResult {
    message_id: String,
    #[serde(rename = "recipientPhone")]
    recipient_phone: String,
    status: String,
}

/// Encode the `messages/send/bulk` request body.
///
/// Recipients are emitted in input order; per-recipient overrides keep their
/// `message` field, recipients on the batch default omit it.
pub fn encode_bulk_send_body(request: &BulkSend, default_sender: &SenderId) -> String {
    let recipients = request
        .recipients()
        .iter()
        .map(|recipient| match recipient.message() {
            Some(text) => json!({
                "to": recipient.to().raw(),
                "message": text.as_str(),
            }),
            None => json!({ "to": recipient.to().raw() }),
        })
        .collect::<Vec<_>>();

    let from = request.from().unwrap_or(default_sender);
    json!({
        "recipients": recipients,
        "message": request.message().as_str(),
        "from": from.as_str(),
    })
    .to_string()
}

/// Decode a successful `messages/send/bulk` response body.
pub fn decode_bulk_send_json_response(json: &str) -> Result<BulkSendResponse, TransportError> {
    let parsed: BulkSendJsonResponse = serde_json::from_str(json)?;
    let messages = parsed
        .messages
        .into_iter()
        .map(|entry| BulkMessageResult {
            message_id: entry.message_id,
            recipient_phone: entry.recipient_phone,
            status: DeliveryStatus::new(entry.status),
        })
        .collect();

    Ok(BulkSendResponse {
        total: parsed.total,
        accepted: parsed.accepted,
        rejected: parsed.rejected,
        total_cost: parsed.total_cost,
        messages,
    })
}

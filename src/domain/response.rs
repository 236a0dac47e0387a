use crate::domain::value::DeliveryStatus;

#[derive(Debug, Clone, PartialEq)]
/// Upstream acknowledgment for a single send.
pub struct SingleSendResponse {
    pub id: String,
    pub recipient_phone: String,
    pub content: String,
    pub cost: f64,
    pub status: DeliveryStatus,
}

#[derive(Debug, Clone, PartialEq)]
/// Upstream acknowledgment for a bulk send.
///
/// The per-recipient accepted/rejected breakdown is data, not an error:
/// a batch with rejected entries is still a successful call.
pub struct BulkSendResponse {
    pub total: u32,
    pub accepted: u32,
    pub rejected: u32,
    pub total_cost: f64,
    pub messages: Vec<BulkMessageResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Per-recipient entry in a bulk acknowledgment, in upstream order.
pub struct BulkMessageResult {
    pub message_id: String,
    pub recipient_phone: String,
    pub status: DeliveryStatus,
}

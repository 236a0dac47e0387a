use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, RawPhoneNumber, SenderId};

#[derive(Debug, Clone)]
/// One SMS to one recipient (`messages/send`).
pub struct SingleSend {
    to: RawPhoneNumber,
    message: MessageText,
    from: Option<SenderId>,
}

impl SingleSend {
    pub fn new(to: RawPhoneNumber, message: MessageText) -> Self {
        Self {
            to,
            message,
            from: None,
        }
    }

    /// Override the configured default sender for this message.
    pub fn from_sender(mut self, from: SenderId) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }

    pub fn from(&self) -> Option<&SenderId> {
        self.from.as_ref()
    }
}

#[derive(Debug, Clone)]
/// One recipient in a bulk batch, with an optional per-recipient text override.
pub struct BulkRecipient {
    to: RawPhoneNumber,
    message: Option<MessageText>,
}

impl BulkRecipient {
    /// Recipient that receives the batch default text.
    pub fn new(to: RawPhoneNumber) -> Self {
        Self { to, message: None }
    }

    /// Recipient with its own message text.
    pub fn with_message(to: RawPhoneNumber, message: MessageText) -> Self {
        Self {
            to,
            message: Some(message),
        }
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn message(&self) -> Option<&MessageText> {
        self.message.as_ref()
    }
}

#[derive(Debug, Clone)]
/// One SMS batch to many recipients (`messages/send/bulk`).
///
/// Recipient order is preserved all the way to the wire.
pub struct BulkSend {
    recipients: Vec<BulkRecipient>,
    message: MessageText,
    from: Option<SenderId>,
}

impl BulkSend {
    /// Create a batch with the default text applied to recipients without an override.
    pub fn new(
        recipients: Vec<BulkRecipient>,
        message: MessageText,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::NoRecipients);
        }
        Ok(Self {
            recipients,
            message,
            from: None,
        })
    }

    /// Override the configured default sender for this batch.
    pub fn from_sender(mut self, from: SenderId) -> Self {
        self.from = Some(from);
        self
    }

    pub fn recipients(&self) -> &[BulkRecipient] {
        &self.recipients
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }

    pub fn from(&self) -> Option<&SenderId> {
        self.from.as_ref()
    }
}

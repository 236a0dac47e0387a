//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{BulkRecipient, BulkSend, SingleSend};
pub use response::{BulkMessageResult, BulkSendResponse, SingleSendResponse};
pub use validation::ValidationError;
pub use value::{
    ApiToken, DeliveryStatus, KnownDeliveryStatus, MessageText, PhoneNumber, RawPhoneNumber,
    SenderId,
};

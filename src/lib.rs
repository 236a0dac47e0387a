//! Typed Rust client for the Asend SMS HTTP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer
//! for wire-format details, and a small client layer orchestrating requests:
//! build a JSON payload, POST it with the `x-api-token` header, decode the
//! response or surface a single normalized [`GatewayError`].
//!
//! ```rust,no_run
//! use asend::{ApiToken, AsendClient, GatewayConfig, MessageText, RawPhoneNumber, SenderId, SingleSend};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GatewayConfig::new(
//!         "https://api.asend.example/v1/",
//!         ApiToken::new("...")?,
//!         SenderId::new("MyShop")?,
//!     )?;
//!     let client = AsendClient::new(config)?;
//!
//!     let request = SingleSend::new(
//!         RawPhoneNumber::new("+2250704051152")?,
//!         MessageText::new("hello")?,
//!     );
//!     let response = client.send_single(request).await?;
//!     println!("queued as {} ({})", response.id, response.status.as_str());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{AsendClient, AsendClientBuilder, DEFAULT_TIMEOUT, GatewayConfig, GatewayError};
pub use domain::{
    ApiToken, BulkMessageResult, BulkRecipient, BulkSend, BulkSendResponse, DeliveryStatus,
    KnownDeliveryStatus, MessageText, PhoneNumber, RawPhoneNumber, SenderId, SingleSend,
    SingleSendResponse, ValidationError,
};

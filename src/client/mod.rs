//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    ApiToken, BulkSend, BulkSendResponse, SenderId, SingleSend, SingleSendResponse,
    ValidationError,
};

const SINGLE_SEND_PATH: &str = "messages/send";
const BULK_SEND_PATH: &str = "messages/send/bulk";

const SINGLE_SEND_FALLBACK: &str = "An error occurred while sending the message";
const BULK_SEND_FALLBACK: &str = "An error occurred while sending bulk messages";

/// Per-request timeout applied unless overridden via the builder.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(50);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        token: &'a ApiToken,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        token: &'a ApiToken,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(reqwest::header::ACCEPT, "application/json")
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .header(ApiToken::HEADER, token.as_str())
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Connection parameters for the Asend gateway.
///
/// Loaded once at construction time and read-only afterwards. The base URL is
/// validated as an absolute URL and normalized to end with a `/` so endpoint
/// paths can be appended directly.
pub struct GatewayConfig {
    base_url: String,
    api_token: ApiToken,
    default_sender: SenderId,
}

impl GatewayConfig {
    /// Create a validated configuration value.
    pub fn new(
        base_url: impl Into<String>,
        api_token: ApiToken,
        default_sender: SenderId,
    ) -> Result<Self, ValidationError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim();
        url::Url::parse(trimmed).map_err(|_| ValidationError::InvalidBaseUrl {
            input: trimmed.to_owned(),
        })?;
        let base_url = if trimmed.ends_with('/') {
            trimmed.to_owned()
        } else {
            format!("{trimmed}/")
        };
        Ok(Self {
            base_url,
            api_token,
            default_sender,
        })
    }

    /// Base URL with a guaranteed trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_token(&self) -> &ApiToken {
        &self.api_token
    }

    /// Sender used when a request does not carry its own override.
    pub fn default_sender(&self) -> &SenderId {
        &self.default_sender
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
/// Error returned by [`AsendClient`] operations.
///
/// Non-2xx responses, transport failures (timeouts, connection errors) and
/// malformed response bodies all collapse into this one kind. The message is
/// the upstream-provided `message` field when present, otherwise a fixed
/// operation-specific fallback. The underlying cause, when one exists, stays
/// reachable through [`std::error::Error::source`].
pub struct GatewayError {
    message: String,
    status: Option<u16>,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl GatewayError {
    fn from_source(message: &'static str, source: Box<dyn StdError + Send + Sync>) -> Self {
        Self {
            message: message.to_owned(),
            status: None,
            source: Some(source),
        }
    }

    fn rejected(status: u16, upstream_message: Option<String>, fallback: &'static str) -> Self {
        Self {
            message: upstream_message.unwrap_or_else(|| fallback.to_owned()),
            status: Some(status),
            source: None,
        }
    }

    /// Human-readable message suitable for a caller-facing failure response.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Upstream HTTP status, when the gateway answered at all.
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

#[derive(Debug, Clone)]
/// Builder for [`AsendClient`].
///
/// Use this when you need to customize the timeout or user-agent.
pub struct AsendClientBuilder {
    config: GatewayConfig,
    timeout: Duration,
    user_agent: Option<String>,
}

impl AsendClientBuilder {
    /// Create a builder with the default timeout and no user-agent override.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an [`AsendClient`].
    pub fn build(self) -> Result<AsendClient, GatewayError> {
        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build().map_err(|err| {
            GatewayError::from_source("failed to construct the HTTP client", Box::new(err))
        })?;

        Ok(AsendClient {
            config: self.config,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Asend gateway client.
///
/// A stateless facade over the two send endpoints:
/// - `{base_url}messages/send` for a single message
/// - `{base_url}messages/send/bulk` for a batch
///
/// The client holds only read-only configuration; concurrent calls from
/// cloned handles are independent.
pub struct AsendClient {
    config: GatewayConfig,
    http: Arc<dyn HttpTransport>,
}

impl AsendClient {
    /// Create a client with the default timeout.
    ///
    /// For more customization, use [`AsendClient::builder`].
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        AsendClientBuilder::new(config).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(config: GatewayConfig) -> AsendClientBuilder {
        AsendClientBuilder::new(config)
    }

    /// Send one SMS to one recipient.
    ///
    /// The request is trusted as-is; validation belongs to the domain
    /// constructors. Exactly one POST is issued per call, with no retries.
    ///
    /// Errors with [`GatewayError`] on a non-2xx status, a transport failure,
    /// or a response body that does not match the expected shape.
    pub async fn send_single(
        &self,
        request: SingleSend,
    ) -> Result<SingleSendResponse, GatewayError> {
        let body = crate::transport::encode_single_send_body(
            &request,
            self.config.default_sender(),
        );
        let raw = self.post(SINGLE_SEND_PATH, body, SINGLE_SEND_FALLBACK).await?;

        crate::transport::decode_single_send_json_response(&raw).map_err(|err| {
            tracing::warn!(error = %err, "failed to decode send response");
            GatewayError::from_source(SINGLE_SEND_FALLBACK, Box::new(err))
        })
    }

    /// Send one SMS batch to many recipients in a single upstream call.
    ///
    /// Recipient order is passed through verbatim and preserved in the
    /// response. A batch with rejected entries is still a success; the
    /// accepted/rejected breakdown is data in [`BulkSendResponse`].
    pub async fn send_bulk(&self, request: BulkSend) -> Result<BulkSendResponse, GatewayError> {
        let body =
            crate::transport::encode_bulk_send_body(&request, self.config.default_sender());
        let raw = self.post(BULK_SEND_PATH, body, BULK_SEND_FALLBACK).await?;
        tracing::info!(
            url = %self.endpoint_url(BULK_SEND_PATH),
            body = %raw,
            "bulk send accepted"
        );

        crate::transport::decode_bulk_send_json_response(&raw).map_err(|err| {
            tracing::warn!(error = %err, "failed to decode bulk send response");
            GatewayError::from_source(BULK_SEND_FALLBACK, Box::new(err))
        })
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    /// Shared POST + error normalization for both endpoints.
    async fn post(
        &self,
        path: &str,
        body: String,
        fallback: &'static str,
    ) -> Result<String, GatewayError> {
        let url = self.endpoint_url(path);
        let response = self
            .http
            .post_json(&url, self.config.api_token(), body)
            .await
            .map_err(|err| {
                tracing::warn!(%url, error = %err, "request to the gateway failed");
                GatewayError::from_source(fallback, err)
            })?;

        if !(200..=299).contains(&response.status) {
            let upstream_message = crate::transport::upstream_error_message(&response.body);
            tracing::warn!(
                %url,
                status = response.status,
                upstream_message = upstream_message.as_deref(),
                "gateway rejected the request"
            );
            return Err(GatewayError::rejected(
                response.status,
                upstream_message,
                fallback,
            ));
        }

        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::Value;

    use crate::domain::{
        BulkRecipient, KnownDeliveryStatus, MessageText, RawPhoneNumber, SenderId,
    };

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_url: Option<String>,
        last_token: Option<String>,
        last_body: Option<String>,
        response_status: u16,
        response_body: String,
        fail_with: Option<String>,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_url: None,
                    last_token: None,
                    last_body: None,
                    response_status,
                    response_body: response_body.into(),
                    fail_with: None,
                })),
            }
        }

        fn failing(message: impl Into<String>) -> Self {
            let transport = Self::new(0, "");
            transport.state.lock().unwrap().fail_with = Some(message.into());
            transport
        }

        fn last_request(&self) -> (Option<String>, Option<String>, Option<String>) {
            let state = self.state.lock().unwrap();
            (
                state.last_url.clone(),
                state.last_token.clone(),
                state.last_body.clone(),
            )
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_json<'a>(
            &'a self,
            url: &'a str,
            token: &'a ApiToken,
            body: String,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, response_body, fail_with) = {
                    let mut state = self.state.lock().unwrap();
                    state.last_url = Some(url.to_owned());
                    state.last_token = Some(token.as_str().to_owned());
                    state.last_body = Some(body);
                    (
                        state.response_status,
                        state.response_body.clone(),
                        state.fail_with.clone(),
                    )
                };
                if let Some(message) = fail_with {
                    return Err(message.into());
                }
                Ok(HttpResponse {
                    status,
                    body: response_body,
                })
            })
        }
    }

    fn make_config() -> GatewayConfig {
        GatewayConfig::new(
            "https://example.invalid/v1/",
            ApiToken::new("test_token").unwrap(),
            SenderId::new("MyShop").unwrap(),
        )
        .unwrap()
    }

    fn make_client(transport: FakeTransport) -> AsendClient {
        AsendClient {
            config: make_config(),
            http: Arc::new(transport),
        }
    }

    fn single_request() -> SingleSend {
        SingleSend::new(
            RawPhoneNumber::new("+2250704051152").unwrap(),
            MessageText::new("hello").unwrap(),
        )
    }

    fn bulk_request() -> BulkSend {
        let recipients = vec![
            BulkRecipient::new(RawPhoneNumber::new("+2250704051152").unwrap()),
            BulkRecipient::with_message(
                RawPhoneNumber::new("+2250102030405").unwrap(),
                MessageText::new("custom text").unwrap(),
            ),
        ];
        BulkSend::new(recipients, MessageText::new("default text").unwrap()).unwrap()
    }

    const SINGLE_OK: &str = r#"
    {
      "id": "c8bf0a7b-3c2e-4a28-9f5d-1f2f60a1a9d0",
      "recipientPhone": "+2250704051152",
      "content": "msg_292zeejddd",
      "cost": 15,
      "status": "SUBMITTED"
    }
    "#;

    #[tokio::test]
    async fn send_single_posts_token_and_body_and_parses_response() {
        let transport = FakeTransport::new(200, SINGLE_OK);
        let client = make_client(transport.clone());

        let response = client.send_single(single_request()).await.unwrap();
        assert_eq!(response.id, "c8bf0a7b-3c2e-4a28-9f5d-1f2f60a1a9d0");
        assert_eq!(response.recipient_phone, "+2250704051152");
        assert_eq!(response.content, "msg_292zeejddd");
        assert_eq!(response.cost, 15.0);
        assert_eq!(
            response.status.known_kind(),
            Some(KnownDeliveryStatus::Submitted)
        );

        let (url, token, body) = transport.last_request();
        assert_eq!(
            url.as_deref(),
            Some("https://example.invalid/v1/messages/send")
        );
        assert_eq!(token.as_deref(), Some("test_token"));

        let body: Value = serde_json::from_str(&body.unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "to": "+2250704051152",
                "message": "hello",
                "from": "MyShop",
            })
        );
    }

    #[tokio::test]
    async fn send_single_uses_request_sender_override() {
        let transport = FakeTransport::new(200, SINGLE_OK);
        let client = make_client(transport.clone());

        let request = single_request().from_sender(SenderId::new("Promo").unwrap());
        client.send_single(request).await.unwrap();

        let (_, _, body) = transport.last_request();
        let body: Value = serde_json::from_str(&body.unwrap()).unwrap();
        assert_eq!(body["from"], "Promo");
    }

    #[tokio::test]
    async fn send_single_surfaces_upstream_error_message() {
        let transport = FakeTransport::new(400, r#"{"message":"Invalid sender"}"#);
        let client = make_client(transport);

        let err = client.send_single(single_request()).await.unwrap_err();
        assert_eq!(err.message(), "Invalid sender");
        assert_eq!(err.to_string(), "Invalid sender");
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn send_single_falls_back_when_error_body_has_no_message() {
        let transport = FakeTransport::new(400, r#"{"code":42}"#);
        let client = make_client(transport);

        let err = client.send_single(single_request()).await.unwrap_err();
        assert_eq!(err.message(), "An error occurred while sending the message");
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn send_single_falls_back_on_non_json_error_body() {
        let transport = FakeTransport::new(502, "<html>bad gateway</html>");
        let client = make_client(transport);

        let err = client.send_single(single_request()).await.unwrap_err();
        assert_eq!(err.message(), "An error occurred while sending the message");
        assert_eq!(err.status(), Some(502));
    }

    #[tokio::test]
    async fn send_single_maps_transport_failure_to_fallback() {
        let transport = FakeTransport::failing("connection refused");
        let client = make_client(transport);

        let err = client.send_single(single_request()).await.unwrap_err();
        assert_eq!(err.message(), "An error occurred while sending the message");
        assert_eq!(err.status(), None);
        assert!(err.source().is_some());
    }

    #[tokio::test]
    async fn send_single_maps_malformed_success_body_to_fallback() {
        let transport = FakeTransport::new(200, "{ not json }");
        let client = make_client(transport);

        let err = client.send_single(single_request()).await.unwrap_err();
        assert_eq!(err.message(), "An error occurred while sending the message");
        assert!(err.source().is_some());
    }

    #[tokio::test]
    async fn send_bulk_posts_to_bulk_endpoint_and_preserves_order() {
        let json = r#"
        {
          "total": 2,
          "accepted": 2,
          "rejected": 0,
          "totalCost": 30,
          "messages": [
            { "message_id": "msg_1", "recipientPhone": "+2250704051152", "status": "SUBMITTED" },
            { "message_id": "msg_2", "recipientPhone": "+2250102030405", "status": "SUBMITTED" }
          ]
        }
        "#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(transport.clone());

        let response = client.send_bulk(bulk_request()).await.unwrap();
        assert_eq!(response.total, 2);
        assert_eq!(response.accepted, 2);
        assert_eq!(response.rejected, 0);
        assert_eq!(response.total_cost, 30.0);
        assert_eq!(response.messages[0].message_id, "msg_1");
        assert_eq!(response.messages[1].message_id, "msg_2");

        let (url, token, body) = transport.last_request();
        assert_eq!(
            url.as_deref(),
            Some("https://example.invalid/v1/messages/send/bulk")
        );
        assert_eq!(token.as_deref(), Some("test_token"));

        let body: Value = serde_json::from_str(&body.unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "recipients": [
                    { "to": "+2250704051152" },
                    { "to": "+2250102030405", "message": "custom text" },
                ],
                "message": "default text",
                "from": "MyShop",
            })
        );
    }

    #[tokio::test]
    async fn send_bulk_surfaces_upstream_error_message() {
        let transport = FakeTransport::new(400, r#"{"message":"Invalid sender"}"#);
        let client = make_client(transport);

        let err = client.send_bulk(bulk_request()).await.unwrap_err();
        assert_eq!(err.message(), "Invalid sender");
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn send_bulk_falls_back_when_error_body_has_no_message() {
        let transport = FakeTransport::new(500, "oops");
        let client = make_client(transport);

        let err = client.send_bulk(bulk_request()).await.unwrap_err();
        assert_eq!(
            err.message(),
            "An error occurred while sending bulk messages"
        );
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn send_bulk_maps_malformed_success_body_to_fallback() {
        let transport = FakeTransport::new(200, r#"{"total":"not a number"}"#);
        let client = make_client(transport);

        let err = client.send_bulk(bulk_request()).await.unwrap_err();
        assert_eq!(
            err.message(),
            "An error occurred while sending bulk messages"
        );
    }

    #[test]
    fn gateway_config_normalizes_trailing_slash() {
        let config = GatewayConfig::new(
            "https://example.invalid/v1",
            ApiToken::new("token").unwrap(),
            SenderId::new("MyShop").unwrap(),
        )
        .unwrap();
        assert_eq!(config.base_url(), "https://example.invalid/v1/");

        let config = GatewayConfig::new(
            " https://example.invalid/v1/ ",
            ApiToken::new("token").unwrap(),
            SenderId::new("MyShop").unwrap(),
        )
        .unwrap();
        assert_eq!(config.base_url(), "https://example.invalid/v1/");
    }

    #[test]
    fn gateway_config_rejects_invalid_base_url() {
        let err = GatewayConfig::new(
            "not a url",
            ApiToken::new("token").unwrap(),
            SenderId::new("MyShop").unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn client_handles_are_clonable_and_shareable() {
        fn assert_bounds<T: Clone + Send + Sync>() {}
        assert_bounds::<AsendClient>();
    }

    #[tokio::test]
    async fn concurrent_sends_do_not_interfere() {
        let transport = FakeTransport::new(200, SINGLE_OK);
        let client = make_client(transport);

        let first = client.clone();
        let second = client.clone();
        let (a, b) = tokio::join!(
            first.send_single(single_request()),
            second.send_single(single_request()),
        );
        assert!(a.is_ok());
        assert!(b.is_ok());
    }
}

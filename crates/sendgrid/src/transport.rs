use async_trait::async_trait;
use mailroom_core::{EmailMessage, ProviderKind};
use mailroom_provider::{EmailTransport, ProviderError, SendReceipt};
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::SendGridConfig;
use crate::error::SendGridError;
use crate::types::{ContentPart, EmailAddress, MailSendRequest};

/// Transport that sends mail through the `SendGrid` v3 Mail Send API.
///
/// Implements the [`EmailTransport`] trait so the dispatcher can route
/// messages to it interchangeably with any other backend.
#[derive(Debug)]
pub struct SendGridTransport {
    config: SendGridConfig,
    client: Client,
}

impl SendGridTransport {
    /// Create a new transport with the given configuration.
    ///
    /// Uses a default `reqwest::Client` with reasonable timeouts.
    pub fn new(config: SendGridConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self { config, client }
    }

    /// Create a new transport with a custom HTTP client.
    ///
    /// Useful for testing or for sharing a connection pool across transports.
    pub fn with_client(config: SendGridConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Build the full URL for the Mail Send endpoint.
    fn mail_send_url(&self) -> String {
        format!("{}/mail/send", self.config.api_base_url)
    }

    /// Build the full URL for the account profile endpoint used by health
    /// checks.
    fn profile_url(&self) -> String {
        format!("{}/user/profile", self.config.api_base_url)
    }

    /// Assemble the wire request for a message, checking that the fields the
    /// selected send mode needs are present.
    ///
    /// A message carrying a template identifier goes out in template mode and
    /// needs nothing else. Without one, both a non-blank subject and a
    /// non-blank HTML body are required.
    fn build_request(&self, message: &EmailMessage) -> Result<MailSendRequest, SendGridError> {
        let from = message
            .from
            .as_deref()
            .ok_or_else(|| SendGridError::InvalidMessage("sender address missing".into()))?;
        let from = EmailAddress::new(from);
        let to = EmailAddress::new(&message.to);

        if let Some(template_id) = &message.template_id {
            return Ok(MailSendRequest::template(
                from,
                to,
                template_id,
                message.template_data.clone(),
            ));
        }

        let subject = message
            .subject
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                SendGridError::InvalidMessage("subject is required without a template".into())
            })?;
        let html = message
            .html_body
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                SendGridError::InvalidMessage("HTML body is required without a template".into())
            })?;

        let mut parts = Vec::with_capacity(2);
        if let Some(text) = message.text_body.as_deref().filter(|s| !s.trim().is_empty()) {
            parts.push(ContentPart::plain(text));
        }
        parts.push(ContentPart::html(html));

        Ok(MailSendRequest::content(from, to, subject, parts))
    }

    /// POST a request to the Mail Send API and interpret the response,
    /// capturing the queued message identifier when present.
    async fn send_mail(&self, request: &MailSendRequest) -> Result<SendReceipt, SendGridError> {
        let url = self.mail_send_url();

        debug!(
            templated = request.template_id.is_some(),
            "sending mail through SendGrid"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("SendGrid API rate limit hit");
            return Err(SendGridError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SendGridError::Api(format!("HTTP {status}: {body}")));
        }

        let message_id = response
            .headers()
            .get("x-message-id")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);

        Ok(SendReceipt {
            message_id,
            status: "queued".into(),
        })
    }
}

#[async_trait]
impl EmailTransport for SendGridTransport {
    #[instrument(skip(self, message), fields(to = %message.to, provider = "sendgrid"))]
    async fn send(&self, message: &EmailMessage) -> Result<SendReceipt, ProviderError> {
        let request = self.build_request(message)?;
        let receipt = self.send_mail(&request).await?;
        Ok(receipt)
    }

    #[instrument(skip(self), fields(provider = "sendgrid"))]
    async fn health_check(&self) -> Result<(), ProviderError> {
        let url = self.profile_url();

        debug!("performing SendGrid health check");

        // Any HTTP response (even 401) means the API is reachable. Only a
        // connection failure is an error.
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        debug!(status = %response.status(), "SendGrid health check response");

        Ok(())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Sendgrid
    }
}

#[cfg(test)]
mod tests {
    use mailroom_provider::{EmailTransport, ProviderError};
    use serde_json::{Map, Value};

    use super::*;
    use crate::config::SendGridConfig;

    /// A minimal mock HTTP server built on tokio that returns canned responses.
    struct MockSendGridServer {
        listener: tokio::net::TcpListener,
        base_url: String,
    }

    impl MockSendGridServer {
        async fn start() -> Self {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("failed to bind mock server");
            let port = listener.local_addr().unwrap().port();
            let base_url = format!("http://127.0.0.1:{port}");
            Self { listener, base_url }
        }

        /// Accept one connection and respond with the given status code and
        /// JSON body, then shut down.
        async fn respond_once(self, status_code: u16, body: &str) {
            let body = body.to_owned();
            let (mut stream, _) = self.listener.accept().await.unwrap();

            use tokio::io::{AsyncReadExt, AsyncWriteExt};

            // Read the full request (we don't parse it -- just drain it).
            let mut buf = vec![0u8; 8192];
            let _ = stream.read(&mut buf).await.unwrap();

            let response = format!(
                "HTTP/1.1 {status_code} OK\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\
                 \r\n\
                 {body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        }

        /// Accept one connection and respond with HTTP 202 carrying the queued
        /// message identifier header, then shut down.
        async fn respond_accepted(self, message_id: &str) {
            let message_id = message_id.to_owned();
            let (mut stream, _) = self.listener.accept().await.unwrap();

            use tokio::io::{AsyncReadExt, AsyncWriteExt};

            let mut buf = vec![0u8; 8192];
            let _ = stream.read(&mut buf).await.unwrap();

            let response = format!(
                "HTTP/1.1 202 Accepted\r\n\
                 X-Message-Id: {message_id}\r\n\
                 Content-Length: 0\r\n\
                 Connection: close\r\n\
                 \r\n"
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        }
    }

    fn template_message() -> EmailMessage {
        let mut data = Map::new();
        data.insert("parent_name".into(), Value::String("Dana".into()));
        EmailMessage::new("parent@example.com")
            .with_from("hello@storytailor.com")
            .with_template_id("d-4f2a1b")
            .with_template_data(data)
    }

    fn content_message() -> EmailMessage {
        EmailMessage::new("parent@example.com")
            .with_from("hello@storytailor.com")
            .with_subject("Your story is ready")
            .with_html_body("<p>Your story is ready.</p>")
            .with_text_body("Your story is ready.")
    }

    #[test]
    fn kind_is_sendgrid() {
        let config = SendGridConfig::new("SG.test-key");
        let transport = SendGridTransport::new(config);
        assert_eq!(transport.kind(), ProviderKind::Sendgrid);
    }

    #[tokio::test]
    async fn send_template_success() {
        let server = MockSendGridServer::start().await;
        let config = SendGridConfig::new("SG.test-key").with_api_base_url(&server.base_url);
        let transport = SendGridTransport::new(config);

        let server_handle = tokio::spawn(async move {
            server.respond_accepted("fQdt1kXhQ1achBflnDFlxw").await;
        });

        let receipt = transport.send(&template_message()).await;
        server_handle.await.unwrap();

        let receipt = receipt.expect("send should succeed");
        assert_eq!(receipt.message_id.as_deref(), Some("fQdt1kXhQ1achBflnDFlxw"));
        assert_eq!(receipt.status, "queued");
    }

    #[tokio::test]
    async fn send_content_success() {
        let server = MockSendGridServer::start().await;
        let config = SendGridConfig::new("SG.test-key").with_api_base_url(&server.base_url);
        let transport = SendGridTransport::new(config);

        let server_handle = tokio::spawn(async move {
            server.respond_once(202, "").await;
        });

        let receipt = transport.send(&content_message()).await;
        server_handle.await.unwrap();

        let receipt = receipt.expect("send should succeed");
        assert!(receipt.message_id.is_none());
        assert_eq!(receipt.status, "queued");
    }

    #[tokio::test]
    async fn send_rate_limited() {
        let server = MockSendGridServer::start().await;
        let config = SendGridConfig::new("SG.test-key").with_api_base_url(&server.base_url);
        let transport = SendGridTransport::new(config);

        let response_body = r#"{"errors":[{"message":"too many requests"}]}"#;
        let server_handle = tokio::spawn(async move {
            server.respond_once(429, response_body).await;
        });

        let err = transport.send(&template_message()).await.unwrap_err();
        server_handle.await.unwrap();

        assert!(matches!(err, ProviderError::RateLimited));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn send_api_error() {
        let server = MockSendGridServer::start().await;
        let config = SendGridConfig::new("SG.test-key").with_api_base_url(&server.base_url);
        let transport = SendGridTransport::new(config);

        let response_body =
            r#"{"errors":[{"message":"The from address does not match a verified Sender Identity"}]}"#;
        let server_handle = tokio::spawn(async move {
            server.respond_once(403, response_body).await;
        });

        let err = transport.send(&template_message()).await.unwrap_err();
        server_handle.await.unwrap();

        assert!(matches!(err, ProviderError::ExecutionFailed(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn send_without_subject_fails_before_any_request() {
        // Nothing is listening on this port, so reaching the network would
        // surface as a connection error instead.
        let config = SendGridConfig::new("SG.test-key").with_api_base_url("http://127.0.0.1:1");
        let transport = SendGridTransport::new(config);

        let message = EmailMessage::new("parent@example.com")
            .with_from("hello@storytailor.com")
            .with_html_body("<p>body</p>");

        let err = transport.send(&message).await.unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn send_without_html_fails_before_any_request() {
        let config = SendGridConfig::new("SG.test-key").with_api_base_url("http://127.0.0.1:1");
        let transport = SendGridTransport::new(config);

        let message = EmailMessage::new("parent@example.com")
            .with_from("hello@storytailor.com")
            .with_subject("Subject only");

        let err = transport.send(&message).await.unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
    }

    #[tokio::test]
    async fn send_blank_subject_is_rejected() {
        let config = SendGridConfig::new("SG.test-key").with_api_base_url("http://127.0.0.1:1");
        let transport = SendGridTransport::new(config);

        let message = EmailMessage::new("parent@example.com")
            .with_from("hello@storytailor.com")
            .with_subject("   ")
            .with_html_body("<p>body</p>");

        let err = transport.send(&message).await.unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
    }

    #[tokio::test]
    async fn send_without_sender_fails() {
        let config = SendGridConfig::new("SG.test-key").with_api_base_url("http://127.0.0.1:1");
        let transport = SendGridTransport::new(config);

        let message = EmailMessage::new("parent@example.com").with_template_id("d-4f2a1b");

        let err = transport.send(&message).await.unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
    }

    #[tokio::test]
    async fn template_mode_needs_no_subject_or_body() {
        let server = MockSendGridServer::start().await;
        let config = SendGridConfig::new("SG.test-key").with_api_base_url(&server.base_url);
        let transport = SendGridTransport::new(config);

        let message = EmailMessage::new("parent@example.com")
            .with_from("hello@storytailor.com")
            .with_template_id("d-4f2a1b");

        let server_handle = tokio::spawn(async move {
            server.respond_accepted("abc123").await;
        });

        let receipt = transport.send(&message).await;
        server_handle.await.unwrap();

        assert!(receipt.is_ok());
    }

    #[tokio::test]
    async fn health_check_success() {
        let server = MockSendGridServer::start().await;
        let config = SendGridConfig::new("SG.test-key").with_api_base_url(&server.base_url);
        let transport = SendGridTransport::new(config);

        // Even a 401 response means the API is reachable.
        let response_body = r#"{"errors":[{"message":"authorization required"}]}"#;
        let server_handle = tokio::spawn(async move {
            server.respond_once(401, response_body).await;
        });

        let result = transport.health_check().await;
        server_handle.await.unwrap();

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn health_check_connection_failure() {
        // Point to a port that nothing is listening on.
        let config = SendGridConfig::new("SG.test-key").with_api_base_url("http://127.0.0.1:1");
        let transport = SendGridTransport::new(config);

        let err = transport.health_check().await.unwrap_err();
        assert!(matches!(err, ProviderError::Connection(_)));
        assert!(err.is_retryable());
    }
}

//! Slack-compatible incoming webhook delivery
//!
//! One message is one POST: no retries, no redirects beyond the client
//! default. Anything other than status 200 is reported with the raw body.

use crate::config::NotifierConfig;
use crate::error::{HttpPhase, NotifierError};
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Content type of every webhook request.
pub const CONTENT_TYPE: &str = "application/json";

/// Webhook payload. `text` is the only field ever sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackMessage {
    pub text: String,
}

impl SlackMessage {
    /// Join message tokens with single spaces
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let text = tokens
            .iter()
            .map(|t| t.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        SlackMessage { text }
    }
}

/// A fully built webhook request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookRequest {
    pub url: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl WebhookRequest {
    /// JSON POST of `message` to `url`
    pub fn json(url: &str, message: &SlackMessage) -> Result<Self> {
        Ok(WebhookRequest {
            url: url.to_string(),
            content_type: CONTENT_TYPE.to_string(),
            body: serde_json::to_vec(message)?,
        })
    }
}

/// Status and fully read body of a webhook response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP transport used by [`WebhookSender`].
///
/// Implementations read the whole body before returning and report
/// failures as [`NotifierError::Http`] tagged with the failing phase.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn post(&self, request: &WebhookRequest) -> Result<WebhookResponse>;
}

/// `reqwest`-backed transport with a bounded request timeout.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &NotifierConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.webhook_timeout)
            .build()?;
        Ok(ReqwestTransport { client })
    }
}

#[async_trait]
impl WebhookTransport for ReqwestTransport {
    async fn post(&self, request: &WebhookRequest) -> Result<WebhookResponse> {
        let response = self
            .client
            .post(&request.url)
            .header(reqwest::header::CONTENT_TYPE, request.content_type.as_str())
            .body(request.body.clone())
            .send()
            .await
            .map_err(|e| NotifierError::Http {
                phase: HttpPhase::Post,
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| NotifierError::Http {
            phase: HttpPhase::ReadBody,
            message: e.to_string(),
        })?;

        Ok(WebhookResponse { status, body })
    }
}

/// Sends text messages to incoming webhooks
#[derive(Clone)]
pub struct WebhookSender {
    transport: Arc<dyn WebhookTransport>,
}

impl WebhookSender {
    pub fn new(transport: Arc<dyn WebhookTransport>) -> Self {
        WebhookSender { transport }
    }

    /// Sender using a real HTTP client
    pub fn from_config(config: &NotifierConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(config)?)))
    }

    /// Post `tokens`, space-joined, as `{"text": ...}` to `url`.
    pub async fn send<S: AsRef<str> + Sync>(&self, url: &str, tokens: &[S]) -> Result<()> {
        let message = SlackMessage::from_tokens(tokens);
        let request = WebhookRequest::json(url, &message)?;
        debug!("Posting {} bytes to webhook", request.body.len());

        let response = self.transport.post(&request).await?;
        if response.status != 200 {
            warn!("Webhook answered with status {}", response.status);
            return Err(NotifierError::BadStatus {
                code: response.status,
                body: response.body,
            });
        }

        info!("Webhook message delivered");
        Ok(())
    }
}

/// Shell alias that sends to a fixed webhook, e.g.
/// `alias ping='n slack https://hooks.example/abc'`.
pub fn shell_alias(alias: &str, program: &str, url: &str) -> String {
    let command = format!("{} slack {}", program, url);
    format!("alias {}='{}'", alias, command.replace('\'', r"'\''"))
}

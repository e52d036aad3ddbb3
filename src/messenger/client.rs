//! Messenger Send API client.
//!
//! Sends are fire-and-forget from the caller's side: every failure is logged
//! and reported as a `SendOutcome`, never as an error.

use crate::config::MessengerConfig;
use crate::messenger::models::{ButtonMessage, SendOutcome, TextMessage};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;

/// Trait for sending Messenger replies - enables mocking for tests.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Sends a plain text reply.
    async fn send_text(&self, recipient_id: &str, text: &str) -> SendOutcome;

    /// Sends a text with one call-to-action button linking to `button_url`.
    async fn send_button_message(
        &self,
        recipient_id: &str,
        text: &str,
        button_title: &str,
        button_url: &str,
    ) -> SendOutcome;
}

/// Graph API client bound to one page access token.
///
/// Each send opens its own HTTP client; nothing is pooled between sends.
pub struct MessengerClient {
    config: MessengerConfig,
}

impl MessengerClient {
    pub fn new(config: &MessengerConfig) -> Self {
        Self { config: config.clone() }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/me/messages",
            self.config.graph_base.trim_end_matches('/'),
            self.config.api_version
        )
    }

    /// Page token as configured, or the reason there is none.
    ///
    /// Whitespace only matters for the emptiness and placeholder checks.
    fn page_token(&self) -> Result<&str, String> {
        let Some(token) = self.config.page_access_token.as_deref() else {
            return Err("FB_PAGE_ACCESS_TOKEN is not set".to_string());
        };

        let trimmed = token.trim();
        if trimmed.is_empty() {
            Err("FB_PAGE_ACCESS_TOKEN is not set".to_string())
        } else if trimmed.starts_with("placeholder") {
            Err("FB_PAGE_ACCESS_TOKEN is a placeholder".to_string())
        } else {
            Ok(token)
        }
    }

    async fn post<T: Serialize + Sync>(&self, payload: &T, kind: &str) -> SendOutcome {
        let token = match self.page_token() {
            Ok(token) => token,
            Err(reason) => {
                info!("{}, skipping {} send", reason, kind);
                return SendOutcome::Skipped { reason };
            }
        };

        let client = match Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
        {
            Ok(client) => client,
            Err(e) => return transport_failure(kind, e),
        };

        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(e) => return SendOutcome::Failed { status: None, body: e.to_string() },
        };

        let url = format!("{}?access_token={}", self.messages_url(), urlencoding::encode(token));
        debug!("POST {}", self.messages_url());

        let response = match client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return transport_failure(kind, e),
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!("Error sending {} message: {}\n{}", kind, status, text);
            return SendOutcome::Failed { status: Some(status.as_u16()), body: text };
        }

        info!("{} message sent to Messenger", kind);
        let response = serde_json::from_str(&text).unwrap_or(Value::String(text));
        SendOutcome::Sent { response }
    }
}

/// A send that produced no HTTP response.
fn transport_failure(kind: &str, err: impl std::fmt::Display) -> SendOutcome {
    warn!("Error sending {} message: {}", kind, err);
    SendOutcome::Failed { status: None, body: err.to_string() }
}

#[async_trait]
impl MessageSender for MessengerClient {
    async fn send_text(&self, recipient_id: &str, text: &str) -> SendOutcome {
        let preview: String = text.chars().take(100).collect();
        info!("Sending message to user {}: '{}'", recipient_id, preview);

        self.post(&TextMessage::response(recipient_id, text), "text").await
    }

    async fn send_button_message(
        &self,
        recipient_id: &str,
        text: &str,
        button_title: &str,
        button_url: &str,
    ) -> SendOutcome {
        info!("Sending button message to user {}", recipient_id);

        let message = ButtonMessage::web_url(recipient_id, text, button_title, button_url);
        self.post(&message, "button").await
    }
}

//! Send API payloads and the outcome of a send attempt.

use serde::Serialize;
use serde_json::Value;

/// Hard limit Messenger puts on button template text.
pub const MAX_BUTTON_TEXT_CHARS: usize = 640;

const ELLIPSIS: &str = "...";

/// Result of a send attempt. Sending never fails past the client boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum SendOutcome {
    /// Graph API accepted the message; holds its response body.
    Sent { response: Value },
    /// Nothing was sent because the client is not configured.
    Skipped { reason: String },
    /// The request was made but did not succeed. `status` is None when no
    /// response arrived.
    Failed { status: Option<u16>, body: String },
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SendOutcome::Sent { .. })
    }

    /// Graph API response for a delivered message.
    pub fn response(&self) -> Option<&Value> {
        match self {
            SendOutcome::Sent { response } => Some(response),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Recipient<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextMessage<'a> {
    pub recipient: Recipient<'a>,
    pub message: TextBody<'a>,
    pub messaging_type: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextBody<'a> {
    pub text: &'a str,
}

impl<'a> TextMessage<'a> {
    pub fn response(recipient_id: &'a str, text: &'a str) -> Self {
        Self {
            recipient: Recipient { id: recipient_id },
            message: TextBody { text },
            messaging_type: "RESPONSE",
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ButtonMessage<'a> {
    pub recipient: Recipient<'a>,
    pub message: AttachmentBody<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AttachmentBody<'a> {
    pub attachment: Attachment<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Attachment<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub payload: ButtonTemplate<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ButtonTemplate<'a> {
    pub template_type: &'static str,
    pub text: String,
    pub buttons: Vec<WebUrlButton<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WebUrlButton<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub url: &'a str,
    pub title: &'a str,
}

impl<'a> ButtonMessage<'a> {
    /// Single `web_url` call-to-action under a text that fits the template limit.
    pub fn web_url(recipient_id: &'a str, text: &str, title: &'a str, url: &'a str) -> Self {
        Self {
            recipient: Recipient { id: recipient_id },
            message: AttachmentBody {
                attachment: Attachment {
                    kind: "template",
                    payload: ButtonTemplate {
                        template_type: "button",
                        text: truncate_text(text, MAX_BUTTON_TEXT_CHARS),
                        buttons: vec![WebUrlButton { kind: "web_url", url, title }],
                    },
                },
            },
        }
    }
}

/// Cuts `text` to at most `max_chars` characters, ending in "..." when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

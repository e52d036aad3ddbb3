//! Messenger send command.

use crate::config::Config;
use crate::format::Formatter;
use crate::messenger::{MessageSender, MessengerClient, SendOutcome};

/// Call-to-action button attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub title: String,
    pub url: String,
}

/// Sends one Messenger reply.
pub struct MessageCommand {
    config: Config,
}

impl MessageCommand {
    /// Creates a new message command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Sends the reply and returns the formatted outcome with it.
    pub async fn execute(
        &self,
        recipient_id: &str,
        text: &str,
        button: Option<&Button>,
    ) -> (SendOutcome, String) {
        let client = MessengerClient::new(&self.config.messenger);
        self.execute_with_client(&client, recipient_id, text, button).await
    }

    /// Sends the reply with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl MessageSender,
        recipient_id: &str,
        text: &str,
        button: Option<&Button>,
    ) -> (SendOutcome, String) {
        let outcome = match button {
            Some(b) => client.send_button_message(recipient_id, text, &b.title, &b.url).await,
            None => client.send_text(recipient_id, text).await,
        };

        let output = Formatter::new(self.config.format).format_send(&outcome);
        (outcome, output)
    }
}

//! Messenger Send API: text and button replies to a single user.

pub mod client;
pub mod models;

pub use client::{MessageSender, MessengerClient};
pub use models::{truncate_text, SendOutcome, MAX_BUTTON_TEXT_CHARS};

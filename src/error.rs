//! Error type for the eBay Browse API client.
//!
//! Only the marketplace client surfaces errors to its caller. The messenger
//! and sold-listings clients report failures through their outcome types.

use thiserror::Error;

/// Failures from token exchange and Browse API searches.
#[derive(Debug, Error)]
pub enum EbayError {
    /// A required credential is not configured.
    #[error("eBay configuration error: {0}")]
    Configuration(String),

    /// eBay answered with a non-2xx status.
    #[error("eBay request failed with status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced a response.
    #[error("eBay request could not be sent: {0}")]
    Transport(String),

    /// The response body was not the JSON we expected.
    #[error("Failed to decode eBay response: {0}")]
    Decode(String),

    /// The token endpoint answered 2xx without an `access_token`.
    #[error("eBay token response did not contain an access_token")]
    MissingToken,
}

impl EbayError {
    /// HTTP status of an upstream failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            EbayError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<wreq::Error> for EbayError {
    fn from(err: wreq::Error) -> Self {
        EbayError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for EbayError {
    fn from(err: serde_json::Error) -> Self {
        EbayError::Decode(err.to_string())
    }
}

//! Auth gateway error types.

use thiserror::Error;

use crate::forms::FormErrors;
use crate::session::RequestInFlight;

/// Errors from a single call to the auth API.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed before a response arrived.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint URL could not be built from the base URL.
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// Non-2xx status. `message` comes from the body when it had one.
    #[error("API error: {status}{}", suffix(.message.as_deref(), " - "))]
    Status { status: u16, message: Option<String> },

    /// 2xx response whose envelope reported `success: false`.
    #[error("request rejected{}", suffix(.0.as_deref(), ": "))]
    Rejected(Option<String>),

    /// Successful envelope without the expected `data`.
    #[error("response from {0} carried no data")]
    MissingData(&'static str),

    /// Response body was not valid JSON of the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

fn suffix(message: Option<&str>, sep: &str) -> String {
    message.map(|m| format!("{sep}{m}")).unwrap_or_default()
}

impl GatewayError {
    /// Message supplied by the server, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } | Self::Rejected(message) => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }

    /// Whether this failure points at the server or the network rather
    /// than at the user's input.
    #[must_use]
    pub const fn is_unexpected(&self) -> bool {
        match self {
            Self::Http(_) | Self::Url(_) | Self::MissingData(_) | Self::Parse(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Rejected(_) => false,
        }
    }
}

/// Errors returned by [`AuthService`](super::AuthService) operations.
///
/// Every variant except `Busy` has also been written to the session error
/// field by the time it is returned.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input failed client-side validation.
    #[error("{0}")]
    Invalid(#[from] FormErrors),

    /// The auth API call failed.
    #[error("{message}")]
    Gateway {
        message: String,
        #[source]
        source: GatewayError,
    },

    /// Another auth request is still running.
    #[error("a request is already in progress")]
    Busy(#[from] RequestInFlight),

    /// No email is waiting for OTP verification.
    #[error("no pending email; sign up or request a password reset first")]
    NoPendingEmail,

    /// No refresh token is held.
    #[error("not signed in")]
    NotSignedIn,
}

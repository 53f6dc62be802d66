//! Auth API wire types: users, tokens and the response envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::{AuthSessionId, UserId};
use super::status::UserStatus;

/// An account as returned by the auth API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub full_name: String,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

/// Server-side session record returned on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSession {
    pub id: AuthSessionId,
    pub expires_at: DateTime<Utc>,
}

/// Access/refresh token pair with expiries.
///
/// Implements `Debug` manually to redact the token strings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
    pub access_token_expires_at: DateTime<Utc>,
    pub refresh_token_expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for Tokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokens")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("access_token_expires_at", &self.access_token_expires_at)
            .field("refresh_token_expires_at", &self.refresh_token_expires_at)
            .finish()
    }
}

/// Payload of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginData {
    pub user: User,
    pub session: RemoteSession,
    pub tokens: Tokens,
}

/// Payload of a successful token refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshData {
    pub tokens: Tokens,
}

/// Envelope wrapping every auth API response.
///
/// `data` is absent for message-only endpoints. `timestamp` is recorded by
/// the server and kept as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default)]
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn ok(data: T, timestamp: impl Into<String>) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            timestamp: timestamp.into(),
        }
    }

    /// Rejection with a user-facing message.
    pub fn rejected(message: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            timestamp: timestamp.into(),
        }
    }
}

/// Structured error body some endpoints return instead of the plain
/// envelope (`{"success": false, "error": {...}}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub success: bool,
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorDetail {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_login_envelope_parses() {
        let body = json!({
            "success": true,
            "message": "Login successful",
            "data": {
                "user": {
                    "id": "u-1",
                    "email": "ranger@council.example",
                    "fullName": "Pat Ranger",
                    "status": "active",
                    "createdAt": "2025-01-01T00:00:00.000Z"
                },
                "session": { "id": "s-1", "expiresAt": "2025-01-08T00:00:00Z" },
                "tokens": {
                    "accessToken": "a",
                    "refreshToken": "r",
                    "accessTokenExpiresAt": "2025-01-01T01:00:00Z",
                    "refreshTokenExpiresAt": "2025-01-08T00:00:00Z"
                }
            },
            "timestamp": "2025-01-01T00:00:00Z"
        });

        let parsed: ApiResponse<LoginData> = serde_json::from_value(body).unwrap();
        let data = parsed.data.unwrap();
        assert_eq!(data.user.full_name, "Pat Ranger");
        assert_eq!(data.user.status, UserStatus::Active);
        assert_eq!(data.tokens.refresh_token, "r");
    }

    #[test]
    fn test_rejection_without_data_or_timestamp() {
        let parsed: ApiResponse<LoginData> =
            serde_json::from_value(json!({"success": false, "message": "Invalid credentials"}))
                .unwrap();
        assert!(!parsed.success);
        assert!(parsed.data.is_none());
        assert_eq!(parsed.message.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_tokens_debug_is_redacted() {
        let tokens = Tokens {
            access_token: "super-secret-access".to_string(),
            refresh_token: "super-secret-refresh".to_string(),
            access_token_expires_at: Utc::now(),
            refresh_token_expires_at: Utc::now(),
        };
        let debug = format!("{tokens:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }
}

//! Integration test support for Pawtrack.
//!
//! [`StubAuthServer`] runs an in-process `axum` server that speaks the auth
//! API's JSON envelope well enough to drive the real `reqwest` client end
//! to end. It keeps accounts in memory, accepts the fixed OTP
//! [`STUB_OTP`], rotates refresh tokens and records every request.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pawtrack-integration-tests
//! ```

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::post;
use axum::{Json, Router};
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use pawtrack_admin::ApiConfig;

/// The only code the stub accepts for verification and password reset.
pub const STUB_OTP: &str = "123456";

/// One request received by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Action segment after `/api/auth/` (e.g. `user-login`).
    pub action: String,
    pub body: Value,
    pub bearer: Option<String>,
}

#[derive(Debug, Clone)]
struct Account {
    full_name: String,
    password: String,
    verified: bool,
}

#[derive(Debug, Default)]
struct StubState {
    accounts: HashMap<String, Account>,
    refresh_tokens: HashSet<String>,
    access_tokens: HashSet<String>,
    reset_email: Option<String>,
    issued: u32,
    fail_logout: bool,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<StubState>>;

fn lock(state: &Shared) -> MutexGuard<'_, StubState> {
    state
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// In-process auth API.
pub struct StubAuthServer {
    addr: SocketAddr,
    state: Shared,
    handle: JoinHandle<()>,
}

impl StubAuthServer {
    /// Bind an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let state = Shared::default();
        let app = Router::new()
            .route("/api/auth/{action}", post(handle))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub auth server");
        let addr = listener.local_addr().expect("Stub server has no address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Base URL of the API, including the `/api` prefix.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Client configuration pointing at this server.
    ///
    /// # Panics
    ///
    /// Panics if the base URL is rejected (it never is).
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(&self.base_url(), Duration::from_secs(5)).expect("Stub base URL is valid")
    }

    /// Add a verified account.
    pub fn add_account(&self, email: &str, password: &str, full_name: &str) {
        lock(&self.state).accounts.insert(
            email.to_string(),
            Account {
                full_name: full_name.to_string(),
                password: password.to_string(),
                verified: true,
            },
        );
    }

    /// Make `/auth/logout` answer 500.
    pub fn fail_logout(&self, fail: bool) {
        lock(&self.state).fail_logout = fail;
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state).requests.clone()
    }

    /// The most recent request for `action`.
    #[must_use]
    pub fn last_request(&self, action: &str) -> Option<RecordedRequest> {
        lock(&self.state)
            .requests
            .iter()
            .rev()
            .find(|r| r.action == action)
            .cloned()
    }

    #[must_use]
    pub fn password_of(&self, email: &str) -> Option<String> {
        lock(&self.state)
            .accounts
            .get(email)
            .map(|a| a.password.clone())
    }
}

impl Drop for StubAuthServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle(
    State(state): State<Shared>,
    Path(action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned);

    let mut state = lock(&state);
    state.requests.push(RecordedRequest {
        action: action.clone(),
        body: body.clone(),
        bearer: bearer.clone(),
    });

    let (status, value) = dispatch(&mut state, &action, &body, bearer.as_deref());
    (status, Json(value))
}

fn field<'a>(body: &'a Value, key: &str) -> &'a str {
    body.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

fn message(text: &str) -> (StatusCode, Value) {
    (
        StatusCode::OK,
        json!({ "success": true, "message": text, "timestamp": timestamp() }),
    )
}

fn envelope_error(status: StatusCode, text: &str) -> (StatusCode, Value) {
    (
        status,
        json!({ "success": false, "message": text, "timestamp": timestamp() }),
    )
}

fn error_body(status: StatusCode, text: &str) -> (StatusCode, Value) {
    (
        status,
        json!({
            "success": false,
            "error": {
                "type": "AuthError",
                "message": text,
                "statusCode": status.as_u16(),
                "requestId": "req-stub"
            }
        }),
    )
}

fn user_json(email: &str, account: &Account) -> Value {
    json!({
        "id": format!("user-{email}"),
        "email": email,
        "fullName": account.full_name,
        "status": if account.verified { "active" } else { "inactive" },
        "createdAt": "2025-01-01T00:00:00Z"
    })
}

fn issue_tokens(state: &mut StubState) -> Value {
    state.issued += 1;
    let access = format!("access-{}", state.issued);
    let refresh = format!("refresh-{}", state.issued);
    state.access_tokens.insert(access.clone());
    state.refresh_tokens.insert(refresh.clone());
    let now = Utc::now();
    json!({
        "accessToken": access,
        "refreshToken": refresh,
        "accessTokenExpiresAt": (now + ChronoDuration::minutes(15)).to_rfc3339(),
        "refreshTokenExpiresAt": (now + ChronoDuration::days(7)).to_rfc3339()
    })
}

fn dispatch(
    state: &mut StubState,
    action: &str,
    body: &Value,
    bearer: Option<&str>,
) -> (StatusCode, Value) {
    let email = field(body, "email").to_string();
    match action {
        "user-register" => {
            if state.accounts.contains_key(&email) {
                return envelope_error(StatusCode::CONFLICT, "User already exists");
            }
            state.accounts.insert(
                email,
                Account {
                    full_name: field(body, "fullName").to_string(),
                    password: field(body, "password").to_string(),
                    verified: false,
                },
            );
            message("Registration successful. Please verify your email.")
        }
        "user-verify" => match state.accounts.get_mut(&email) {
            Some(account) if field(body, "otp") == STUB_OTP => {
                account.verified = true;
                message("Email verified successfully")
            }
            _ => error_body(StatusCode::BAD_REQUEST, "Invalid or expired OTP"),
        },
        "resend-verification-otp" => message("Verification code sent"),
        "user-login" => match state.accounts.get(&email).cloned() {
            Some(account) if account.password == field(body, "password") => {
                if !account.verified {
                    return error_body(StatusCode::FORBIDDEN, "Please verify your email first");
                }
                let tokens = issue_tokens(state);
                (
                    StatusCode::OK,
                    json!({
                        "success": true,
                        "message": "Login successful",
                        "data": {
                            "user": user_json(&email, &account),
                            "session": {
                                "id": format!("session-{}", state.issued),
                                "expiresAt": (Utc::now() + ChronoDuration::days(7)).to_rfc3339()
                            },
                            "tokens": tokens
                        },
                        "timestamp": timestamp()
                    }),
                )
            }
            _ => error_body(StatusCode::UNAUTHORIZED, "Invalid credentials"),
        },
        "forgot-password" => {
            if state.accounts.contains_key(&email) {
                message("Password reset code sent to your email")
            } else {
                error_body(StatusCode::NOT_FOUND, "User not found")
            }
        }
        "verify-forgot-password-otp" => {
            if state.accounts.contains_key(&email) && field(body, "otp") == STUB_OTP {
                state.reset_email = Some(email);
                message("OTP verified")
            } else {
                error_body(StatusCode::BAD_REQUEST, "Invalid or expired OTP")
            }
        }
        "reset-password" => match state.reset_email.take() {
            Some(email) => {
                if let Some(account) = state.accounts.get_mut(&email) {
                    account.password = field(body, "newPassword").to_string();
                }
                message("Password reset successfully")
            }
            // Some deployments answer 200 with `success: false`.
            None => envelope_error(StatusCode::OK, "Reset session expired"),
        },
        "refresh-token" => {
            let presented = field(body, "refreshToken").to_string();
            if state.refresh_tokens.remove(&presented) {
                let tokens = issue_tokens(state);
                (
                    StatusCode::OK,
                    json!({ "success": true, "data": { "tokens": tokens }, "timestamp": timestamp() }),
                )
            } else {
                error_body(StatusCode::UNAUTHORIZED, "Invalid refresh token")
            }
        }
        "logout" => {
            if state.fail_logout {
                return envelope_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
            }
            match bearer {
                Some(token) if state.access_tokens.remove(token) => message("Logged out"),
                _ => error_body(StatusCode::UNAUTHORIZED, "Not authenticated"),
            }
        }
        _ => error_body(StatusCode::NOT_FOUND, "Unknown endpoint"),
    }
}

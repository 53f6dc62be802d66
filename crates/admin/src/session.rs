//! Session store: current user, tokens, loading and error flags.
//!
//! The store is an explicit context object owned by the caller (the CLI or
//! a test) rather than a process-wide singleton. Every mutation that
//! touches persisted data is mirrored to [`DurableStorage`] under the keys
//! in [`keys`]. Storage failures are logged and never block a local state
//! transition: local state is authoritative.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use pawtrack_core::{Tokens, User};

use crate::storage::DurableStorage;

/// Durable storage keys.
pub mod keys {
    /// Access token string.
    pub const ACCESS_TOKEN: &str = "accessToken";

    /// Refresh token string.
    pub const REFRESH_TOKEN: &str = "refreshToken";

    /// JSON-encoded current user.
    pub const USER: &str = "user";

    /// Email carried from signup / forgot-password to OTP verification.
    pub const PENDING_EMAIL: &str = "userEmail";
}

/// Token slots. Any of them may be empty (restore only recovers the two
/// token strings, not their expiries).
///
/// Implements `Debug` manually to redact the token strings.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenState {
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub access_token_expires_at: Option<DateTime<Utc>>,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for TokenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |t: &Option<String>| t.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("TokenState")
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .field("access_token_expires_at", &self.access_token_expires_at)
            .field("refresh_token_expires_at", &self.refresh_token_expires_at)
            .finish()
    }
}

impl From<Tokens> for TokenState {
    fn from(tokens: Tokens) -> Self {
        Self {
            access_token: Some(tokens.access_token),
            refresh_token: Some(tokens.refresh_token),
            access_token_expires_at: Some(tokens.access_token_expires_at),
            refresh_token_expires_at: Some(tokens.refresh_token_expires_at),
        }
    }
}

/// Snapshot of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub tokens: TokenState,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Set when the session came from storage and has not been confirmed
    /// by the auth API since (login or refresh clears it).
    pub provisional: bool,
}

/// Coarse lifecycle state derived from [`SessionState`].
///
/// An error message is an overlay on `Anonymous` / `Authenticating`; read
/// it with [`SessionStore::error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Anonymous,
    Authenticating,
    Authenticated,
}

/// Result of [`SessionStore::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// User and both tokens were found and loaded.
    Restored,
    /// Nothing (or only part of a session) was stored.
    Empty,
    /// Stored user data was unreadable; the keys were purged.
    Purged,
}

/// Returned by [`SessionStore::begin_request`] when a request is already in
/// flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a request is already in progress")]
pub struct RequestInFlight;

/// Session store bound to a storage backend.
#[derive(Debug)]
pub struct SessionStore<S> {
    state: SessionState,
    storage: S,
}

impl<S: DurableStorage> SessionStore<S> {
    /// Create an empty (anonymous) store. Call [`restore`](Self::restore)
    /// to load a persisted session.
    pub fn new(storage: S) -> Self {
        Self {
            state: SessionState::default(),
            storage,
        }
    }

    /// Create a store and immediately restore from storage.
    pub fn restored(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.restore();
        store
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.state.is_authenticated {
            SessionStatus::Authenticated
        } else if self.state.is_loading {
            SessionStatus::Authenticating
        } else {
            SessionStatus::Anonymous
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.state.tokens.access_token.as_deref()
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.state.tokens.refresh_token.as_deref()
    }

    /// Load a persisted session without contacting the auth API.
    ///
    /// Requires the user and both tokens; empty values count as missing.
    /// Unparseable user JSON purges the three session keys and leaves the
    /// store anonymous.
    pub fn restore(&mut self) -> RestoreOutcome {
        let present = |v: &String| !v.is_empty();
        let user_json = self.read(keys::USER).filter(present);
        let access = self.read(keys::ACCESS_TOKEN).filter(present);
        let refresh = self.read(keys::REFRESH_TOKEN).filter(present);

        let (Some(user_json), Some(access), Some(refresh)) = (user_json, access, refresh) else {
            debug!("No complete session in storage");
            return RestoreOutcome::Empty;
        };

        match serde_json::from_str::<User>(&user_json) {
            Ok(user) => {
                info!(user_id = %user.id, "Restored session from storage");
                self.state.user = Some(user);
                self.state.is_authenticated = true;
                self.state.tokens.access_token = Some(access);
                self.state.tokens.refresh_token = Some(refresh);
                self.state.provisional = true;
                RestoreOutcome::Restored
            }
            Err(e) => {
                warn!(error = %e, "Stored user is unreadable, clearing session keys");
                self.purge_session_keys();
                RestoreOutcome::Purged
            }
        }
    }

    /// Mark a request as started: sets the loading flag and clears any
    /// previous error. The returned guard clears the loading flag when it
    /// is dropped, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`RequestInFlight`] if another request already holds the
    /// loading flag.
    pub fn begin_request(&mut self) -> Result<LoadingGuard<'_, S>, RequestInFlight> {
        if self.state.is_loading {
            return Err(RequestInFlight);
        }
        self.state.is_loading = true;
        self.state.error = None;
        Ok(LoadingGuard { store: self })
    }

    /// Record a user-facing error. Also clears the loading flag.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state.error = Some(message.into());
        self.state.is_loading = false;
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    /// Take the pending error, leaving none behind (show-once semantics).
    pub fn take_error(&mut self) -> Option<String> {
        self.state.error.take()
    }

    /// Store the user and tokens from a successful login.
    pub fn login_success(&mut self, user: User, tokens: Tokens) {
        let user_json = serde_json::to_string(&user);
        self.write(keys::ACCESS_TOKEN, &tokens.access_token);
        self.write(keys::REFRESH_TOKEN, &tokens.refresh_token);
        match user_json {
            Ok(json) => self.write(keys::USER, &json),
            Err(e) => warn!(error = %e, "Could not encode user for storage"),
        }

        info!(user_id = %user.id, "Session authenticated");
        self.state.user = Some(user);
        self.state.is_authenticated = true;
        self.state.tokens = tokens.into();
        self.state.is_loading = false;
        self.state.error = None;
        self.state.provisional = false;
    }

    /// Replace the token pair after a refresh. User and authenticated flag
    /// are left untouched.
    pub fn update_tokens(&mut self, tokens: Tokens) {
        self.write(keys::ACCESS_TOKEN, &tokens.access_token);
        self.write(keys::REFRESH_TOKEN, &tokens.refresh_token);
        self.state.tokens = tokens.into();
        self.state.provisional = false;
        debug!("Session tokens replaced");
    }

    /// Replace the current user (e.g. after a profile change).
    pub fn update_user(&mut self, user: User) {
        match serde_json::to_string(&user) {
            Ok(json) => self.write(keys::USER, &json),
            Err(e) => warn!(error = %e, "Could not encode user for storage"),
        }
        self.state.user = Some(user);
    }

    /// Clear the session locally and in storage. Never fails.
    pub fn logout(&mut self) {
        self.state = SessionState::default();
        self.purge_session_keys();
        info!("Session cleared");
    }

    /// Remember the email awaiting OTP verification.
    pub fn set_pending_email(&mut self, email: &str) {
        self.write(keys::PENDING_EMAIL, email);
    }

    #[must_use]
    pub fn pending_email(&self) -> Option<String> {
        self.read(keys::PENDING_EMAIL).filter(|e| !e.is_empty())
    }

    pub fn clear_pending_email(&mut self) {
        self.delete(keys::PENDING_EMAIL);
    }

    fn purge_session_keys(&mut self) {
        self.delete(keys::USER);
        self.delete(keys::ACCESS_TOKEN);
        self.delete(keys::REFRESH_TOKEN);
    }

    fn read(&self, key: &str) -> Option<String> {
        self.storage.get(key).unwrap_or_else(|e| {
            warn!(key, error = %e, "Storage read failed");
            None
        })
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            warn!(key, error = %e, "Storage write failed");
        }
    }

    fn delete(&mut self, key: &str) {
        if let Err(e) = self.storage.remove(key) {
            warn!(key, error = %e, "Storage delete failed");
        }
    }
}

/// Scope guard returned by [`SessionStore::begin_request`].
///
/// Dereferences to the store so the outcome can be recorded through it.
#[derive(Debug)]
pub struct LoadingGuard<'a, S: DurableStorage> {
    store: &'a mut SessionStore<S>,
}

impl<S: DurableStorage> std::ops::Deref for LoadingGuard<'_, S> {
    type Target = SessionStore<S>;

    fn deref(&self) -> &Self::Target {
        self.store
    }
}

impl<S: DurableStorage> std::ops::DerefMut for LoadingGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.store
    }
}

impl<S: DurableStorage> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        self.store.state.is_loading = false;
    }
}

//! Unified error handling for admin.

use thiserror::Error;

use pawtrack_core::{AnimalId, BreedError, User};

use crate::config::ConfigError;
use crate::forms::FormErrors;
use crate::services::auth::{AuthError, GatewayError};
use crate::storage::StorageError;

/// Application-level error type for admin front ends.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Durable storage could not be opened or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// An auth operation failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// A raw auth API call failed (logout).
    #[error("Auth API error: {0}")]
    Gateway(#[from] GatewayError),

    /// Form input did not validate.
    #[error("Invalid input: {0}")]
    Invalid(#[from] FormErrors),

    /// Unknown breed code.
    #[error("{0}")]
    Breed(#[from] BreedError),

    /// No record with this id.
    #[error("Not found: {0}")]
    NotFound(AnimalId),

    /// Bad request from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the error points at the environment (network, server,
    /// filesystem) rather than at user input.
    #[must_use]
    pub fn is_unexpected(&self) -> bool {
        match self {
            Self::Storage(_) => true,
            Self::Gateway(e)
            | Self::Auth(AuthError::Gateway { source: e, .. }) => e.is_unexpected(),
            _ => false,
        }
    }

    /// Message safe to show to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Storage(_) => "Could not access local session storage".to_string(),
            Self::Gateway(e) if e.is_unexpected() => "Auth service unavailable".to_string(),
            _ => self.to_string(),
        }
    }

    /// Report unexpected errors to Sentry and log them. Returns whether
    /// anything was reported.
    pub fn capture(&self) -> bool {
        if !self.is_unexpected() {
            return false;
        }
        let event_id = sentry::capture_error(self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "{}",
            self.user_message()
        );
        true
    }
}

/// Set the Sentry user context from a signed-in user.
pub fn set_sentry_user(user: &User) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user.id.to_string()),
            email: Some(user.email.as_str().to_string()),
            username: Some(user.full_name.clone()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

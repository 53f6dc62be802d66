//! Auth gateway.
//!
//! [`AuthService`] wraps the remote auth API and keeps the
//! [`SessionStore`] in step with every call: the loading flag is held for
//! the duration of the request, failures land in the session error field
//! and successes update the user, tokens and pending-verification email.
//!
//! The transport sits behind [`AuthApi`] so the gateway can be exercised
//! without a network; [`HttpAuthApi`] is the production implementation.

mod client;
mod error;
mod types;

pub use client::HttpAuthApi;
pub use error::{AuthError, GatewayError};
pub use types::*;

use std::future::Future;

use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{error, info, instrument, warn};

use pawtrack_core::{ApiResponse, LoginData, OtpPurpose, RefreshData, User};

use crate::forms::{
    FormErrors, ForgotPasswordForm, LoginForm, OtpForm, ResetPasswordForm, SignupForm,
};
use crate::session::SessionStore;
use crate::storage::DurableStorage;

/// Transport for auth API calls.
///
/// Implementations return the decoded envelope for 2xx responses and a
/// [`GatewayError`] for anything else. Checking `success` is left to the
/// caller.
pub trait AuthApi {
    /// POST `body` to `endpoint`, attaching `bearer` as a bearer token when
    /// present.
    fn post<B, T>(
        &self,
        endpoint: Endpoint,
        body: &B,
        bearer: Option<&str>,
    ) -> impl Future<Output = Result<ApiResponse<T>, GatewayError>> + Send
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;
}

/// Auth gateway bound to an API transport and a session store.
pub struct AuthService<'a, A, S> {
    api: &'a A,
    session: &'a mut SessionStore<S>,
}

impl<'a, A: AuthApi, S: DurableStorage> AuthService<'a, A, S> {
    #[must_use]
    pub const fn new(api: &'a A, session: &'a mut SessionStore<S>) -> Self {
        Self { api, session }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore<S> {
        self.session
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a new (inactive) account and remember its email for OTP
    /// verification.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Invalid` for bad input, `AuthError::Gateway` if
    /// the API rejects the registration.
    #[instrument(skip_all)]
    pub async fn signup(&mut self, form: &SignupForm) -> Result<String, AuthError> {
        let request = self.validated(form.validate())?;
        let response: ApiResponse<IgnoredAny> = self.call(Endpoint::Register, &request).await?;

        self.session.set_pending_email(request.email.as_str());
        info!(email = %request.email, "Registration accepted, awaiting verification");
        Ok(message_or(response.message, "Registration successful. Check your email for the code."))
    }

    /// Verify the pending email with the emailed code.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NoPendingEmail` if no signup is awaiting
    /// verification, `AuthError::Gateway` if the code is rejected.
    #[instrument(skip_all)]
    pub async fn verify(&mut self, form: &OtpForm) -> Result<String, AuthError> {
        let email = self.pending_email()?;
        let otp = self.validated(form.validate())?;
        let request = OtpRequest { otp, email };
        let response: ApiResponse<IgnoredAny> = self.call(Endpoint::Verify, &request).await?;

        self.session.clear_pending_email();
        info!(email = %request.email, "Email verified");
        Ok(message_or(response.message, "Email verified successfully"))
    }

    /// Ask the API to send a fresh verification code to the pending email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NoPendingEmail` or `AuthError::Gateway`.
    #[instrument(skip_all)]
    pub async fn resend_otp(&mut self) -> Result<String, AuthError> {
        let email = self.pending_email()?;
        let request = ResendOtpRequest {
            email,
            purpose: OtpPurpose::Verification,
        };
        let response: ApiResponse<IgnoredAny> = self.call(Endpoint::ResendOtp, &request).await?;
        Ok(message_or(response.message, "Verification code sent"))
    }

    // =========================================================================
    // Login / Logout
    // =========================================================================

    /// Sign in and store the returned user and tokens.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Invalid` for bad input, `AuthError::Gateway` if
    /// the credentials are rejected or the call fails.
    #[instrument(skip_all, fields(email = %form.email.trim()))]
    pub async fn login(&mut self, form: &LoginForm) -> Result<User, AuthError> {
        let request = self.validated(form.validate())?;
        let response: ApiResponse<LoginData> = self.call(Endpoint::Login, &request).await?;
        let data = self.require_data(Endpoint::Login, response.data)?;

        crate::error::set_sentry_user(&data.user);
        self.session.login_success(data.user.clone(), data.tokens);
        Ok(data.user)
    }

    /// Sign out. Local session state and storage are cleared whatever the
    /// API answers; the remote outcome is returned for reporting only.
    ///
    /// # Errors
    ///
    /// Returns the `GatewayError` from the logout call, after the local
    /// session has already been cleared.
    #[instrument(skip_all)]
    pub async fn logout(&mut self) -> Result<(), GatewayError> {
        let remote = match self.session.access_token().map(str::to_owned) {
            Some(token) => self
                .api
                .post::<_, IgnoredAny>(Endpoint::Logout, &NoBody {}, Some(&token))
                .await
                .and_then(|response| {
                    if response.success {
                        Ok(())
                    } else {
                        Err(GatewayError::Rejected(response.message))
                    }
                }),
            None => Ok(()),
        };

        if let Err(e) = &remote {
            warn!(error = %e, "Remote logout failed, clearing local session anyway");
        }
        self.session.logout();
        crate::error::clear_sentry_user();
        remote
    }

    // =========================================================================
    // Password Reset
    // =========================================================================

    /// Request a password-reset code and remember the email for the OTP
    /// step.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Invalid` or `AuthError::Gateway`.
    #[instrument(skip_all)]
    pub async fn forgot_password(&mut self, form: &ForgotPasswordForm) -> Result<String, AuthError> {
        let request = self.validated(form.validate())?;
        let response: ApiResponse<IgnoredAny> =
            self.call(Endpoint::ForgotPassword, &request).await?;

        self.session.set_pending_email(request.email.as_str());
        Ok(message_or(response.message, "Reset code sent to your email"))
    }

    /// Check the password-reset code for the pending email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NoPendingEmail` or `AuthError::Gateway`.
    #[instrument(skip_all)]
    pub async fn verify_reset_otp(&mut self, form: &OtpForm) -> Result<String, AuthError> {
        let email = self.pending_email()?;
        let otp = self.validated(form.validate())?;
        let request = OtpRequest { otp, email };
        let response: ApiResponse<IgnoredAny> =
            self.call(Endpoint::VerifyResetOtp, &request).await?;

        self.session.clear_pending_email();
        Ok(message_or(response.message, "Code verified"))
    }

    /// Set a new password after the reset code was accepted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Invalid` or `AuthError::Gateway`.
    #[instrument(skip_all)]
    pub async fn reset_password(&mut self, form: &ResetPasswordForm) -> Result<String, AuthError> {
        let request = self.validated(form.validate())?;
        let response: ApiResponse<IgnoredAny> =
            self.call(Endpoint::ResetPassword, &request).await?;
        Ok(message_or(response.message, "Password reset successfully"))
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    /// Exchange the refresh token for a new token pair. The user is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn` without a refresh token,
    /// `AuthError::Gateway` if the API refuses it.
    #[instrument(skip_all)]
    pub async fn refresh(&mut self) -> Result<(), AuthError> {
        let Some(refresh_token) = self.session.refresh_token().map(str::to_owned) else {
            let err = AuthError::NotSignedIn;
            self.session.set_error(err.to_string());
            return Err(err);
        };
        let request = RefreshRequest {
            refresh_token: refresh_token.into(),
        };
        let response: ApiResponse<RefreshData> =
            self.call(Endpoint::RefreshToken, &request).await?;
        let data = self.require_data(Endpoint::RefreshToken, response.data)?;

        self.session.update_tokens(data.tokens);
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Send one request with the loading flag held. A failed call or an
    /// envelope with `success: false` is recorded as the session error.
    async fn call<B, T>(&mut self, endpoint: Endpoint, body: &B) -> Result<ApiResponse<T>, AuthError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let api = self.api;
        let mut guard = self.session.begin_request()?;
        let bearer = guard.access_token().map(str::to_owned);

        let outcome = api
            .post::<B, T>(endpoint, body, bearer.as_deref())
            .await
            .and_then(|response| {
                if response.success {
                    Ok(response)
                } else {
                    Err(GatewayError::Rejected(response.message))
                }
            });

        outcome.map_err(|source| record_failure(&mut *guard, endpoint, source))
    }

    fn require_data<T>(&mut self, endpoint: Endpoint, data: Option<T>) -> Result<T, AuthError> {
        data.ok_or_else(|| {
            record_failure(
                &mut *self.session,
                endpoint,
                GatewayError::MissingData(endpoint.path()),
            )
        })
    }

    fn validated<T>(&mut self, result: Result<T, FormErrors>) -> Result<T, AuthError> {
        result.map_err(|errors| {
            if let Some(message) = errors.first() {
                self.session.set_error(message);
            }
            AuthError::Invalid(errors)
        })
    }

    fn pending_email(&mut self) -> Result<pawtrack_core::Email, AuthError> {
        let email = self
            .session
            .pending_email()
            .and_then(|raw| pawtrack_core::Email::parse(&raw).ok());
        email.ok_or_else(|| {
            let err = AuthError::NoPendingEmail;
            self.session.set_error(err.to_string());
            err
        })
    }
}

/// Write the user-facing message for `source` into the session and wrap it.
fn record_failure<S: DurableStorage>(
    session: &mut SessionStore<S>,
    endpoint: Endpoint,
    source: GatewayError,
) -> AuthError {
    let message = source
        .server_message()
        .unwrap_or_else(|| endpoint.failure_message())
        .to_string();

    if source.is_unexpected() {
        error!(endpoint = %endpoint, error = %source, "Auth request failed");
    } else {
        warn!(endpoint = %endpoint, error = %source, "Auth request rejected");
    }

    session.set_error(message.clone());
    AuthError::Gateway { message, source }
}

fn message_or(message: Option<String>, fallback: &str) -> String {
    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use serde_json::{Value, json};

    use super::*;
    use crate::session::tests::{sample_tokens, sample_user};
    use crate::session::{SessionStatus, keys};
    use crate::storage::MemoryStorage;

    /// Scripted transport: pops one canned reply per endpoint and records
    /// every request.
    #[derive(Default)]
    struct FakeApi {
        replies: Mutex<HashMap<Endpoint, VecDeque<Result<Value, (u16, Option<String>)>>>>,
        calls: Mutex<Vec<(Endpoint, Value, Option<String>)>>,
    }

    impl FakeApi {
        fn reply(self, endpoint: Endpoint, body: Value) -> Self {
            self.replies
                .lock()
                .unwrap()
                .entry(endpoint)
                .or_default()
                .push_back(Ok(body));
            self
        }

        fn fail(self, endpoint: Endpoint, status: u16, message: Option<&str>) -> Self {
            self.replies
                .lock()
                .unwrap()
                .entry(endpoint)
                .or_default()
                .push_back(Err((status, message.map(str::to_string))));
            self
        }

        fn calls(&self) -> Vec<(Endpoint, Value, Option<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AuthApi for FakeApi {
        async fn post<B, T>(
            &self,
            endpoint: Endpoint,
            body: &B,
            bearer: Option<&str>,
        ) -> Result<ApiResponse<T>, GatewayError>
        where
            B: Serialize + Sync,
            T: DeserializeOwned + Send,
        {
            let body = serde_json::to_value(body).unwrap();
            self.calls
                .lock()
                .unwrap()
                .push((endpoint, body, bearer.map(str::to_string)));
            let reply = self
                .replies
                .lock()
                .unwrap()
                .get_mut(&endpoint)
                .and_then(VecDeque::pop_front)
                .unwrap_or_else(|| panic!("no scripted reply for {endpoint}"));
            match reply {
                Ok(value) => Ok(serde_json::from_value(value).unwrap()),
                Err((status, message)) => Err(GatewayError::Status { status, message }),
            }
        }
    }

    fn login_body() -> Value {
        json!({
            "success": true,
            "message": "Login successful",
            "data": {
                "user": serde_json::to_value(sample_user()).unwrap(),
                "session": { "id": "s-1", "expiresAt": "2025-01-08T00:00:00Z" },
                "tokens": serde_json::to_value(sample_tokens("1")).unwrap()
            },
            "timestamp": "2025-01-01T00:00:00Z"
        })
    }

    fn ack(message: &str) -> Value {
        json!({ "success": true, "message": message, "timestamp": "2025-01-01T00:00:00Z" })
    }

    fn login_form() -> LoginForm {
        LoginForm {
            email: "ranger@council.example".to_string(),
            password: "hunter22".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_success_authenticates_and_persists() {
        let api = FakeApi::default().reply(Endpoint::Login, login_body());
        let mut session = SessionStore::new(MemoryStorage::new());

        let user = AuthService::new(&api, &mut session)
            .login(&login_form())
            .await
            .unwrap();

        assert_eq!(user, sample_user());
        assert_eq!(session.status(), SessionStatus::Authenticated);
        assert!(!session.is_loading());
        assert_eq!(
            session.storage().get(keys::ACCESS_TOKEN).unwrap().as_deref(),
            Some("access-1")
        );

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].1,
            json!({"email": "ranger@council.example", "password": "hunter22"})
        );
        assert!(calls[0].2.is_none());
    }

    #[tokio::test]
    async fn test_login_invalid_credentials_sets_error() {
        let api = FakeApi::default().reply(
            Endpoint::Login,
            json!({"success": false, "message": "Invalid credentials", "timestamp": ""}),
        );
        let mut session = SessionStore::new(MemoryStorage::new());

        let err = AuthService::new(&api, &mut session)
            .login(&login_form())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(session.error(), Some("Invalid credentials"));
        assert!(!session.is_authenticated());
        assert!(!session.is_loading());
        assert!(session.storage().is_empty());
    }

    #[tokio::test]
    async fn test_failure_without_message_uses_fallback() {
        let api = FakeApi::default().fail(Endpoint::Login, 502, None);
        let mut session = SessionStore::new(MemoryStorage::new());

        let err = AuthService::new(&api, &mut session)
            .login(&login_form())
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Gateway { .. }));
        assert_eq!(session.error(), Some("Login failed"));
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_api() {
        let api = FakeApi::default();
        let mut session = SessionStore::new(MemoryStorage::new());
        let form = LoginForm {
            email: "nope".to_string(),
            password: "x".to_string(),
        };

        let err = AuthService::new(&api, &mut session)
            .login(&form)
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Invalid(_)));
        assert_eq!(session.error(), Some("Please enter a valid email address"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_signup_then_verify_uses_pending_email() {
        let api = FakeApi::default()
            .reply(Endpoint::Register, ack("User registered"))
            .reply(Endpoint::Verify, ack("User verified"));
        let mut session = SessionStore::new(MemoryStorage::new());
        let signup = SignupForm {
            full_name: "New Ranger".to_string(),
            email: "new@council.example".to_string(),
            phone: "0412345678".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
        };

        let mut service = AuthService::new(&api, &mut session);
        assert_eq!(service.signup(&signup).await.unwrap(), "User registered");
        assert_eq!(
            service.session().pending_email().as_deref(),
            Some("new@council.example")
        );

        let otp = OtpForm {
            otp: "123456".to_string(),
        };
        assert_eq!(service.verify(&otp).await.unwrap(), "User verified");
        assert!(service.session().pending_email().is_none());

        let calls = api.calls();
        assert_eq!(calls[0].1["status"], json!("inactive"));
        assert_eq!(
            calls[1].1,
            json!({"otp": "123456", "email": "new@council.example"})
        );
    }

    #[tokio::test]
    async fn test_verify_without_pending_email() {
        let api = FakeApi::default();
        let mut session = SessionStore::new(MemoryStorage::new());
        let otp = OtpForm {
            otp: "123456".to_string(),
        };

        let err = AuthService::new(&api, &mut session)
            .verify(&otp)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NoPendingEmail));
        assert!(session.error().is_some());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_verify_keeps_pending_email() {
        let api = FakeApi::default().fail(Endpoint::Verify, 400, Some("Invalid OTP"));
        let mut session = SessionStore::new(MemoryStorage::new());
        session.set_pending_email("new@council.example");
        let otp = OtpForm {
            otp: "000000".to_string(),
        };

        let err = AuthService::new(&api, &mut session)
            .verify(&otp)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid OTP");
        assert_eq!(
            session.pending_email().as_deref(),
            Some("new@council.example")
        );
    }

    #[tokio::test]
    async fn test_resend_otp_sends_verification_type() {
        let api = FakeApi::default().reply(Endpoint::ResendOtp, ack("OTP sent"));
        let mut session = SessionStore::new(MemoryStorage::new());
        session.set_pending_email("new@council.example");

        AuthService::new(&api, &mut session)
            .resend_otp()
            .await
            .unwrap();
        assert_eq!(
            api.calls()[0].1,
            json!({"email": "new@council.example", "type": "verification"})
        );
    }

    #[tokio::test]
    async fn test_refresh_replaces_tokens_and_sends_bearer() {
        let api = FakeApi::default().reply(
            Endpoint::RefreshToken,
            json!({
                "success": true,
                "data": { "tokens": serde_json::to_value(sample_tokens("2")).unwrap() },
                "timestamp": ""
            }),
        );
        let mut session = SessionStore::new(MemoryStorage::new());
        session.login_success(sample_user(), sample_tokens("1"));

        AuthService::new(&api, &mut session)
            .refresh()
            .await
            .unwrap();

        assert_eq!(session.access_token(), Some("access-2"));
        assert_eq!(session.user(), Some(&sample_user()));
        let calls = api.calls();
        assert_eq!(calls[0].1, json!({"refreshToken": "refresh-1"}));
        assert_eq!(calls[0].2.as_deref(), Some("access-1"));
    }

    #[tokio::test]
    async fn test_refresh_without_data_is_a_failure() {
        let api = FakeApi::default().reply(Endpoint::RefreshToken, ack("ok"));
        let mut session = SessionStore::new(MemoryStorage::new());
        session.login_success(sample_user(), sample_tokens("1"));

        let err = AuthService::new(&api, &mut session)
            .refresh()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuthError::Gateway {
                source: GatewayError::MissingData(_),
                ..
            }
        ));
        assert_eq!(session.access_token(), Some("access-1"));
        assert_eq!(session.error(), Some("Session refresh failed"));
    }

    #[tokio::test]
    async fn test_refresh_requires_token() {
        let api = FakeApi::default();
        let mut session = SessionStore::new(MemoryStorage::new());
        let err = AuthService::new(&api, &mut session)
            .refresh()
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NotSignedIn));
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_fails() {
        let api = FakeApi::default().fail(Endpoint::Logout, 500, Some("boom"));
        let mut session = SessionStore::new(MemoryStorage::new());
        session.login_success(sample_user(), sample_tokens("1"));

        let remote = AuthService::new(&api, &mut session).logout().await;

        assert!(remote.is_err());
        assert_eq!(session.status(), SessionStatus::Anonymous);
        assert!(session.storage().is_empty());
        assert_eq!(api.calls()[0].2.as_deref(), Some("access-1"));
    }

    #[tokio::test]
    async fn test_logout_without_token_skips_remote_call() {
        let api = FakeApi::default();
        let mut storage = MemoryStorage::new();
        storage.set(keys::USER, "{}").unwrap();
        let mut session = SessionStore::new(storage);

        AuthService::new(&api, &mut session).logout().await.unwrap();

        assert!(api.calls().is_empty());
        assert_eq!(session.status(), SessionStatus::Anonymous);
        assert!(session.storage().is_empty());
    }

    #[tokio::test]
    async fn test_password_reset_flow() {
        let api = FakeApi::default()
            .reply(Endpoint::ForgotPassword, ack("Code sent"))
            .reply(Endpoint::VerifyResetOtp, ack("Code ok"))
            .reply(Endpoint::ResetPassword, ack("Password changed"));
        let mut session = SessionStore::new(MemoryStorage::new());
        let mut service = AuthService::new(&api, &mut session);

        service
            .forgot_password(&ForgotPasswordForm {
                email: "ranger@council.example".to_string(),
            })
            .await
            .unwrap();
        service
            .verify_reset_otp(&OtpForm {
                otp: "654321".to_string(),
            })
            .await
            .unwrap();
        let message = service
            .reset_password(&ResetPasswordForm {
                new_password: "newpass1".to_string(),
                confirm_password: "newpass1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(message, "Password changed");
        let calls = api.calls();
        assert_eq!(
            calls[1].1,
            json!({"otp": "654321", "email": "ranger@council.example"})
        );
        assert_eq!(calls[2].1, json!({"newPassword": "newpass1"}));
    }
}

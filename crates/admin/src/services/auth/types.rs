//! Request bodies for the auth API.
//!
//! Passwords and refresh tokens are held as [`SecretString`] so they never
//! appear in `Debug` output; they are exposed only while serializing.

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};

use pawtrack_core::{Email, OtpPurpose, UserStatus};

/// Auth API operations and their paths relative to the configured base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Register,
    Verify,
    Login,
    ForgotPassword,
    ResendOtp,
    VerifyResetOtp,
    ResetPassword,
    RefreshToken,
    Logout,
}

impl Endpoint {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Register => "auth/user-register",
            Self::Verify => "auth/user-verify",
            Self::Login => "auth/user-login",
            Self::ForgotPassword => "auth/forgot-password",
            Self::ResendOtp => "auth/resend-verification-otp",
            Self::VerifyResetOtp => "auth/verify-forgot-password-otp",
            Self::ResetPassword => "auth/reset-password",
            Self::RefreshToken => "auth/refresh-token",
            Self::Logout => "auth/logout",
        }
    }

    /// Message used when a failed call carries no server message.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Register => "Registration failed",
            Self::Verify => "Verification failed",
            Self::Login => "Login failed",
            Self::ForgotPassword => "Failed to send reset code",
            Self::ResendOtp => "Failed to resend code",
            Self::VerifyResetOtp => "Invalid or expired code",
            Self::ResetPassword => "Password reset failed",
            Self::RefreshToken => "Session refresh failed",
            Self::Logout => "Logout failed",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Email,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
    pub full_name: String,
    pub phone: String,
    pub status: UserStatus,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: Email,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

/// Body carrying only an email (forgot-password).
#[derive(Debug, Clone, Serialize)]
pub struct EmailRequest {
    pub email: Email,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResendOtpRequest {
    pub email: Email,
    #[serde(rename = "type")]
    pub purpose: OtpPurpose,
}

/// Body for both OTP checks (signup verification and password reset).
#[derive(Debug, Clone, Serialize)]
pub struct OtpRequest {
    pub otp: String,
    pub email: Email,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(serialize_with = "expose")]
    pub new_password: SecretString,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(serialize_with = "expose")]
    pub refresh_token: SecretString,
}

/// Empty body for endpoints that take none.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NoBody {}

//! Login, signup, OTP and password-reset forms.

use secrecy::SecretString;

use pawtrack_core::{Email, UserStatus};

use super::FormErrors;
use crate::services::auth::{
    EmailRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};

const MIN_PASSWORD_LENGTH: usize = 6;
const MIN_FULL_NAME_LENGTH: usize = 2;
const MIN_PHONE_LENGTH: usize = 10;
const OTP_LENGTH: usize = 6;

const INVALID_EMAIL: &str = "Please enter a valid email address";
const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
const PASSWORDS_DIFFER: &str = "Passwords don't match";

fn check_email(errors: &mut FormErrors, raw: &str) -> Option<Email> {
    Email::parse(raw)
        .inspect_err(|_| errors.add("email", INVALID_EMAIL))
        .ok()
}

fn secret(raw: &str) -> SecretString {
    SecretString::from(raw.to_string())
}

/// Email and password sign-in.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns [`FormErrors`] for a malformed email or empty password.
    pub fn validate(&self) -> Result<LoginRequest, FormErrors> {
        let mut errors = FormErrors::new();
        let email = check_email(&mut errors, &self.email);
        if self.password.is_empty() {
            errors.add("password", "Password is required");
        }
        match email {
            Some(email) if errors.is_empty() => Ok(LoginRequest {
                email,
                password: secret(&self.password),
            }),
            _ => Err(errors),
        }
    }
}

/// New account registration.
///
/// Implements `Debug` manually to redact both password fields.
#[derive(Clone, Default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Accounts are created inactive until the emailed OTP is verified.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] listing every failing field.
    pub fn validate(&self) -> Result<RegisterRequest, FormErrors> {
        let mut errors = FormErrors::new();
        let full_name = self.full_name.trim();
        if full_name.chars().count() < MIN_FULL_NAME_LENGTH {
            errors.add("full_name", "Full name must be at least 2 characters");
        }
        let email = check_email(&mut errors, &self.email);
        let phone = self.phone.trim();
        if phone.chars().count() < MIN_PHONE_LENGTH {
            errors.add("phone", "Phone number must be at least 10 digits");
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.add("password", PASSWORD_TOO_SHORT);
        }
        if self.password != self.confirm_password {
            errors.add("confirm_password", PASSWORDS_DIFFER);
        }

        match email {
            Some(email) if errors.is_empty() => Ok(RegisterRequest {
                email,
                password: secret(&self.password),
                full_name: full_name.to_string(),
                phone: phone.to_string(),
                status: UserStatus::Inactive,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    /// # Errors
    ///
    /// Returns [`FormErrors`] for a malformed email.
    pub fn validate(&self) -> Result<EmailRequest, FormErrors> {
        let mut errors = FormErrors::new();
        match check_email(&mut errors, &self.email) {
            Some(email) => Ok(EmailRequest { email }),
            None => Err(errors),
        }
    }
}

/// One-time code entry, used for both signup verification and password
/// reset.
#[derive(Debug, Clone, Default)]
pub struct OtpForm {
    pub otp: String,
}

impl OtpForm {
    /// Returns the trimmed code.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] unless the code is exactly six ASCII digits.
    pub fn validate(&self) -> Result<String, FormErrors> {
        let otp = self.otp.trim();
        let mut errors = FormErrors::new();
        if otp.len() != OTP_LENGTH || !otp.bytes().all(|b| b.is_ascii_digit()) {
            errors.add("otp", "Code must be exactly 6 digits");
        }
        errors.into_result(otp.to_string())
    }
}

/// Implements `Debug` manually to redact both password fields.
#[derive(Clone, Default)]
pub struct ResetPasswordForm {
    pub new_password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    /// # Errors
    ///
    /// Returns [`FormErrors`] for a short or mismatched password.
    pub fn validate(&self) -> Result<ResetPasswordRequest, FormErrors> {
        let mut errors = FormErrors::new();
        if self.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.add("new_password", PASSWORD_TOO_SHORT);
        }
        if self.new_password != self.confirm_password {
            errors.add("confirm_password", PASSWORDS_DIFFER);
        }
        errors.into_result(ResetPasswordRequest {
            new_password: secret(&self.new_password),
        })
    }
}

const REDACTED: &str = "[REDACTED]";

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &REDACTED)
            .field("confirm_password", &REDACTED)
            .finish()
    }
}

impl std::fmt::Debug for ResetPasswordForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetPasswordForm")
            .field("new_password", &REDACTED)
            .field("confirm_password", &REDACTED)
            .finish()
    }
}

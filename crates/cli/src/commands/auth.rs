//! Auth commands.
//!
//! Every command opens the session stored at `PAWTRACK_STORAGE_PATH`,
//! restores it, runs one gateway operation and leaves the updated session
//! on disk.
//!
//! # Usage
//!
//! ```bash
//! pawtrack auth signup --full-name "Pat Ranger" --email pat@council.example \
//!     --phone 0400123456 --password hunter22 --confirm-password hunter22
//! pawtrack auth verify --otp 123456
//! pawtrack auth login --email pat@council.example --password hunter22
//! pawtrack auth whoami
//! pawtrack auth logout
//! ```

use tracing::{info, warn};

use pawtrack_admin::forms::{
    ForgotPasswordForm, LoginForm, OtpForm, ResetPasswordForm, SignupForm,
};
use pawtrack_admin::services::{AuthService, HttpAuthApi};
use pawtrack_admin::session::SessionStatus;
use pawtrack_admin::{AdminConfig, AppError, FileStorage, SessionStore};

use crate::AuthAction;

/// Run one auth subcommand.
///
/// # Errors
///
/// Returns `AppError` if configuration is incomplete, storage cannot be
/// opened, input is invalid or the auth API call fails.
pub async fn run(config: &AdminConfig, action: AuthAction) -> Result<(), AppError> {
    let storage = FileStorage::open(&config.storage_path)?;
    let mut session = SessionStore::restored(storage);

    if let AuthAction::Whoami = action {
        whoami(&session);
        return Ok(());
    }

    let api = HttpAuthApi::new(config.require_api()?)?;
    let mut auth = AuthService::new(&api, &mut session);

    match action {
        AuthAction::Signup {
            full_name,
            email,
            phone,
            password,
            confirm_password,
        } => {
            let form = SignupForm {
                full_name,
                email,
                phone,
                password,
                confirm_password,
            };
            let message = auth.signup(&form).await?;
            info!("{message}");
            info!("Run `pawtrack auth verify --otp <code>` with the emailed code");
        }
        AuthAction::Verify { otp } => {
            let message = auth.verify(&OtpForm { otp }).await?;
            info!("{message}");
        }
        AuthAction::ResendOtp => {
            let message = auth.resend_otp().await?;
            info!("{message}");
        }
        AuthAction::Login { email, password } => {
            let user = auth.login(&LoginForm { email, password }).await?;
            info!(user_id = %user.id, "Signed in as {} <{}>", user.full_name, user.email);
        }
        AuthAction::Logout => {
            if let Err(e) = auth.logout().await {
                warn!("Server did not confirm logout: {e}");
            }
            info!("Signed out");
        }
        AuthAction::ForgotPassword { email } => {
            let message = auth.forgot_password(&ForgotPasswordForm { email }).await?;
            info!("{message}");
            info!("Run `pawtrack auth verify-reset --otp <code>` with the emailed code");
        }
        AuthAction::VerifyReset { otp } => {
            let message = auth.verify_reset_otp(&OtpForm { otp }).await?;
            info!("{message}");
        }
        AuthAction::ResetPassword {
            new_password,
            confirm_password,
        } => {
            let form = ResetPasswordForm {
                new_password,
                confirm_password,
            };
            let message = auth.reset_password(&form).await?;
            info!("{message}");
        }
        AuthAction::Refresh => {
            auth.refresh().await?;
            info!("Session refreshed");
        }
        AuthAction::Whoami => {}
    }
    Ok(())
}

fn whoami(session: &SessionStore<FileStorage>) {
    match (session.status(), session.user()) {
        (SessionStatus::Authenticated, Some(user)) => {
            info!(
                user_id = %user.id,
                status = %user.status,
                provisional = session.state().provisional,
                "Signed in as {} <{}>",
                user.full_name,
                user.email
            );
            if session.state().provisional {
                info!("Session was restored from disk; run `pawtrack auth refresh` to confirm it");
            }
        }
        _ => info!("Not signed in"),
    }
    if let Some(email) = session.pending_email() {
        info!("Awaiting verification code for {email}");
    }
}

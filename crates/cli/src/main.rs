//! Pawtrack CLI - animal registry administration from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in against the auth API at PAWTRACK_API_URL
//! pawtrack auth login --email pat@council.example --password hunter22
//!
//! # Show who is signed in (reads the stored session only)
//! pawtrack auth whoami
//!
//! # Browse the demo registry
//! pawtrack animals list --kind cat --search whisk
//! pawtrack animals breeds --kind dog
//! ```
//!
//! # Commands
//!
//! - `auth` - Signup, verification, login/logout, password reset, refresh
//! - `animals` - List, inspect and look up breeds

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use pawtrack_admin::components::{KindFilter, SortField};
use pawtrack_admin::{AdminConfig, AppError};
use pawtrack_core::AnimalKind;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "pawtrack")]
#[command(author, version, about = "Pawtrack animal registry administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the signed-in session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Browse registered animals
    Animals {
        #[command(subcommand)]
        action: AnimalsAction,
    },
}

#[derive(Subcommand)]
pub enum AuthAction {
    /// Register a new account (sends a verification code)
    Signup {
        #[arg(long)]
        full_name: String,
        #[arg(short, long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Verify the pending signup with the emailed code
    Verify {
        #[arg(long)]
        otp: String,
    },
    /// Send a fresh verification code to the pending email
    ResendOtp,
    /// Sign in and store the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Request a password reset code
    ForgotPassword {
        #[arg(short, long)]
        email: String,
    },
    /// Check the password reset code for the pending email
    VerifyReset {
        #[arg(long)]
        otp: String,
    },
    /// Set a new password after the reset code was accepted
    ResetPassword {
        #[arg(long)]
        new_password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Exchange the refresh token for a new token pair
    Refresh,
    /// Show the stored session
    Whoami,
}

#[derive(Subcommand)]
enum AnimalsAction {
    /// Show one page of the record table
    List {
        /// Which animals to show (`all`, `cat`, `dog`)
        #[arg(short, long, default_value = "all")]
        kind: KindFilter,

        /// Case-insensitive search over name, tag, owner, breed and suburb
        #[arg(short, long)]
        search: Option<String>,

        /// Sort field (e.g. `name`, `tagNumber`, `lastName`, `updatedAt`)
        #[arg(long, default_value = "name")]
        sort: SortField,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show every field of one record
    Show {
        /// Record id (e.g. `cat-17`)
        id: String,
    },
    /// List breed codes
    Breeds {
        #[arg(short, long, default_value = "cat")]
        kind: AnimalKind,
    },
}

#[tokio::main]
async fn main() {
    let config = match AdminConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            logging::init_tracing(pawtrack_admin::LogFormat::Text);
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let sentry_guard = logging::init_sentry(&config);
    logging::init_tracing(config.log_format);

    let cli = Cli::parse();

    if let Err(e) = run(&config, cli).await {
        if !e.capture() {
            tracing::error!("{}", e.user_message());
        }
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(config: &AdminConfig, cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Auth { action } => commands::auth::run(config, action).await?,
        Commands::Animals { action } => match action {
            AnimalsAction::List {
                kind,
                search,
                sort,
                desc,
                page,
                json,
            } => {
                let options = commands::animals::ListOptions {
                    kind,
                    search,
                    sort,
                    descending: desc,
                    page,
                    json,
                };
                commands::animals::list(config, &options)?;
            }
            AnimalsAction::Show { id } => commands::animals::show(config, &id)?,
            AnimalsAction::Breeds { kind } => commands::animals::breeds(kind),
        },
    }
    Ok(())
}

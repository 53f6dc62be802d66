//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Auth API client and the session-updating auth operations
//! - `notify` - User-facing confirmation messages

pub mod auth;
pub mod notify;

pub use auth::{AuthApi, AuthError, AuthService, GatewayError, HttpAuthApi};
pub use notify::{MemoryNotifier, Notice, NoticeLevel, Notifier, TracingNotifier};

//! Command implementations.
//!
//! - `auth` - Sign up, sign in and manage the stored session
//! - `animals` - Browse the demo registry

pub mod animals;
pub mod auth;

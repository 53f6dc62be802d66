//! Pawtrack Core - Shared types library.
//!
//! This crate provides common types used across all Pawtrack components:
//! - `admin` - Registry, record table, forms, session store and auth gateway
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - IDs, email, animal records, breed tables and auth wire types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! Pawtrack Admin library.
//!
//! The engineering core of the animal registration admin tool:
//!
//! - [`registry`] - In-memory cat and dog collections with create/update/delete
//! - [`components`] - Record table query engine and dialog state
//! - [`forms`] - Client-side validation for registration and auth forms
//! - [`session`] - Session store persisted to durable storage
//! - [`services`] - Auth API gateway and user notifications
//!
//! # Security
//!
//! The session store holds bearer tokens. They are written to the durable
//! storage file in plain text and redacted from every `Debug` output.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod error;
pub mod forms;
pub mod registry;
pub mod services;
pub mod session;
pub mod storage;

pub use config::{AdminConfig, ApiConfig, ConfigError, LogFormat};
pub use error::AppError;
pub use registry::Registry;
pub use session::SessionStore;
pub use storage::{DurableStorage, FileStorage, MemoryStorage, StorageError};

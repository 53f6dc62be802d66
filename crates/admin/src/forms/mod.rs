//! Client-side form validation.
//!
//! Forms hold raw user input as strings. `validate` either produces a
//! typed payload or a [`FormErrors`] map keyed by field name; nothing
//! reaches the registry or the auth API while any field is invalid.

pub mod animal;
pub mod auth;

pub use animal::{AnimalForm, FormMode, Submission};
pub use auth::{ForgotPasswordForm, LoginForm, OtpForm, ResetPasswordForm, SignupForm};

use std::collections::BTreeMap;

use thiserror::Error;

/// Per-field validation messages.
///
/// Only the first message recorded for a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", self.summary())]
pub struct FormErrors {
    fields: BTreeMap<&'static str, String>,
    order: Vec<&'static str>,
}

impl FormErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field` unless it already has one.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if !self.fields.contains_key(field) {
            self.fields.insert(field, message.into());
            self.order.push(field);
        }
    }

    /// Record `message` when `value` is blank.
    pub fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Messages in the order the fields were checked.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.order
            .iter()
            .filter_map(|f| self.fields.get(f).map(|m| (*f, m.as_str())))
    }

    /// The first message recorded, used as the single user-facing error.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.iter().next().map(|(_, m)| m)
    }

    /// `Ok(value)` if no errors were recorded, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }

    fn summary(&self) -> String {
        self.iter().map(|(_, m)| m).collect::<Vec<_>>().join("; ")
    }
}

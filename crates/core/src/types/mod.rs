//! Core types for the animal registry.
//!
//! This module provides type-safe wrappers and records for the registry
//! and for the auth API it talks to.

pub mod account;
pub mod animal;
pub mod breed;
pub mod email;
pub mod id;
pub mod status;

pub use account::{
    ApiErrorBody, ApiErrorDetail, ApiResponse, LoginData, RefreshData, RemoteSession, Tokens, User,
};
pub use animal::{
    Animal, AnimalKind, AnimalPayload, ConvictionBan, DogTraits, RegistrationDetails, Species,
};
pub use breed::{
    Breed, BreedError, CAT_BREEDS, COLOURS, DOG_BREEDS, MARKINGS, NO_MARKINGS, breeds_for,
    lookup_breed,
};
pub use email::{Email, EmailError};
pub use id::*;
pub use status::*;

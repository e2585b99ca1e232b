//! Identity: login, registration and profile
//!
//! Contains the `AuthService` which checks credentials against the
//! credential store and issues role-scoped tokens.

pub mod service;

pub use service::{verify_password, AuthResult, AuthService, AdminAccount};

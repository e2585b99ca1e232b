//! Identity aggregate
//!
//! Faculty-derived users, administrators, the faculty roster that gates
//! registration, and the credential store interface.

pub mod model;
pub mod repository;

pub use model::{
    Admin, AdminUpdate, FacultyRecord, Identity, NewAdmin, NewFaculty, NewUser, Role, User,
};
pub use repository::CredentialStore;

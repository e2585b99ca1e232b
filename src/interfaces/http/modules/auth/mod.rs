//! Authentication module: login, register, profile

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

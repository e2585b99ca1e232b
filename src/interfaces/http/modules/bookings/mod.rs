//! Booking module: create, list own, availability, cancel

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

//! Admin module: all bookings, dashboard stats, faculty roster, admin accounts

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod classrooms;
pub mod health;
pub mod metrics;

//! Booking use-cases: create, list, availability and cancellation.

pub mod service;

pub use service::{BookingService, BookingWithOwner};

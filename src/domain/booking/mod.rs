//! Booking aggregate
//!
//! Contains the Booking entity, the slot calendar, and the ledger interface.

pub mod model;
pub mod repository;

pub use model::{normalize_booking_date, Booking, NewBooking, TimeSlot};
pub use repository::BookingRepository;

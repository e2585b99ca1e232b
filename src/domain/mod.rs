//! Domain layer: booking ledger, identities and the classroom catalogue.

pub mod booking;
pub mod classroom;
pub mod repositories;
pub mod user;

pub use booking::{normalize_booking_date, Booking, BookingRepository, NewBooking, TimeSlot};
pub use classroom::{Classroom, ClassroomRepository, NewClassroom, Smartboard, SmartboardStatus};
pub use repositories::RepositoryProvider;
pub use user::{
    Admin, AdminUpdate, CredentialStore, FacultyRecord, Identity, NewAdmin, NewFaculty, NewUser,
    Role, User,
};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::{DomainError, DomainResult};

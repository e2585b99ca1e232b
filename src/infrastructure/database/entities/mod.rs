//! Database entities module

pub mod admin;
pub mod booking;
pub mod classroom;
pub mod faculty;
pub mod user;

pub use admin::Entity as Admin;
pub use booking::Entity as Booking;
pub use classroom::Entity as Classroom;
pub use faculty::Entity as Faculty;
pub use user::Entity as User;

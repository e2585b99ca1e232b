//! Application layer: use-case orchestration over the repositories.
//!
//! HTTP handlers stay thin and delegate to these services.

pub mod booking;
pub mod catalogue;
pub mod identity;

pub use booking::{BookingService, BookingWithOwner};
pub use catalogue::{CatalogueService, DashboardStats};
pub use identity::{AuthResult, AuthService, AdminAccount};

pub mod service;

pub use service::{CatalogueService, DashboardStats};

//! # Smartboard Booking Service
//!
//! Faculty book classroom smartboards by date and one-hour slot; admins
//! manage the faculty roster and the classroom catalogue.
//!
//! ## Architecture
//!
//! - **domain**: entities, the slot model and repository traits
//! - **application**: booking, identity and catalogue services
//! - **infrastructure**: SeaORM persistence, in-memory storage, JWT and bcrypt
//! - **interfaces**: REST API with an OpenAPI document
//! - **shared**: error type, timeouts, shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};

pub use interfaces::http::{create_api_router, AppState};

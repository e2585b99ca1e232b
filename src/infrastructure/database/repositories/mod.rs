//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod booking_repository;
pub mod classroom_repository;
pub mod repository_provider;
pub mod user_repository;

pub use booking_repository::SeaOrmBookingRepository;
pub use classroom_repository::SeaOrmClassroomRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::SeaOrmCredentialStore;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

/// Whether the error is a unique index violation raised by the database
pub(crate) fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{BookingRepository, ClassroomRepository, CredentialStore, RepositoryProvider};

use super::booking_repository::SeaOrmBookingRepository;
use super::classroom_repository::SeaOrmClassroomRepository;
use super::user_repository::SeaOrmCredentialStore;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
pub struct SeaOrmRepositoryProvider {
    credentials: SeaOrmCredentialStore,
    bookings: SeaOrmBookingRepository,
    classrooms: SeaOrmClassroomRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            credentials: SeaOrmCredentialStore::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            classrooms: SeaOrmClassroomRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn credentials(&self) -> &dyn CredentialStore {
        &self.credentials
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn classrooms(&self) -> &dyn ClassroomRepository {
        &self.classrooms
    }
}

//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_admins;
mod m20240101_000003_create_faculty;
mod m20240101_000004_create_classrooms;
mod m20240101_000005_create_bookings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_admins::Migration),
            Box::new(m20240101_000003_create_faculty::Migration),
            Box::new(m20240101_000004_create_classrooms::Migration),
            Box::new(m20240101_000005_create_bookings::Migration),
        ]
    }
}

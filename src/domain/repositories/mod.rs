//! Repository access for the domain layer
//!
//! - `RepositoryProvider`: unified access to all per-aggregate repositories

use super::booking::BookingRepository;
use super::classroom::ClassroomRepository;
use super::user::CredentialStore;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let mine = repos.bookings().list_by_owner("user-1").await?;
///     let admin = repos.credentials().find_admin_by_email("a@campus.edu").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn credentials(&self) -> &dyn CredentialStore;
    fn bookings(&self) -> &dyn BookingRepository;
    fn classrooms(&self) -> &dyn ClassroomRepository;
}

use async_trait::async_trait;

use super::{Admin, AdminUpdate, FacultyRecord, NewAdmin, NewFaculty, NewUser, User};
use crate::domain::DomainResult;

/// Persisted identities and the faculty roster.
///
/// Callers pass emails already normalized with
/// [`normalize_email`](crate::shared::normalize_email).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_admin_by_email(&self, email: &str) -> DomainResult<Option<Admin>>;
    async fn find_admin_by_id(&self, id: &str) -> DomainResult<Option<Admin>>;
    async fn create_admin(&self, admin: NewAdmin) -> DomainResult<Admin>;
    async fn count_admins(&self) -> DomainResult<u64>;
    /// Active admins, newest first
    async fn list_active_admins(&self) -> DomainResult<Vec<Admin>>;
    /// Fails with `NotFound` for an unknown id and `Conflict` when the new
    /// email belongs to another admin.
    async fn update_admin(&self, id: &str, update: AdminUpdate) -> DomainResult<Admin>;
    async fn set_admin_active(&self, id: &str, active: bool) -> DomainResult<Admin>;

    async fn find_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn find_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    /// Fails with `AlreadyRegistered` when the email is taken.
    async fn create_user(&self, user: NewUser) -> DomainResult<User>;
    async fn touch_last_login(&self, user_id: &str) -> DomainResult<()>;
    async fn set_user_password(&self, user_id: &str, password_hash: String) -> DomainResult<()>;

    async fn find_faculty_by_email(&self, email: &str) -> DomainResult<Option<FacultyRecord>>;
    async fn list_faculty(&self) -> DomainResult<Vec<FacultyRecord>>;
    /// Fails with `Conflict` when the email is already on the roster.
    async fn create_faculty(&self, faculty: NewFaculty) -> DomainResult<FacultyRecord>;
    async fn count_faculty(&self) -> DomainResult<u64>;
    /// Removes and returns the roster entry; `NotFound` for an unknown id.
    async fn delete_faculty(&self, id: &str) -> DomainResult<FacultyRecord>;
    /// Distinct roster branches in ascending order
    async fn faculty_branches(&self) -> DomainResult<Vec<String>>;
}

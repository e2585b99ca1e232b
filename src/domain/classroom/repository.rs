use async_trait::async_trait;

use super::model::{Classroom, NewClassroom};
use crate::domain::DomainResult;

#[async_trait]
pub trait ClassroomRepository: Send + Sync {
    /// All classrooms ordered by branch, then name
    async fn list(&self) -> DomainResult<Vec<Classroom>>;

    async fn list_by_branch(&self, branch: &str) -> DomainResult<Vec<Classroom>>;

    /// Fails with `Conflict` when `(branch, name)` already exists
    async fn create(&self, classroom: NewClassroom) -> DomainResult<Classroom>;

    /// Removes and returns the classroom; `NotFound` for an unknown id.
    async fn delete(&self, id: &str) -> DomainResult<Classroom>;

    async fn count(&self) -> DomainResult<u64>;
}

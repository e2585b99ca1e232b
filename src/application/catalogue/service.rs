//! Classroom catalogue, faculty roster and dashboard figures

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::domain::{
    Classroom, DomainError, DomainResult, FacultyRecord, NewClassroom, NewFaculty,
    RepositoryProvider, Smartboard,
};
use crate::shared::{non_blank, normalize_email, with_timeout, DEFAULT_STORAGE_TIMEOUT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub classrooms: u64,
    pub bookings: u64,
    pub faculty_members: u64,
}

pub struct CatalogueService {
    repos: Arc<dyn RepositoryProvider>,
    storage_timeout: Duration,
}

impl CatalogueService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    pub fn with_storage_timeout(mut self, limit: Duration) -> Self {
        self.storage_timeout = limit;
        self
    }

    pub async fn list_classrooms(&self) -> DomainResult<Vec<Classroom>> {
        with_timeout(
            self.storage_timeout,
            "classrooms.list",
            self.repos.classrooms().list(),
        )
        .await
    }

    /// Branch codes are stored uppercase
    pub async fn classrooms_in_branch(&self, branch: &str) -> DomainResult<Vec<Classroom>> {
        let branch = branch.trim().to_uppercase();
        with_timeout(
            self.storage_timeout,
            "classrooms.list_by_branch",
            self.repos.classrooms().list_by_branch(&branch),
        )
        .await
    }

    pub async fn add_classroom(
        &self,
        branch: &str,
        name: &str,
        smartboards: Vec<Smartboard>,
    ) -> DomainResult<Classroom> {
        let (Some(branch), Some(name)) = (non_blank(Some(branch)), non_blank(Some(name))) else {
            return Err(DomainError::Validation(
                "Branch and classroom name are required".into(),
            ));
        };

        let room = with_timeout(
            self.storage_timeout,
            "classrooms.create",
            self.repos.classrooms().create(NewClassroom {
                branch: branch.to_uppercase(),
                name: name.to_string(),
                smartboards,
            }),
        )
        .await?;

        info!(classroom_id = %room.id, branch = %room.branch, name = %room.name, "Classroom added");
        Ok(room)
    }

    pub async fn delete_classroom(&self, id: &str) -> DomainResult<Classroom> {
        let room = with_timeout(
            self.storage_timeout,
            "classrooms.delete",
            self.repos.classrooms().delete(id),
        )
        .await?;

        info!(classroom_id = %room.id, name = %room.name, "Classroom removed");
        Ok(room)
    }

    pub async fn list_faculty(&self) -> DomainResult<Vec<FacultyRecord>> {
        with_timeout(
            self.storage_timeout,
            "credentials.list_faculty",
            self.repos.credentials().list_faculty(),
        )
        .await
    }

    /// Put a faculty member on the roster so they can register.
    pub async fn add_faculty(&self, mut faculty: NewFaculty) -> DomainResult<FacultyRecord> {
        faculty.email = normalize_email(&faculty.email);
        faculty.branch = faculty.branch.trim().to_uppercase();

        let record = with_timeout(
            self.storage_timeout,
            "credentials.create_faculty",
            self.repos.credentials().create_faculty(faculty),
        )
        .await?;

        info!(faculty_id = %record.faculty_id, email = %record.email, "Faculty member added to roster");
        Ok(record)
    }

    /// Removing a roster entry blocks future registration only; an existing
    /// account for the same email keeps working.
    pub async fn delete_faculty(&self, id: &str) -> DomainResult<FacultyRecord> {
        let record = with_timeout(
            self.storage_timeout,
            "credentials.delete_faculty",
            self.repos.credentials().delete_faculty(id),
        )
        .await?;

        info!(faculty_id = %record.faculty_id, email = %record.email, "Faculty member removed from roster");
        Ok(record)
    }

    pub async fn faculty_branches(&self) -> DomainResult<Vec<String>> {
        with_timeout(
            self.storage_timeout,
            "credentials.faculty_branches",
            self.repos.credentials().faculty_branches(),
        )
        .await
    }

    pub async fn stats(&self) -> DomainResult<DashboardStats> {
        let classrooms = with_timeout(
            self.storage_timeout,
            "classrooms.count",
            self.repos.classrooms().count(),
        );
        let bookings = with_timeout(
            self.storage_timeout,
            "bookings.count",
            self.repos.bookings().count(),
        );
        let faculty = with_timeout(
            self.storage_timeout,
            "credentials.count_faculty",
            self.repos.credentials().count_faculty(),
        );

        let (classrooms, bookings, faculty_members) = tokio::try_join!(classrooms, bookings, faculty)?;
        Ok(DashboardStats {
            classrooms,
            bookings,
            faculty_members,
        })
    }
}

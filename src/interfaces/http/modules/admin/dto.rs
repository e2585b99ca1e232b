//! Admin DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{AdminAccount, BookingWithOwner, DashboardStats};
use crate::domain::{Admin, AdminUpdate, FacultyRecord, NewFaculty};
use crate::interfaces::http::modules::bookings::BookingDto;

#[derive(Debug, Serialize, ToSchema)]
pub struct OwnerDto {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminBookingDto {
    #[serde(flatten)]
    pub booking: BookingDto,
    /// `null` when the owner no longer exists
    pub user: Option<OwnerDto>,
}

impl From<BookingWithOwner> for AdminBookingDto {
    fn from(b: BookingWithOwner) -> Self {
        let user = match (b.owner_name, b.owner_email) {
            (Some(name), Some(email)) => Some(OwnerDto { name, email }),
            _ => None,
        };
        Self {
            booking: b.booking.into(),
            user,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub classrooms: u64,
    pub bookings: u64,
    pub faculty_members: u64,
}

impl From<DashboardStats> for StatsDto {
    fn from(s: DashboardStats) -> Self {
        Self {
            classrooms: s.classrooms,
            bookings: s.bookings,
            faculty_members: s.faculty_members,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacultyDto {
    pub id: String,
    pub faculty_id: String,
    pub name: String,
    pub branch: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<FacultyRecord> for FacultyDto {
    fn from(f: FacultyRecord) -> Self {
        Self {
            id: f.id,
            faculty_id: f.faculty_id,
            name: f.name,
            branch: f.branch,
            email: f.email,
            phone: f.phone,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacultyRequest {
    #[validate(length(min = 1, max = 64, message = "facultyId is required"))]
    pub faculty_id: String,
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 64, message = "branch is required"))]
    pub branch: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
}

impl From<CreateFacultyRequest> for NewFaculty {
    fn from(r: CreateFacultyRequest) -> Self {
        Self {
            faculty_id: r.faculty_id,
            name: r.name,
            branch: r.branch,
            email: r.email,
            phone: r.phone,
        }
    }
}

// ── Admin accounts ─────────────────────────────────────────────

/// Admin account without its password hash
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDto {
    pub id: String,
    pub admin_id: String,
    pub name: String,
    pub position: String,
    pub branch: String,
    pub email: String,
    pub phone: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Admin> for AdminDto {
    fn from(a: Admin) -> Self {
        Self {
            id: a.id,
            admin_id: a.admin_id,
            name: a.name,
            position: a.position,
            branch: a.branch,
            email: a.email,
            phone: a.phone,
            is_active: a.is_active,
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    #[validate(length(min = 1, max = 64, message = "adminId is required"))]
    pub admin_id: String,
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "position is required"))]
    pub position: String,
    #[validate(length(min = 1, max = 64, message = "branch is required"))]
    pub branch: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 32, message = "phone is required"))]
    pub phone: String,
    #[validate(length(max = 128, message = "password must be at most 128 characters"))]
    pub password: String,
}

impl From<CreateAdminRequest> for AdminAccount {
    fn from(r: CreateAdminRequest) -> Self {
        Self {
            admin_id: r.admin_id,
            name: r.name,
            position: r.position,
            branch: r.branch,
            email: r.email,
            phone: r.phone,
            password: r.password,
        }
    }
}

/// Omitted fields keep their current value
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub position: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub branch: Option<String>,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub phone: Option<String>,
    #[validate(length(max = 128, message = "password must be at most 128 characters"))]
    pub password: Option<String>,
}

impl UpdateAdminRequest {
    /// Profile changes plus the plaintext password, if any
    pub fn into_parts(self) -> (AdminUpdate, Option<String>) {
        let update = AdminUpdate {
            name: self.name,
            position: self.position,
            branch: self.branch,
            email: self.email,
            phone: self.phone,
            password_hash: None,
        };
        (update, self.password)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, max = 254, message = "email is required"))]
    pub email: String,
    #[validate(length(max = 128, message = "password must be at most 128 characters"))]
    pub new_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PasswordResetDto {
    pub message: String,
    pub email: String,
}

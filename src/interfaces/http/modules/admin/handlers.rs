//! Admin API handlers
//!
//! Every route here sits behind an admin-only gate. The booking listing
//! returns a bare array; the console endpoints use the `ApiResponse` envelope.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    AdminBookingDto, AdminDto, CreateAdminRequest, CreateFacultyRequest, FacultyDto,
    PasswordResetDto, ResetPasswordRequest, StatsDto, UpdateAdminRequest,
};
use crate::application::{AuthService, BookingService, CatalogueService};
use crate::interfaces::http::common::{ApiError, ApiResponse, ErrorBody, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct AdminState {
    pub auth: Arc<AuthService>,
    pub bookings: Arc<BookingService>,
    pub catalogue: Arc<CatalogueService>,
}

#[utoipa::path(
    get,
    path = "/api/admin/bookings",
    tag = "Admin",
    responses(
        (status = 200, description = "Every booking, newest day first", body = Vec<AdminBookingDto>),
        (status = 403, description = "Admin only", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn all_bookings(
    State(state): State<AdminState>,
) -> Result<Json<Vec<AdminBookingDto>>, ApiError> {
    let bookings = state.bookings.list_all().await?;
    Ok(Json(bookings.into_iter().map(AdminBookingDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "Admin",
    responses(
        (status = 200, description = "Dashboard counters", body = ApiResponse<StatsDto>),
        (status = 403, description = "Admin only", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn dashboard_stats(
    State(state): State<AdminState>,
) -> Result<Json<ApiResponse<StatsDto>>, ApiError> {
    let stats = state.catalogue.stats().await?;
    Ok(Json(ApiResponse::success(stats.into())))
}

#[utoipa::path(
    get,
    path = "/api/admin/faculty",
    tag = "Admin",
    responses(
        (status = 200, description = "Faculty roster", body = ApiResponse<Vec<FacultyDto>>),
        (status = 403, description = "Admin only", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_faculty(
    State(state): State<AdminState>,
) -> Result<Json<ApiResponse<Vec<FacultyDto>>>, ApiError> {
    let roster = state.catalogue.list_faculty().await?;
    Ok(Json(ApiResponse::success(
        roster.into_iter().map(FacultyDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/admin/faculty",
    tag = "Admin",
    request_body = CreateFacultyRequest,
    responses(
        (status = 201, description = "Added to roster", body = ApiResponse<FacultyDto>),
        (status = 409, description = "Email already on the roster", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_faculty(
    State(state): State<AdminState>,
    ValidatedJson(request): ValidatedJson<CreateFacultyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FacultyDto>>), ApiError> {
    let record = state.catalogue.add_faculty(request.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(record.into()))))
}

#[utoipa::path(
    delete,
    path = "/api/admin/faculty/{id}",
    tag = "Admin",
    params(("id" = String, Path, description = "Roster entry ID")),
    responses(
        (status = 200, description = "Removed from roster", body = ApiResponse<FacultyDto>),
        (status = 404, description = "No such roster entry", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_faculty(
    State(state): State<AdminState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FacultyDto>>, ApiError> {
    let record = state.catalogue.delete_faculty(&id).await?;
    Ok(Json(ApiResponse::success(record.into())))
}

#[utoipa::path(
    get,
    path = "/api/faculties/branches",
    tag = "Admin",
    responses(
        (status = 200, description = "Distinct roster branches", body = ApiResponse<Vec<String>>),
        (status = 403, description = "Admin only", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn faculty_branches(
    State(state): State<AdminState>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let branches = state.catalogue.faculty_branches().await?;
    Ok(Json(ApiResponse::success(branches)))
}

// ── Admin accounts ─────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/admin",
    tag = "Admin",
    responses(
        (status = 200, description = "Active admins, newest first", body = ApiResponse<Vec<AdminDto>>),
        (status = 403, description = "Admin only", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_admins(
    State(state): State<AdminState>,
) -> Result<Json<ApiResponse<Vec<AdminDto>>>, ApiError> {
    let admins = state.auth.list_admins().await?;
    Ok(Json(ApiResponse::success(
        admins.into_iter().map(AdminDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/admin",
    tag = "Admin",
    request_body = CreateAdminRequest,
    responses(
        (status = 201, description = "Admin account created", body = ApiResponse<AdminDto>),
        (status = 400, description = "Missing fields or short password", body = ErrorBody),
        (status = 409, description = "Email or admin ID already in use", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_admin(
    State(state): State<AdminState>,
    ValidatedJson(request): ValidatedJson<CreateAdminRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AdminDto>>), ApiError> {
    let admin = state.auth.create_admin(&request.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(admin.into()))))
}

#[utoipa::path(
    get,
    path = "/api/admin/{id}",
    tag = "Admin",
    params(("id" = String, Path, description = "Admin account ID")),
    responses(
        (status = 200, description = "Admin account", body = ApiResponse<AdminDto>),
        (status = 404, description = "No such admin", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_admin(
    State(state): State<AdminState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AdminDto>>, ApiError> {
    let admin = state.auth.get_admin(&id).await?;
    Ok(Json(ApiResponse::success(admin.into())))
}

#[utoipa::path(
    put,
    path = "/api/admin/{id}",
    tag = "Admin",
    params(("id" = String, Path, description = "Admin account ID")),
    request_body = UpdateAdminRequest,
    responses(
        (status = 200, description = "Admin account updated", body = ApiResponse<AdminDto>),
        (status = 404, description = "No such admin", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_admin(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateAdminRequest>,
) -> Result<Json<ApiResponse<AdminDto>>, ApiError> {
    let (update, password) = request.into_parts();
    let admin = state
        .auth
        .update_admin(&id, update, password.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(admin.into())))
}

#[utoipa::path(
    delete,
    path = "/api/admin/{id}",
    tag = "Admin",
    params(("id" = String, Path, description = "Admin account ID")),
    responses(
        (status = 200, description = "Admin deactivated; the row is kept", body = ApiResponse<AdminDto>),
        (status = 400, description = "Cannot deactivate own account", body = ErrorBody),
        (status = 404, description = "No such admin", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn deactivate_admin(
    State(state): State<AdminState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AdminDto>>, ApiError> {
    let admin = state.auth.deactivate_admin(&id, &caller.user_id).await?;
    Ok(Json(ApiResponse::success(admin.into())))
}

#[utoipa::path(
    post,
    path = "/api/auth/admin-reset-password",
    tag = "Admin",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password replaced", body = ApiResponse<PasswordResetDto>),
        (status = 400, description = "Password too short", body = ErrorBody),
        (status = 404, description = "No registered user with that email", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn reset_user_password(
    State(state): State<AdminState>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<PasswordResetDto>>, ApiError> {
    let user = state
        .auth
        .reset_user_password(&request.email, &request.new_password)
        .await?;
    Ok(Json(ApiResponse::success(PasswordResetDto {
        message: "Password reset".into(),
        email: user.email,
    })))
}

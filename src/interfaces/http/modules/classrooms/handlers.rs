//! Classroom API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{ClassroomDto, CreateClassroomRequest};
use crate::application::CatalogueService;
use crate::interfaces::http::common::{ApiError, ApiResponse, ErrorBody, ValidatedJson};

#[derive(Clone)]
pub struct CatalogueState {
    pub catalogue: Arc<CatalogueService>,
}

fn to_dtos(rooms: Vec<crate::domain::Classroom>) -> Vec<ClassroomDto> {
    rooms.into_iter().map(ClassroomDto::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/classrooms",
    tag = "Classrooms",
    responses(
        (status = 200, description = "All classrooms", body = Vec<ClassroomDto>),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_classrooms(
    State(state): State<CatalogueState>,
) -> Result<Json<Vec<ClassroomDto>>, ApiError> {
    let rooms = state.catalogue.list_classrooms().await?;
    Ok(Json(to_dtos(rooms)))
}

#[utoipa::path(
    get,
    path = "/api/classrooms/{branch}",
    tag = "Classrooms",
    params(("branch" = String, Path, description = "Branch code, e.g. CSE")),
    responses(
        (status = 200, description = "Classrooms of one branch", body = Vec<ClassroomDto>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn classrooms_by_branch(
    State(state): State<CatalogueState>,
    Path(branch): Path<String>,
) -> Result<Json<Vec<ClassroomDto>>, ApiError> {
    let rooms = state.catalogue.classrooms_in_branch(&branch).await?;
    Ok(Json(to_dtos(rooms)))
}

#[utoipa::path(
    post,
    path = "/api/admin/classrooms",
    tag = "Admin",
    request_body = CreateClassroomRequest,
    responses(
        (status = 201, description = "Classroom added", body = ApiResponse<ClassroomDto>),
        (status = 403, description = "Admin only", body = ErrorBody),
        (status = 409, description = "Classroom already exists in branch", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_classroom(
    State(state): State<CatalogueState>,
    ValidatedJson(request): ValidatedJson<CreateClassroomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ClassroomDto>>), ApiError> {
    let room = state
        .catalogue
        .add_classroom(&request.branch, &request.name, request.smartboards)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(room.into()))))
}

#[utoipa::path(
    delete,
    path = "/api/admin/classrooms/{id}",
    tag = "Admin",
    params(("id" = String, Path, description = "Classroom ID")),
    responses(
        (status = 200, description = "Classroom removed", body = ApiResponse<ClassroomDto>),
        (status = 403, description = "Admin only", body = ErrorBody),
        (status = 404, description = "No such classroom", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_classroom(
    State(state): State<CatalogueState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ClassroomDto>>, ApiError> {
    let room = state.catalogue.delete_classroom(&id).await?;
    Ok(Json(ApiResponse::success(room.into())))
}

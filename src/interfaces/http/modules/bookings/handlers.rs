//! Booking API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    AvailabilityQuery, AvailabilityResponse, BookingDto, BookingResult, CreateBookingRequest,
};
use crate::application::BookingService;
use crate::interfaces::http::common::{ApiError, ErrorBody, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct BookingState {
    pub bookings: Arc<BookingService>,
}

#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResult),
        (status = 400, description = "Invalid input (INVALID_INPUT / INVALID_SLOT) or slot already booked (SLOT_TAKEN)", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 503, description = "Storage timed out, retry", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_booking(
    State(state): State<BookingState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResult>), ApiError> {
    let booking = state
        .bookings
        .create(
            &user.user_id,
            request.date.as_deref(),
            request.classroom.as_deref(),
            request.time.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResult {
            message: "Booking confirmed".into(),
            booking: booking.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/bookings/mine",
    tag = "Bookings",
    responses(
        (status = 200, description = "Caller's bookings, oldest first", body = Vec<BookingDto>),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn my_bookings(
    State(state): State<BookingState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<BookingDto>>, ApiError> {
    let bookings = state.bookings.list_mine(&user.user_id).await?;
    Ok(Json(bookings.into_iter().map(BookingDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/bookings/availability",
    tag = "Bookings",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Booked and free slots", body = AvailabilityResponse),
        (status = 400, description = "Missing date or classroom", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn availability(
    State(state): State<BookingState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let booked = state
        .bookings
        .availability(query.date.as_deref(), query.classroom.as_deref())
        .await?;
    Ok(Json(AvailabilityResponse::from_booked(booked)))
}

#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingResult),
        (status = 403, description = "Not the owner", body = ErrorBody),
        (status = 404, description = "No such booking", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn cancel_booking(
    State(state): State<BookingState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<BookingResult>, ApiError> {
    let booking = state.bookings.delete(&id, &user.user_id, user.role).await?;
    Ok(Json(BookingResult {
        message: "Booking cancelled".into(),
        booking: booking.into(),
    }))
}

//! Booking DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Booking, TimeSlot};

/// Fields are optional at the wire level so a missing one is reported as
/// a validation error rather than a JSON parse error.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    /// `YYYY-MM-DD` or an ISO-8601 timestamp; only the calendar day is kept
    #[schema(example = "2024-03-01")]
    pub date: Option<String>,
    #[schema(example = "A-101")]
    pub classroom: Option<String>,
    /// One of the eight slot windows, e.g. `08:30-09:30`
    #[schema(example = "08:30-09:30")]
    pub time: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: String,
    pub date: NaiveDate,
    pub classroom: String,
    pub time_slot: TimeSlot,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            date: b.date,
            classroom: b.classroom,
            time_slot: b.time_slot,
            user_id: b.owner_user_id,
            created_at: b.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResult {
    pub message: String,
    pub booking: BookingDto,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
    pub classroom: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub booked_times: Vec<TimeSlot>,
    pub available_times: Vec<TimeSlot>,
}

impl AvailabilityResponse {
    pub fn from_booked(booked_times: Vec<TimeSlot>) -> Self {
        let available_times = TimeSlot::ALL
            .into_iter()
            .filter(|slot| !booked_times.contains(slot))
            .collect();
        Self {
            booked_times,
            available_times,
        }
    }
}

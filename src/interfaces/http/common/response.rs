//! Common API DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success envelope for the admin console endpoints
///
/// Wraps the payload as `{"success": true, "data": {...}}`. Faculty-facing
/// endpoints return bare bodies. Failures use [`ErrorBody`](super::ErrorBody).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

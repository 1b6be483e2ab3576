//! Availability HTTP handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::application::AvailabilityService;
use crate::domain::Interval;
use crate::interfaces::http::common::{reject, ApiResponse, ValidatedJson};

use super::dto::*;

/// Application state for availability handlers.
#[derive(Clone)]
pub struct AvailabilityAppState {
    pub availability: Arc<AvailabilityService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/availability",
    tag = "Availability",
    request_body = AvailabilityRequest,
    responses(
        (status = 200, description = "Availability result", body = ApiResponse<AvailabilityResponse>),
        (status = 400, description = "Malformed or reversed date range"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn check_availability(
    State(state): State<AvailabilityAppState>,
    ValidatedJson(request): ValidatedJson<AvailabilityRequest>,
) -> Result<
    Json<ApiResponse<AvailabilityResponse>>,
    (StatusCode, Json<ApiResponse<AvailabilityResponse>>),
> {
    let interval = Interval::new(request.start_date, request.end_date).map_err(reject)?;

    let result = state
        .availability
        .check(request.property_id, &interval)
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(AvailabilityResponse {
        available: result.available,
        conflicting_dates: result.conflicts.into_iter().map(Into::into).collect(),
    })))
}

// ── Tests ──────────────────────────────────────────────────────

//! Booking HTTP handlers
//!
//! Cancel is user-facing; complete is for the external scheduler that
//! closes out stays after the check-out date.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::application::BookingService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{reject, ApiResponse, UserId};

use super::dto::*;

/// Application state for booking handlers.
#[derive(Clone)]
pub struct BookingAppState {
    pub bookings: Arc<BookingService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    responses(
        (status = 200, description = "The user's bookings, newest first", body = ApiResponse<Vec<BookingDto>>),
        (status = 400, description = "Missing or malformed X-User-Id header")
    )
)]
pub async fn list_bookings(
    State(state): State<BookingAppState>,
    UserId(user_id): UserId,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, (StatusCode, Json<ApiResponse<Vec<BookingDto>>>)> {
    let bookings = state
        .bookings
        .list_for_user(user_id)
        .await
        .map_err(reject)?;
    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(BookingDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 404, description = "Not found or owned by another user")
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let booking = state.bookings.get(id).await.map_err(reject)?;
    if booking.user_id != user_id {
        return Err(reject(DomainError::not_found("Booking", id)));
    }
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/cancel",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = ApiResponse<BookingDto>),
        (status = 404, description = "Not found or owned by another user"),
        (status = 422, description = "Booking is already terminal")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingAppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let booking = state.bookings.get(id).await.map_err(reject)?;
    if booking.user_id != user_id {
        return Err(reject(DomainError::not_found("Booking", id)));
    }

    let cancelled = state.bookings.cancel(id).await.map_err(reject)?;
    Ok(Json(ApiResponse::success(cancelled.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/complete",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking completed", body = ApiResponse<BookingDto>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Booking is not confirmed")
    )
)]
pub async fn complete_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let completed = state.bookings.complete(id).await.map_err(reject)?;
    Ok(Json(ApiResponse::success(completed.into())))
}

//! Property HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{quote, DomainError, Interval, PriceQuote, Property, RepositoryProvider};
use crate::interfaces::http::common::{reject, ApiResponse, ValidatedJson};

use super::dto::*;

/// Application state for property handlers.
#[derive(Clone)]
pub struct PropertyAppState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/api/v1/properties",
    tag = "Properties",
    responses(
        (status = 200, description = "All properties", body = ApiResponse<Vec<PropertyDto>>)
    )
)]
pub async fn list_properties(
    State(state): State<PropertyAppState>,
) -> Result<Json<ApiResponse<Vec<PropertyDto>>>, (StatusCode, Json<ApiResponse<Vec<PropertyDto>>>)>
{
    let properties = state.repos.properties().list().await.map_err(reject)?;
    let dtos = properties.into_iter().map(PropertyDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}",
    tag = "Properties",
    params(("id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Property details", body = ApiResponse<PropertyDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_property(
    State(state): State<PropertyAppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PropertyDto>>, (StatusCode, Json<ApiResponse<PropertyDto>>)> {
    let property = state
        .repos
        .properties()
        .find_by_id(id)
        .await
        .map_err(reject)?
        .ok_or_else(|| reject(DomainError::not_found("Property", id)))?;

    Ok(Json(ApiResponse::success(property.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/properties",
    tag = "Properties",
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, description = "Property created", body = ApiResponse<PropertyDto>),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_property(
    State(state): State<PropertyAppState>,
    ValidatedJson(request): ValidatedJson<CreatePropertyRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<PropertyDto>>),
    (StatusCode, Json<ApiResponse<PropertyDto>>),
> {
    if request.nightly_rate <= Decimal::ZERO {
        return Err(reject(DomainError::Validation(
            "nightly_rate must be positive".to_string(),
        )));
    }

    let property = Property::new(request.name, request.nightly_rate, request.max_guests);
    state
        .repos
        .properties()
        .insert(property.clone())
        .await
        .map_err(reject)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(property.into())),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/properties/{id}/quote",
    tag = "Properties",
    params(("id" = Uuid, Path, description = "Property ID")),
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Price preview for the date range", body = ApiResponse<PriceQuote>),
        (status = 400, description = "Malformed or reversed date range"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn quote_property(
    State(state): State<PropertyAppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<QuoteRequest>,
) -> Result<Json<ApiResponse<PriceQuote>>, (StatusCode, Json<ApiResponse<PriceQuote>>)> {
    let interval = Interval::new(request.start_date, request.end_date).map_err(reject)?;

    let property = state
        .repos
        .properties()
        .find_by_id(id)
        .await
        .map_err(reject)?
        .ok_or_else(|| reject(DomainError::not_found("Property", id)))?;

    let price = quote(property.nightly_rate, &interval).map_err(reject)?;
    Ok(Json(ApiResponse::success(price)))
}

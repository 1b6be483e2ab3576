//! Cart HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::application::{CartItemPatch, CartService};
use crate::domain::{DomainError, Interval};
use crate::interfaces::http::common::{reject, ApiResponse, UserId, ValidatedJson};

use super::dto::*;

/// Application state for cart handlers.
#[derive(Clone)]
pub struct CartAppState {
    pub cart: Arc<CartService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/cart/items",
    tag = "Cart",
    request_body = AddCartItemRequest,
    responses(
        (status = 201, description = "Item added with a cart-time quote", body = ApiResponse<CartItemDto>),
        (status = 400, description = "Invalid dates or guest count"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn add_cart_item(
    State(state): State<CartAppState>,
    UserId(user_id): UserId,
    ValidatedJson(request): ValidatedJson<AddCartItemRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<CartItemDto>>),
    (StatusCode, Json<ApiResponse<CartItemDto>>),
> {
    let interval = Interval::new(request.start_date, request.end_date).map_err(reject)?;

    let item = state
        .cart
        .add(user_id, request.property_id, interval, request.guest_count)
        .await
        .map_err(reject)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(item.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/cart/items",
    tag = "Cart",
    responses(
        (status = 200, description = "The user's cart, oldest first", body = ApiResponse<Vec<CartItemDto>>)
    )
)]
pub async fn list_cart_items(
    State(state): State<CartAppState>,
    UserId(user_id): UserId,
) -> Result<Json<ApiResponse<Vec<CartItemDto>>>, (StatusCode, Json<ApiResponse<Vec<CartItemDto>>>)>
{
    let items = state.cart.list(user_id).await.map_err(reject)?;
    Ok(Json(ApiResponse::success(
        items.into_iter().map(CartItemDto::from).collect(),
    )))
}

#[utoipa::path(
    put,
    path = "/api/v1/cart/items/{id}",
    tag = "Cart",
    params(("id" = Uuid, Path, description = "Cart item ID")),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Item updated; date changes re-quote", body = ApiResponse<CartItemDto>),
        (status = 400, description = "Invalid patch"),
        (status = 404, description = "Not found or owned by another user")
    )
)]
pub async fn update_cart_item(
    State(state): State<CartAppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateCartItemRequest>,
) -> Result<Json<ApiResponse<CartItemDto>>, (StatusCode, Json<ApiResponse<CartItemDto>>)> {
    let interval = match (request.start_date, request.end_date) {
        (Some(start), Some(end)) => Some(Interval::new(start, end).map_err(reject)?),
        (None, None) => None,
        _ => {
            return Err(reject(DomainError::Validation(
                "start_date and end_date must be supplied together".to_string(),
            )))
        }
    };

    let patch = CartItemPatch {
        interval,
        guest_count: request.guest_count,
    };
    let item = state
        .cart
        .update(user_id, id, patch)
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(item.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cart/items/{id}",
    tag = "Cart",
    params(("id" = Uuid, Path, description = "Cart item ID")),
    responses(
        (status = 200, description = "Item removed", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Not found or owned by another user")
    )
)]
pub async fn remove_cart_item(
    State(state): State<CartAppState>,
    UserId(user_id): UserId,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state.cart.remove(user_id, id).await.map_err(reject)?;
    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cart",
    tag = "Cart",
    responses(
        (status = 200, description = "Cart cleared", body = ApiResponse<serde_json::Value>)
    )
)]
pub async fn clear_cart(
    State(state): State<CartAppState>,
    UserId(user_id): UserId,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state.cart.clear(user_id).await.map_err(reject)?;
    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    post,
    path = "/api/v1/cart/checkout",
    tag = "Cart",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Per-item outcome; partial failure is normal", body = ApiResponse<CheckoutResponse>),
        (status = 404, description = "A selected item does not exist")
    )
)]
pub async fn checkout(
    State(state): State<CartAppState>,
    UserId(user_id): UserId,
    ValidatedJson(request): ValidatedJson<CheckoutRequest>,
) -> Result<Json<ApiResponse<CheckoutResponse>>, (StatusCode, Json<ApiResponse<CheckoutResponse>>)>
{
    let outcome = state
        .cart
        .checkout(user_id, &request.cart_item_ids)
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(CheckoutResponse {
        booked: outcome.booked.into_iter().map(Into::into).collect(),
        failed: outcome
            .failed
            .into_iter()
            .map(|f| CheckoutFailureDto {
                cart_item_id: f.cart_item_id,
                error: f.error.to_string(),
            })
            .collect(),
    })))
}

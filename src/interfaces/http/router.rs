//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    routing::{delete, get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    AvailabilityService, BookingService, CartService, PaymentReconciliationService,
};
use crate::domain::{PriceQuote, RepositoryProvider};
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::{
    availability, bookings, cart, health, payments, properties,
};

/// Unified state for the whole API. Axum hands each handler its own
/// module state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub availability: Arc<AvailabilityService>,
    pub bookings: Arc<BookingService>,
    pub cart: Arc<CartService>,
    pub reconciliation: Arc<PaymentReconciliationService>,
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for availability::AvailabilityAppState {
    fn from_ref(s: &ApiState) -> Self {
        availability::AvailabilityAppState {
            availability: Arc::clone(&s.availability),
        }
    }
}

impl FromRef<ApiState> for properties::PropertyAppState {
    fn from_ref(s: &ApiState) -> Self {
        properties::PropertyAppState {
            repos: Arc::clone(&s.repos),
        }
    }
}

impl FromRef<ApiState> for cart::CartAppState {
    fn from_ref(s: &ApiState) -> Self {
        cart::CartAppState {
            cart: Arc::clone(&s.cart),
        }
    }
}

impl FromRef<ApiState> for bookings::BookingAppState {
    fn from_ref(s: &ApiState) -> Self {
        bookings::BookingAppState {
            bookings: Arc::clone(&s.bookings),
        }
    }
}

impl FromRef<ApiState> for payments::PaymentAppState {
    fn from_ref(s: &ApiState) -> Self {
        payments::PaymentAppState {
            reconciliation: Arc::clone(&s.reconciliation),
        }
    }
}

impl FromRef<ApiState> for health::HealthState {
    fn from_ref(s: &ApiState) -> Self {
        health::HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Availability
        availability::check_availability,
        // Properties
        properties::list_properties,
        properties::get_property,
        properties::create_property,
        properties::quote_property,
        // Cart
        cart::add_cart_item,
        cart::list_cart_items,
        cart::update_cart_item,
        cart::remove_cart_item,
        cart::clear_cart,
        cart::checkout,
        // Bookings
        bookings::list_bookings,
        bookings::get_booking,
        bookings::cancel_booking,
        bookings::complete_booking,
        // Payments
        payments::payment_notification,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Availability
            availability::AvailabilityRequest,
            availability::AvailabilityResponse,
            availability::DateRangeDto,
            // Properties
            properties::PropertyDto,
            properties::CreatePropertyRequest,
            properties::QuoteRequest,
            PriceQuote,
            // Cart
            cart::CartItemDto,
            cart::AddCartItemRequest,
            cart::UpdateCartItemRequest,
            cart::CheckoutRequest,
            cart::CheckoutResponse,
            cart::CheckoutFailureDto,
            // Bookings
            bookings::BookingDto,
            // Payments
            payments::PaymentNotificationRequest,
            payments::WebhookResponse,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Availability", description = "Calendar availability checks (advisory)"),
        (name = "Properties", description = "Property listings and price previews"),
        (name = "Cart", description = "Pre-booking cart and per-item checkout"),
        (name = "Bookings", description = "Booking lifecycle: list, cancel, complete"),
        (name = "Payments", description = "Payment gateway notification webhook"),
    ),
    info(
        title = "Staybook Reservation API",
        version = "0.1.0",
        description = "REST API for property availability, pricing, carts, bookings and payment reconciliation",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check))
        // Availability
        .route("/api/v1/availability", post(availability::check_availability))
        // Properties
        .route(
            "/api/v1/properties",
            get(properties::list_properties).post(properties::create_property),
        )
        .route("/api/v1/properties/{id}", get(properties::get_property))
        .route(
            "/api/v1/properties/{id}/quote",
            post(properties::quote_property),
        )
        // Cart
        .route(
            "/api/v1/cart/items",
            get(cart::list_cart_items).post(cart::add_cart_item),
        )
        .route(
            "/api/v1/cart/items/{id}",
            put(cart::update_cart_item).delete(cart::remove_cart_item),
        )
        .route("/api/v1/cart", delete(cart::clear_cart))
        .route("/api/v1/cart/checkout", post(cart::checkout))
        // Bookings
        .route("/api/v1/bookings", get(bookings::list_bookings))
        .route("/api/v1/bookings/{id}", get(bookings::get_booking))
        .route("/api/v1/bookings/{id}/cancel", post(bookings::cancel_booking))
        .route(
            "/api/v1/bookings/{id}/complete",
            post(bookings::complete_booking),
        )
        // Payments
        .route(
            "/api/v1/payments/notification",
            post(payments::payment_notification),
        )
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Shared HTTP plumbing: response envelope, error mapping, user identity

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::DomainError;

/// Standard API response envelope.
///
/// Every REST endpoint returns data in this wrapper.
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` if the request succeeded
    pub success: bool,
    /// Payload; `null` on error
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// HTTP status for a domain error.
pub fn error_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::InvalidRange(_) | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict { .. } => StatusCode::CONFLICT,
        DomainError::InvalidTransition { .. } | DomainError::AmountMismatch { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DomainError::Signature(_) => StatusCode::UNAUTHORIZED,
        DomainError::TransientStore(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Turn a domain error into the standard rejection tuple.
pub fn reject<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    (error_status(&err), Json(ApiResponse::error(err.to_string())))
}

/// The acting user, taken from the `X-User-Id` header.
///
/// Session handling lives in an upstream gateway; by the time a request
/// reaches this service the header carries an authenticated user id.
pub struct UserId(pub Uuid);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ApiResponse<()>>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("X-User-Id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error("X-User-Id header is required")),
                )
            })?;

        let user_id = Uuid::parse_str(header).map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("X-User-Id must be a UUID")),
            )
        })?;

        Ok(UserId(user_id))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use tower::Service;

    async fn whoami(UserId(user_id): UserId) -> String {
        user_id.to_string()
    }

    async fn send(req: Request<Body>) -> axum::http::Response<Body> {
        let mut svc = Router::new().route("/whoami", get(whoami)).into_service();
        svc.call(req).await.unwrap()
    }

    #[tokio::test]
    async fn valid_header_extracts() {
        let id = Uuid::new_v4();
        let req = Request::builder()
            .uri("/whoami")
            .header("X-User-Id", id.to_string())
            .body(Body::empty())
            .unwrap();
        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_header_is_bad_request() {
        let req = Request::builder().uri("/whoami").body(Body::empty()).unwrap();
        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_header_is_bad_request() {
        let req = Request::builder()
            .uri("/whoami")
            .header("X-User-Id", "not-a-uuid")
            .body(Body::empty())
            .unwrap();
        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_maps_to_409() {
        let err = DomainError::Conflict { conflicts: vec![] };
        assert_eq!(error_status(&err), StatusCode::CONFLICT);
    }

    #[test]
    fn transient_maps_to_503() {
        let err = DomainError::TransientStore("db down".into());
        assert_eq!(error_status(&err), StatusCode::SERVICE_UNAVAILABLE);
    }
}

//! Payment webhook handler
//!
//! The gateway treats any non-2xx as "redeliver later", so the endpoint
//! answers 200 for every readable payload and signals acceptance in the
//! body. Only an unreadable payload gets a 5xx. Diagnostic detail stays
//! in the server logs; the gateway sees a generic message.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{error, warn};

use crate::application::{PaymentReconciliationService, ReconciliationOutcome};
use crate::domain::PaymentNotification;
use crate::shared::{retry_with_backoff, RetryConfig};

use super::dto::*;

/// Application state for payment handlers.
#[derive(Clone)]
pub struct PaymentAppState {
    pub reconciliation: Arc<PaymentReconciliationService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/payments/notification",
    tag = "Payments",
    request_body = PaymentNotificationRequest,
    responses(
        (status = 200, description = "Notification processed; body carries the verdict", body = WebhookResponse),
        (status = 500, description = "Unreadable payload", body = WebhookResponse)
    )
)]
pub async fn payment_notification(
    State(state): State<PaymentAppState>,
    payload: Result<Json<PaymentNotificationRequest>, JsonRejection>,
) -> (StatusCode, Json<WebhookResponse>) {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            error!(error = %rejection, "Unreadable payment notification");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(WebhookResponse::error("malformed notification payload")),
            );
        }
    };

    let notification: PaymentNotification = request.into();

    let result = retry_with_backoff(
        RetryConfig::default(),
        || state.reconciliation.handle_notification(&notification),
        |err| err.is_transient(),
        "handle_notification",
    )
    .await;

    let response = match result {
        Ok(ReconciliationOutcome::Applied) => WebhookResponse::success("notification applied"),
        Ok(ReconciliationOutcome::AlreadyProcessed) => {
            WebhookResponse::success("already processed")
        }
        Ok(ReconciliationOutcome::Ignored) => WebhookResponse::success("no action taken"),
        Err(err) => {
            warn!(
                transaction_id = %notification.transaction_id,
                order_id = %notification.order_id,
                error = %err,
                "Payment notification rejected"
            );
            WebhookResponse::error("notification rejected")
        }
    };

    (StatusCode::OK, Json(response))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use tower::Service;
    use uuid::Uuid;

    use crate::application::BookingService;
    use crate::domain::RepositoryProvider;
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn app() -> Router {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        let bookings = Arc::new(BookingService::new(repos.clone()));
        let state = PaymentAppState {
            reconciliation: Arc::new(PaymentReconciliationService::new(
                repos,
                bookings,
                "server-key",
            )),
        };
        Router::new()
            .route("/api/v1/payments/notification", post(payment_notification))
            .with_state(state)
    }

    async fn send(body: Body) -> axum::http::Response<Body> {
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/payments/notification")
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    async fn body_json(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn rejected_notification_answers_200_with_error_body() {
        let payload = serde_json::json!({
            "order_id": Uuid::new_v4(),
            "transaction_id": "txn-1",
            "transaction_status": "settlement",
            "status_code": "200",
            "gross_amount": "110.00",
            "signature_key": "not-the-real-signature"
        });
        let resp = send(Body::from(serde_json::to_vec(&payload).unwrap())).await;

        // The gateway redelivers on non-2xx; rejection rides in the body.
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn unreadable_payload_answers_500() {
        let resp = send(Body::from("not json")).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["status"], "error");
    }
}

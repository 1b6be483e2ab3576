//! Payment webhook DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::PaymentNotification;

/// Gateway notification payload, exactly as the gateway posts it.
///
/// `gross_amount` stays a string: the signature covers the bytes the
/// gateway sent, formatting included.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentNotificationRequest {
    pub order_id: String,
    pub transaction_id: String,
    pub transaction_status: String,
    pub status_code: String,
    pub gross_amount: String,
    pub signature_key: String,
}

impl From<PaymentNotificationRequest> for PaymentNotification {
    fn from(r: PaymentNotificationRequest) -> Self {
        Self {
            order_id: r.order_id,
            transaction_id: r.transaction_id,
            transaction_status: r.transaction_status,
            status_code: r.status_code,
            gross_amount: r.gross_amount,
            signature_key: r.signature_key,
        }
    }
}

/// Body the gateway reads to decide whether to redeliver.
#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookResponse {
    /// "success" or "error"
    pub status: String,
    pub message: String,
}

impl WebhookResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

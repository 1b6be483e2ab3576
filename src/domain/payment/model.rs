//! Payment gateway notification types and the idempotency ledger entry

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Inbound gateway notification, as delivered to the webhook.
///
/// Ephemeral: `order_id` maps to exactly one booking, `gross_amount`
/// stays a raw string because the signature covers the exact bytes the
/// gateway sent.
#[derive(Debug, Clone)]
pub struct PaymentNotification {
    /// Our booking ID, echoed back by the gateway
    pub order_id: String,
    /// Gateway-side transaction ID, the idempotency key
    pub transaction_id: String,
    /// Gateway status vocabulary (settlement, capture, deny, ...)
    pub transaction_status: String,
    /// Gateway HTTP-ish status code, part of the signed payload
    pub status_code: String,
    /// Charged amount as the gateway formatted it (e.g. "660.00")
    pub gross_amount: String,
    /// SHA-512 over order_id + status_code + gross_amount + server key
    pub signature_key: String,
}

/// Internal transition a gateway status maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayAction {
    /// capture / settlement: payment went through
    Confirm,
    /// deny / expire / cancel: payment will not arrive
    Cancel,
    /// pending: gateway still working, leave the booking alone
    Ignore,
}

impl GatewayAction {
    /// Map the gateway's transaction status vocabulary to an internal
    /// transition. Unrecognized statuses are never an implicit confirm.
    pub fn from_transaction_status(status: &str) -> Option<Self> {
        match status {
            "capture" | "settlement" => Some(Self::Confirm),
            "deny" | "expire" | "cancel" => Some(Self::Cancel),
            "pending" => Some(Self::Ignore),
            _ => None,
        }
    }
}

/// Record of an applied notification, keyed by `transaction_id`.
///
/// At-least-once delivery means the same notification may arrive twice;
/// a recorded transaction ID short-circuits reprocessing.
#[derive(Debug, Clone)]
pub struct PaymentEvent {
    pub id: Uuid,
    pub transaction_id: String,
    pub booking_id: Uuid,
    pub transaction_status: String,
    pub applied_at: DateTime<Utc>,
}

impl PaymentEvent {
    pub fn new(
        transaction_id: impl Into<String>,
        booking_id: Uuid,
        transaction_status: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction_id: transaction_id.into(),
            booking_id,
            transaction_status: transaction_status.into(),
            applied_at: Utc::now(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settlement_and_capture_confirm() {
        assert_eq!(
            GatewayAction::from_transaction_status("settlement"),
            Some(GatewayAction::Confirm)
        );
        assert_eq!(
            GatewayAction::from_transaction_status("capture"),
            Some(GatewayAction::Confirm)
        );
    }

    #[test]
    fn deny_expire_cancel_all_cancel() {
        for s in ["deny", "expire", "cancel"] {
            assert_eq!(
                GatewayAction::from_transaction_status(s),
                Some(GatewayAction::Cancel)
            );
        }
    }

    #[test]
    fn pending_is_a_no_op() {
        assert_eq!(
            GatewayAction::from_transaction_status("pending"),
            Some(GatewayAction::Ignore)
        );
    }

    #[test]
    fn unknown_status_is_never_an_implicit_confirm() {
        assert_eq!(GatewayAction::from_transaction_status("refund"), None);
        assert_eq!(GatewayAction::from_transaction_status(""), None);
        assert_eq!(GatewayAction::from_transaction_status("SETTLEMENT"), None);
    }
}

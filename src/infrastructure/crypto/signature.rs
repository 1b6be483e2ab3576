//! Payment gateway notification signature
//!
//! The gateway signs each notification with
//! `sha512(order_id + status_code + gross_amount + server_key)` and sends
//! the hex digest in `signature_key`. Verification is mandatory before
//! any booking state changes.

use sha2::{Digest, Sha512};

use crate::domain::{DomainError, DomainResult, PaymentNotification};

/// Compute the expected signature for a notification payload.
pub fn compute_signature(
    order_id: &str,
    status_code: &str,
    gross_amount: &str,
    server_key: &str,
) -> String {
    let mut hasher = Sha512::new();
    hasher.update(order_id.as_bytes());
    hasher.update(status_code.as_bytes());
    hasher.update(gross_amount.as_bytes());
    hasher.update(server_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verify the supplied signature against the recomputed one.
pub fn verify_notification(
    notification: &PaymentNotification,
    server_key: &str,
) -> DomainResult<()> {
    let expected = compute_signature(
        &notification.order_id,
        &notification.status_code,
        &notification.gross_amount,
        server_key,
    );

    if constant_time_eq(expected.as_bytes(), notification.signature_key.as_bytes()) {
        Ok(())
    } else {
        Err(DomainError::Signature(format!(
            "signature mismatch for order {}",
            notification.order_id
        )))
    }
}

/// Compare hex digests without early exit on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_notification(signature_key: String) -> PaymentNotification {
        PaymentNotification {
            order_id: "9aa3f722-3c86-4c05-93b4-5f2fcd3c2f10".to_string(),
            transaction_id: "tx-001".to_string(),
            transaction_status: "settlement".to_string(),
            status_code: "200".to_string(),
            gross_amount: "660.00".to_string(),
            signature_key,
        }
    }

    #[test]
    fn valid_signature_passes() {
        let key = "server-secret";
        let sig = compute_signature(
            "9aa3f722-3c86-4c05-93b4-5f2fcd3c2f10",
            "200",
            "660.00",
            key,
        );
        let n = sample_notification(sig);
        assert!(verify_notification(&n, key).is_ok());
    }

    #[test]
    fn tampered_amount_fails() {
        let key = "server-secret";
        let sig = compute_signature(
            "9aa3f722-3c86-4c05-93b4-5f2fcd3c2f10",
            "200",
            "1.00",
            key,
        );
        let n = sample_notification(sig);
        let err = verify_notification(&n, key).unwrap_err();
        assert!(matches!(err, DomainError::Signature(_)));
    }

    #[test]
    fn wrong_server_key_fails() {
        let sig = compute_signature(
            "9aa3f722-3c86-4c05-93b4-5f2fcd3c2f10",
            "200",
            "660.00",
            "other-secret",
        );
        let n = sample_notification(sig);
        assert!(verify_notification(&n, "server-secret").is_err());
    }

    #[test]
    fn signature_is_hex_sha512() {
        let sig = compute_signature("a", "b", "c", "d");
        assert_eq!(sig.len(), 128);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn empty_signature_fails() {
        let n = sample_notification(String::new());
        assert!(verify_notification(&n, "server-secret").is_err());
    }
}

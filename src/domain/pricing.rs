//! Deterministic price calculation
//!
//! Pure arithmetic over `rust_decimal::Decimal`. The quote produced at
//! cart time is recomputed at checkout and compared to detect rate drift,
//! and again at payment reconciliation to verify the charged amount.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::{DomainError, DomainResult};
use super::interval::Interval;

/// Service fee share of the subtotal (10%).
fn service_fee_rate() -> Decimal {
    Decimal::new(10, 2)
}

/// Round to cents with half-up semantics (123.455 -> 123.46).
fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn amount_out_of_range(nightly_rate: Decimal, nights: i64) -> DomainError {
    DomainError::Validation(format!(
        "stay total exceeds the representable amount ({nights} nights at {nightly_rate})"
    ))
}

/// Price breakdown for a stay. Derived, never stored apart from the
/// booking it quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PriceQuote {
    pub nights: i64,
    pub nightly_rate: Decimal,
    pub subtotal: Decimal,
    pub service_fee: Decimal,
    pub total: Decimal,
}

/// Quote a stay: nights x nightly rate, plus a 10% service fee rounded
/// at the cent boundary.
pub fn quote(nightly_rate: Decimal, interval: &Interval) -> DomainResult<PriceQuote> {
    if nightly_rate <= Decimal::ZERO {
        return Err(DomainError::Validation(format!(
            "nightly_rate must be positive, got {nightly_rate}"
        )));
    }

    let nights = interval.nights();
    let subtotal = Decimal::from(nights)
        .checked_mul(nightly_rate)
        .ok_or_else(|| amount_out_of_range(nightly_rate, nights))?;
    let service_fee = round_cents(
        subtotal
            .checked_mul(service_fee_rate())
            .ok_or_else(|| amount_out_of_range(nightly_rate, nights))?,
    );
    let total = round_cents(
        subtotal
            .checked_add(service_fee)
            .ok_or_else(|| amount_out_of_range(nightly_rate, nights))?,
    );

    Ok(PriceQuote {
        nights,
        nightly_rate,
        subtotal,
        service_fee,
        total,
    })
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn interval(start: (i32, u32, u32), end: (i32, u32, u32)) -> Interval {
        Interval::new(
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
        .unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn one_night_at_100() {
        let q = quote(dec("100"), &interval((2024, 1, 1), (2024, 1, 2))).unwrap();
        assert_eq!(q.nights, 1);
        assert_eq!(q.subtotal, dec("100"));
        assert_eq!(q.service_fee, dec("10"));
        assert_eq!(q.total, dec("110"));
    }

    #[test]
    fn two_nights_at_123_45() {
        let q = quote(dec("123.45"), &interval((2024, 1, 1), (2024, 1, 3))).unwrap();
        assert_eq!(q.nights, 2);
        assert_eq!(q.subtotal, dec("246.90"));
        assert_eq!(q.service_fee, dec("24.69"));
        assert_eq!(q.total, dec("271.59"));
    }

    #[test]
    fn three_nights_at_200() {
        let q = quote(dec("200"), &interval((2024, 3, 1), (2024, 3, 4))).unwrap();
        assert_eq!(q.nights, 3);
        assert_eq!(q.subtotal, dec("600"));
        assert_eq!(q.service_fee, dec("60.00"));
        assert_eq!(q.total, dec("660.00"));
    }

    #[test]
    fn fee_rounds_half_up_at_cent_boundary() {
        // 1 night at 0.25 -> fee 0.025 -> rounds to 0.03, not 0.02
        let q = quote(dec("0.25"), &interval((2024, 1, 1), (2024, 1, 2))).unwrap();
        assert_eq!(q.service_fee, dec("0.03"));
        assert_eq!(q.total, dec("0.28"));
    }

    #[test]
    fn quote_is_deterministic() {
        let i = interval((2024, 6, 10), (2024, 6, 15));
        let a = quote(dec("87.77"), &i).unwrap();
        let b = quote(dec("87.77"), &i).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_zero_rate() {
        let err = quote(Decimal::ZERO, &interval((2024, 1, 1), (2024, 1, 2))).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rejects_negative_rate() {
        let err = quote(dec("-10"), &interval((2024, 1, 1), (2024, 1, 2))).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn overflowing_rate_is_rejected_not_panicking() {
        let err = quote(Decimal::MAX, &interval((2024, 1, 1), (2024, 1, 3))).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn total_overflow_is_rejected_not_panicking() {
        // Subtotal alone fits; adding the 10% fee does not.
        let err = quote(Decimal::MAX / Decimal::from(2), &interval((2024, 1, 1), (2024, 1, 3)))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}

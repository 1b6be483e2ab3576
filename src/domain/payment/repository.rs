//! Payment event repository interface (idempotency ledger)

use async_trait::async_trait;

use super::model::PaymentEvent;
use crate::domain::DomainResult;

#[async_trait]
pub trait PaymentEventRepository: Send + Sync {
    /// Look up whether a gateway transaction has already been applied
    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> DomainResult<Option<PaymentEvent>>;

    /// Record an applied notification. `transaction_id` is unique;
    /// returns `false` when a concurrent delivery already recorded it
    /// (the unique-key violation is the signal, not a failure).
    async fn record(&self, event: PaymentEvent) -> DomainResult<bool>;
}

//! Availability checks against the active booking calendar

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, Interval, RepositoryProvider};

/// Result of an availability check.
#[derive(Debug, Clone)]
pub struct Availability {
    pub available: bool,
    /// Active booking intervals that overlap the requested range
    pub conflicts: Vec<Interval>,
}

/// Read-only availability lookups.
///
/// Advisory only: the answer can go stale between the check and a later
/// checkout. The conditional insert in the booking repository is the
/// authoritative gate.
pub struct AvailabilityService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Check whether `interval` is free on a property's calendar.
    ///
    /// Fails closed: a storage error propagates as `TransientStore`
    /// instead of defaulting to "available".
    pub async fn check(&self, property_id: Uuid, interval: &Interval) -> DomainResult<Availability> {
        self.repos
            .properties()
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property", property_id))?;

        let active = self
            .repos
            .bookings()
            .find_active_for_property(property_id)
            .await?;

        let conflicts: Vec<Interval> = active
            .iter()
            .filter(|b| b.interval.overlaps(interval))
            .map(|b| b.interval)
            .collect();

        debug!(
            %property_id,
            interval = %interval,
            conflicts = conflicts.len(),
            "Availability checked"
        );

        Ok(Availability {
            available: conflicts.is_empty(),
            conflicts,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

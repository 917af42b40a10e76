use uuid::Uuid;
use async_trait::async_trait;

use crate::event_sourcing::core::{Aggregate, DomainEvent, EventEnvelope};

// ============================================================================
// Event Store Trait - Repository for Events
// ============================================================================
//
// Responsibilities of an implementation:
// 1. Append events atomically (append-only)
// 2. Load event history for aggregates in sequence order
// 3. Enforce optimistic concurrency: at most one successful append may
//    apply at a given expected version; a losing writer gets VersionConflict
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Aggregate not found: {0}")]
    AggregateNotFound(Uuid),

    #[error("Concurrency conflict on {aggregate_id}: expected version {expected}, current is {actual}")]
    VersionConflict {
        aggregate_id: Uuid,
        expected: i64,
        actual: i64,
    },

    #[error("Event store backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Generic event store over any domain event type.
#[async_trait]
pub trait EventStore<E: DomainEvent + 'static>: Send + Sync {
    /// Append events to the store, guarded by the expected version.
    /// Returns the new version number after appending.
    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: Vec<EventEnvelope<E>>,
    ) -> Result<i64, StoreError>;

    /// Load all events for an aggregate, ordered by sequence number.
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<EventEnvelope<E>>, StoreError>;

    /// Get current version of an aggregate (0 when it does not exist yet).
    async fn current_version(&self, aggregate_id: Uuid) -> Result<i64, StoreError>;

    /// Check if an aggregate has any events.
    async fn aggregate_exists(&self, aggregate_id: Uuid) -> Result<bool, StoreError> {
        Ok(self.current_version(aggregate_id).await? > 0)
    }
}

/// Load an aggregate by replaying its event history from a store.
pub async fn load_aggregate<A, E>(
    store: &dyn EventStore<E>,
    aggregate_id: Uuid,
) -> Result<A, StoreError>
where
    E: DomainEvent + 'static,
    A: Aggregate<Event = E>,
    <A as Aggregate>::Error: std::fmt::Display,
{
    let events = store.load_events(aggregate_id).await?;

    if events.is_empty() {
        return Err(StoreError::AggregateNotFound(aggregate_id));
    }

    A::load_from_events(events).map_err(StoreError::Backend)
}

// ============================================================================
// Event Sourcing Store - Generic Persistence Layer
// ============================================================================
//
// This module contains GENERIC persistence infrastructure for event sourcing.
// All components work with ANY aggregate/event type.
//
// Two backends are provided:
// - PostgresEventStore: production backend (sqlx)
// - MemoryEventStore: in-process backend for tests
//
// ============================================================================

pub mod event_store;
pub mod memory;
pub mod postgres;

pub use event_store::{load_aggregate, EventStore, StoreError};
pub use memory::MemoryEventStore;
pub use postgres::PostgresEventStore;

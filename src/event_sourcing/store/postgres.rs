use std::marker::PhantomData;
use uuid::Uuid;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::Row;

use crate::event_sourcing::core::{serialize_event, DomainEvent, EventEnvelope};
use super::event_store::{EventStore, StoreError};

// ============================================================================
// Postgres Event Store
// ============================================================================
//
// Production persistence backend. Two tables:
//
//   event_store        (aggregate_id, sequence_number) primary key, append-only
//   aggregate_sequence (aggregate_id) primary key, current version per stream
//
// Appends run in a transaction that takes a row lock on the sequence row,
// so the expected-version check and the insert are atomic: at most one
// concurrent writer can succeed at a given prior version.
//
// ============================================================================

pub struct PostgresEventStore<E> {
    pool: PgPool,
    _phantom: PhantomData<E>,
}

impl<E> PostgresEventStore<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    /// Create the event store tables if they do not exist.
    pub async fn init_schema(pool: &PgPool) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS event_store (
                aggregate_id    UUID        NOT NULL,
                sequence_number BIGINT      NOT NULL,
                event_id        UUID        NOT NULL,
                event_type      TEXT        NOT NULL,
                event_version   INT         NOT NULL,
                event_data      TEXT        NOT NULL,
                correlation_id  UUID        NOT NULL,
                actor_id        UUID,
                timestamp       TIMESTAMPTZ NOT NULL,
                PRIMARY KEY (aggregate_id, sequence_number)
            )",
        )
        .execute(pool)
        .await
        .map_err(|e| StoreError::Backend(e.into()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS aggregate_sequence (
                aggregate_id     UUID        PRIMARY KEY,
                current_sequence BIGINT      NOT NULL,
                updated_at       TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(pool)
        .await
        .map_err(|e| StoreError::Backend(e.into()))?;

        Ok(())
    }
}

#[async_trait]
impl<E: DomainEvent + 'static> EventStore<E> for PostgresEventStore<E> {
    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: Vec<EventEnvelope<E>>,
    ) -> Result<i64, StoreError> {
        if events.is_empty() {
            return Err(StoreError::Backend(anyhow::anyhow!(
                "Cannot append empty event list"
            )));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Backend(e.into()))?;

        // Lock the sequence row and check optimistic concurrency
        let row = sqlx::query(
            "SELECT current_sequence FROM aggregate_sequence WHERE aggregate_id = $1 FOR UPDATE",
        )
        .bind(aggregate_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| StoreError::Backend(e.into()))?;

        let current_version: i64 = row.map(|r| r.get(0)).unwrap_or(0);
        if current_version != expected_version {
            return Err(StoreError::VersionConflict {
                aggregate_id,
                expected: expected_version,
                actual: current_version,
            });
        }

        let mut new_version = expected_version;
        for envelope in &events {
            new_version += 1;
            let event_json =
                serialize_event(&envelope.event_data).map_err(StoreError::Backend)?;

            sqlx::query(
                "INSERT INTO event_store (
                    aggregate_id, sequence_number, event_id, event_type, event_version,
                    event_data, correlation_id, actor_id, timestamp
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(aggregate_id)
            .bind(new_version)
            .bind(envelope.event_id)
            .bind(&envelope.event_type)
            .bind(envelope.event_version)
            .bind(event_json)
            .bind(envelope.correlation_id)
            .bind(envelope.actor_id)
            .bind(envelope.timestamp)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Backend(e.into()))?;
        }

        sqlx::query(
            "INSERT INTO aggregate_sequence (aggregate_id, current_sequence, updated_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (aggregate_id)
             DO UPDATE SET current_sequence = $2, updated_at = $3",
        )
        .bind(aggregate_id)
        .bind(new_version)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::Backend(e.into()))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::Backend(e.into()))?;

        tracing::info!(
            aggregate_id = %aggregate_id,
            new_version = new_version,
            event_count = events.len(),
            "Appended events to event store"
        );

        Ok(new_version)
    }

    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<EventEnvelope<E>>, StoreError> {
        let rows = sqlx::query(
            "SELECT aggregate_id, sequence_number, event_id, event_type, event_version,
                    event_data, correlation_id, actor_id, timestamp
             FROM event_store
             WHERE aggregate_id = $1
             ORDER BY sequence_number ASC",
        )
        .bind(aggregate_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.into()))?;

        let mut events = Vec::with_capacity(rows.len());
        for row in rows {
            let event_data_json: String = row.get("event_data");
            let event_data: E = serde_json::from_str(&event_data_json)
                .map_err(|e| StoreError::Backend(e.into()))?;

            let timestamp: DateTime<Utc> = row.get("timestamp");

            events.push(EventEnvelope {
                event_id: row.get("event_id"),
                aggregate_id: row.get("aggregate_id"),
                sequence_number: row.get("sequence_number"),
                event_type: row.get("event_type"),
                event_version: row.get("event_version"),
                event_data,
                correlation_id: row.get("correlation_id"),
                actor_id: row.get("actor_id"),
                timestamp,
                metadata: std::collections::HashMap::new(),
            });
        }

        tracing::debug!(
            aggregate_id = %aggregate_id,
            count = events.len(),
            "Loaded events for aggregate"
        );
        Ok(events)
    }

    async fn current_version(&self, aggregate_id: Uuid) -> Result<i64, StoreError> {
        let row = sqlx::query(
            "SELECT current_sequence FROM aggregate_sequence WHERE aggregate_id = $1",
        )
        .bind(aggregate_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.into()))?;

        Ok(row.map(|r| r.get(0)).unwrap_or(0))
    }
}

// Database operations (append with lock, conflict detection, ordered load)
// are covered by integration tests against a real Postgres; see the unit
// tests in store/memory.rs for the shared concurrency contract.

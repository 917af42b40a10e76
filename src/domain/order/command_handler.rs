use std::sync::Arc;
use uuid::Uuid;

use crate::domain::inventory::InventoryService;
use crate::event_sourcing::core::{Aggregate, EventEnvelope};
use crate::event_sourcing::store::{load_aggregate, EventStore, StoreError};

use super::aggregate::OrderAggregate;
use super::commands::OrderCommand;
use super::errors::OrderError;
use super::events::OrderEvent;
use super::value_objects::{OrderItem, PaymentMethod};

// ============================================================================
// Order Command Handler
// ============================================================================
//
// Orchestrates: Command -> Aggregate -> Events -> Event Store -> Side effects
//
// The aggregate is pure; this handler owns persistence and the inventory
// release contract: the reservation is released at the first transition
// into a terminal state that is not `delivered`.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Domain(#[from] OrderError),

    #[error("Order not found: {0}")]
    NotFound(Uuid),

    #[error("Concurrent update on order {0}; re-validate against the current status")]
    Conflict(Uuid),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for HandlerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AggregateNotFound(id) => HandlerError::NotFound(id),
            StoreError::VersionConflict { aggregate_id, .. } => HandlerError::Conflict(aggregate_id),
            StoreError::Backend(e) => HandlerError::Internal(e),
        }
    }
}

pub struct OrderCommandHandler {
    store: Arc<dyn EventStore<OrderEvent>>,
    inventory: Arc<dyn InventoryService>,
}

impl OrderCommandHandler {
    pub fn new(store: Arc<dyn EventStore<OrderEvent>>, inventory: Arc<dyn InventoryService>) -> Self {
        Self { store, inventory }
    }

    /// Checkout: validate, persist the initial event, reserve stock.
    pub async fn place(
        &self,
        customer_id: Uuid,
        items: Vec<OrderItem>,
        delivery_address: String,
        phone: String,
        payment_method: PaymentMethod,
    ) -> Result<OrderAggregate, HandlerError> {
        let order_id = Uuid::new_v4();
        let event = OrderAggregate::place(
            &items,
            customer_id,
            delivery_address,
            phone,
            payment_method,
        )?;

        let envelope = EventEnvelope::new(
            order_id,
            1,
            event.event_type_name().to_string(),
            event.clone(),
            Uuid::new_v4(),
        )
        .with_actor(customer_id);

        let new_version = self.store.append_events(order_id, 0, vec![envelope]).await?;

        if let Err(e) = self.inventory.reserve(order_id, &items).await {
            tracing::error!(order_id = %order_id, error = %e, "Stock reservation failed");
        }

        let mut aggregate = OrderAggregate::apply_first_event(order_id, &event)?;
        aggregate.set_version(new_version);

        tracing::info!(
            order_id = %order_id,
            customer_id = %customer_id,
            total = aggregate.total,
            "Order placed"
        );
        Ok(aggregate)
    }

    /// Handle a command against an existing order and persist the events.
    pub async fn execute(
        &self,
        order_id: Uuid,
        command: OrderCommand,
    ) -> Result<OrderAggregate, HandlerError> {
        let mut aggregate: OrderAggregate =
            load_aggregate(self.store.as_ref(), order_id).await?;
        let expected_version = aggregate.version();

        let domain_events = aggregate.handle_command(&command)?;

        let actor_id = match &command {
            OrderCommand::ChangeStatus { actor, .. } => Some(actor.id),
            OrderCommand::AssignDriver { actor, .. } => Some(actor.id),
            OrderCommand::Place { customer_id, .. } => Some(*customer_id),
        };

        let correlation_id = Uuid::new_v4();
        let mut envelopes = Vec::with_capacity(domain_events.len());
        let mut seq = expected_version;

        for domain_event in &domain_events {
            seq += 1;
            let mut envelope = EventEnvelope::new(
                order_id,
                seq,
                domain_event.event_type_name().to_string(),
                domain_event.clone(),
                correlation_id,
            );
            if let Some(actor_id) = actor_id {
                envelope = envelope.with_actor(actor_id);
            }
            envelopes.push(envelope);
        }

        let new_version = self
            .store
            .append_events(order_id, expected_version, envelopes)
            .await?;

        // Release the reservation on the first non-delivered terminal entry
        for event in &domain_events {
            if matches!(event, OrderEvent::Cancelled(_) | OrderEvent::DeliveryFailed(_)) {
                if let Err(e) = self.inventory.release(order_id).await {
                    tracing::error!(order_id = %order_id, error = %e, "Stock release failed");
                }
            }
        }

        for event in &domain_events {
            aggregate.apply_event(event)?;
        }
        aggregate.set_version(new_version);

        tracing::info!(
            order_id = %order_id,
            status = %aggregate.status,
            new_version = new_version,
            "Order command applied"
        );
        Ok(aggregate)
    }

    /// Load the current state of an order.
    pub async fn get(&self, order_id: Uuid) -> Result<OrderAggregate, HandlerError> {
        Ok(load_aggregate(self.store.as_ref(), order_id).await?)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

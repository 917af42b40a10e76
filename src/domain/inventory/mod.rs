use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::order::OrderItem;

// ============================================================================
// Inventory Collaborator - Stock Reservation Contract
// ============================================================================
//
// Stock is reserved when an order is placed and released when the order
// reaches a terminal state that is not `delivered`. The release call is
// idempotent: an order's reservation can be released at most once, and
// releasing an unknown order is a no-op. The command handler triggers it
// exactly once per order because the state machine only allows one entry
// into `cancelled` or `failed`.
//
// ============================================================================

#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Reserve stock for a newly placed order.
    async fn reserve(&self, order_id: Uuid, items: &[OrderItem]) -> anyhow::Result<()>;

    /// Release the reservation for an order. Idempotent.
    async fn release(&self, order_id: Uuid) -> anyhow::Result<()>;
}

/// Process-local inventory ledger. The production boundary is the
/// `InventoryService` trait; this implementation backs tests and local runs.
pub struct InMemoryInventory {
    reservations: RwLock<HashMap<Uuid, Vec<OrderItem>>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self {
            reservations: RwLock::new(HashMap::new()),
        }
    }

    pub async fn is_reserved(&self, order_id: Uuid) -> bool {
        self.reservations.read().await.contains_key(&order_id)
    }
}

impl Default for InMemoryInventory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryService for InMemoryInventory {
    async fn reserve(&self, order_id: Uuid, items: &[OrderItem]) -> anyhow::Result<()> {
        let mut reservations = self.reservations.write().await;
        reservations.insert(order_id, items.to_vec());
        tracing::debug!(order_id = %order_id, count = items.len(), "Reserved stock for order");
        Ok(())
    }

    async fn release(&self, order_id: Uuid) -> anyhow::Result<()> {
        let mut reservations = self.reservations.write().await;
        if reservations.remove(&order_id).is_some() {
            tracing::info!(order_id = %order_id, "Released stock reservation");
        } else {
            tracing::debug!(order_id = %order_id, "Release for order with no reservation; ignoring");
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

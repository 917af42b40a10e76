use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

use crate::event_sourcing::core::DomainEvent;
use super::value_objects::{FailureReason, OrderItem, PaymentMethod};

// ============================================================================
// Order Events - Domain Events for Order Aggregate
// ============================================================================

/// Order Event - Union type for all order events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    Placed(OrderPlaced),
    PreparationStarted(PreparationStarted),
    DeliveryStarted(DeliveryStarted),
    Delivered(OrderDelivered),
    DeliveryFailed(DeliveryFailed),
    Cancelled(OrderCancelled),
    DriverAssigned(DriverAssigned),
}

impl OrderEvent {
    pub fn event_type_name(&self) -> &'static str {
        match self {
            OrderEvent::Placed(_) => "OrderPlaced",
            OrderEvent::PreparationStarted(_) => "PreparationStarted",
            OrderEvent::DeliveryStarted(_) => "DeliveryStarted",
            OrderEvent::Delivered(_) => "OrderDelivered",
            OrderEvent::DeliveryFailed(_) => "DeliveryFailed",
            OrderEvent::Cancelled(_) => "OrderCancelled",
            OrderEvent::DriverAssigned(_) => "DriverAssigned",
        }
    }
}

impl DomainEvent for OrderEvent {
    fn event_type() -> &'static str { "OrderEvent" }
}

// ============================================================================
// Individual Event Types
// ============================================================================

/// Order Placed - Initial event in the order lifecycle (status `pending`)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderPlaced {
    pub customer_id: Uuid,
    pub items: Vec<OrderItem>,
    pub subtotal: i64,
    pub delivery_fee: i64,
    pub total: i64,
    pub delivery_address: String,
    pub phone: String,
    pub payment_method: PaymentMethod,
    pub placed_at: DateTime<Utc>,
}

/// Preparation Started - admin accepted the order (`pending` -> `preparing`)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PreparationStarted {
    pub started_at: DateTime<Utc>,
}

/// Delivery Started - order left the warehouse (`preparing` -> `delivering`)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DeliveryStarted {
    pub started_at: DateTime<Utc>,
}

/// Order Delivered - terminal success (`delivering` -> `delivered`)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderDelivered {
    pub delivered_at: DateTime<Utc>,
}

/// Delivery Failed - terminal failure with its coded reason
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DeliveryFailed {
    pub reason: FailureReason,
    pub details: Option<String>,
    pub failed_at: DateTime<Utc>,
}

/// Order Cancelled - terminal abort before preparation began
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderCancelled {
    pub cancelled_by: Uuid,
    pub cancelled_at: DateTime<Utc>,
}

/// Driver Assigned - driver set or cleared by an admin
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DriverAssigned {
    pub driver_id: Option<Uuid>,
    pub assigned_by: Uuid,
    pub assigned_at: DateTime<Utc>,
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        let event = OrderEvent::Delivered(OrderDelivered { delivered_at: Utc::now() });
        assert_eq!(event.event_type_name(), "OrderDelivered");
    }

    #[test]
    fn test_failure_event_serialization_keeps_reason_code() {
        let event = OrderEvent::DeliveryFailed(DeliveryFailed {
            reason: FailureReason::WrongAddress,
            details: None,
            failed_at: Utc::now(),
        });

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"DeliveryFailed\""));
        assert!(json.contains("\"wrong_address\""));

        let back: OrderEvent = serde_json::from_str(&json).unwrap();
        match back {
            OrderEvent::DeliveryFailed(e) => assert_eq!(e.reason, FailureReason::WrongAddress),
            other => panic!("Wrong event type after deserialization: {:?}", other),
        }
    }
}

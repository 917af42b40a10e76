use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::order::{
    FailureReason, OrderAggregate, OrderItem, OrderStatus, PaymentMethod,
};

// ============================================================================
// Wire Models - Request/Response DTOs for the HTTP API
// ============================================================================

/// Checkout payload. The server recomputes subtotal, fee and total from the
/// items; client-provided totals are never trusted.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<OrderItem>,
    pub delivery_address: String,
    pub phone: String,
    pub payment_method: PaymentMethod,
}

/// Status update payload. `failure_reason` and `failure_details` are only
/// meaningful when `status` is `failed`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
    pub failure_reason: Option<String>,
    pub failure_details: Option<String>,
}

/// Driver assignment payload. `driver_id: null` clears the assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignDriverRequest {
    pub driver_id: Option<Uuid>,
}

/// Full order representation returned by every order endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub subtotal: i64,
    pub delivery_fee: i64,
    pub total: i64,
    pub delivery_address: String,
    pub phone: String,
    pub payment_method: PaymentMethod,
    pub assigned_driver: Option<Uuid>,
    pub failure_reason: Option<FailureReason>,
    pub failure_details: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
}

impl From<&OrderAggregate> for OrderResponse {
    fn from(order: &OrderAggregate) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            status: order.status,
            items: order.items.clone(),
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            total: order.total,
            delivery_address: order.delivery_address.clone(),
            phone: order.phone.clone(),
            payment_method: order.payment_method.clone(),
            assigned_driver: order.assigned_driver,
            failure_reason: order.failure_reason,
            failure_details: order.failure_details.clone(),
            created_at: order.created_at,
            updated_at: order.updated_at,
            version: order.version,
        }
    }
}

/// One entry of the failure reason registry, with display labels.
#[derive(Debug, Clone, Serialize)]
pub struct FailureReasonEntry {
    pub code: &'static str,
    pub fr: &'static str,
    pub en: &'static str,
}

impl From<FailureReason> for FailureReasonEntry {
    fn from(reason: FailureReason) -> Self {
        Self {
            code: reason.code(),
            fr: reason.label_fr(),
            en: reason.label_en(),
        }
    }
}

/// Registry response for `GET /api/driver/failure-reasons`.
#[derive(Debug, Clone, Serialize)]
pub struct FailureReasonsResponse {
    pub reasons: Vec<FailureReasonEntry>,
}

impl FailureReasonsResponse {
    pub fn registry() -> Self {
        Self {
            reasons: FailureReason::ALL.iter().copied().map(Into::into).collect(),
        }
    }
}

/// Uniform error body: machine-readable code plus a human message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

use uuid::Uuid;
use super::value_objects::{Actor, OrderItem, PaymentMethod, StatusChange};

// ============================================================================
// Order Commands - Represent actor intent
// ============================================================================

#[derive(Debug, Clone)]
pub enum OrderCommand {
    /// Checkout: create the order in `pending`.
    Place {
        order_id: Uuid,
        customer_id: Uuid,
        items: Vec<OrderItem>,
        delivery_address: String,
        phone: String,
        payment_method: PaymentMethod,
    },
    /// Requested status change, validated against the transition table.
    ChangeStatus {
        actor: Actor,
        change: StatusChange,
    },
    /// Set or clear the assigned driver (admin only, before delivery starts).
    AssignDriver {
        actor: Actor,
        driver_id: Option<Uuid>,
    },
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

use crate::event_sourcing::core::Aggregate;
use super::value_objects::{
    delivery_fee_for, Actor, FailureReason, OrderItem, OrderStatus, PaymentMethod, Role,
    StatusChange,
};
use super::events::*;
use super::commands::OrderCommand;
use super::errors::OrderError;

// ============================================================================
// Order Aggregate - Lifecycle Engine
// ============================================================================
//
// Owns the canonical transition table, the role gate for each transition,
// and the failure taxonomy attached to the terminal `failed` status.
//
// Check precedence for a status change:
//   1. (current, requested) must be a row in the table   -> InvalidTransition
//   2. the actor must be allowed for that row            -> Unauthorized
//   3. a failure transition must carry a valid payload   -> MissingFailure*
//
// Terminal statuses reject every transition, including a retry of the one
// that produced them, so callers can replay timed-out requests safely.
//
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAggregate {
    // Identity
    pub id: Uuid,
    pub version: i64,

    // Current State (derived from events)
    pub customer_id: Uuid,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub subtotal: i64,
    pub delivery_fee: i64,
    pub total: i64,
    pub delivery_address: String,
    pub phone: String,
    pub payment_method: PaymentMethod,
    pub assigned_driver: Option<Uuid>,

    // Populated only when status == Failed
    pub failure_reason: Option<FailureReason>,
    pub failure_details: Option<String>,

    // Audit Trail
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderAggregate {
    /// Validate a checkout and produce the initial `Placed` event.
    pub fn place(
        items: &[OrderItem],
        customer_id: Uuid,
        delivery_address: String,
        phone: String,
        payment_method: PaymentMethod,
    ) -> Result<OrderEvent, OrderError> {
        Self::validate_items(items)?;

        let subtotal: i64 = items.iter().map(|i| i.price * i64::from(i.quantity)).sum();
        let delivery_fee = delivery_fee_for(subtotal);

        Ok(OrderEvent::Placed(OrderPlaced {
            customer_id,
            items: items.to_vec(),
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
            delivery_address,
            phone,
            payment_method,
            placed_at: Utc::now(),
        }))
    }

    fn validate_items(items: &[OrderItem]) -> Result<(), OrderError> {
        if items.is_empty() {
            return Err(OrderError::EmptyItems);
        }
        for item in items {
            if item.quantity < 1 {
                return Err(OrderError::InvalidQuantity(item.quantity));
            }
            if item.price < 0 {
                return Err(OrderError::InvalidPrice(item.price));
            }
        }
        Ok(())
    }

    fn is_assigned_driver(&self, actor: &Actor) -> bool {
        actor.role == Role::Driver && self.assigned_driver == Some(actor.id)
    }

    /// Role gate for one row of the transition table.
    fn authorize(&self, actor: &Actor, from: OrderStatus, to: OrderStatus) -> Result<(), OrderError> {
        let allowed = match (from, to) {
            (OrderStatus::Pending, OrderStatus::Preparing) => actor.role == Role::Admin,
            (OrderStatus::Preparing, OrderStatus::Delivering) => {
                actor.role == Role::Admin || self.is_assigned_driver(actor)
            }
            (OrderStatus::Delivering, OrderStatus::Delivered)
            | (OrderStatus::Delivering, OrderStatus::Failed) => self.is_assigned_driver(actor),
            (OrderStatus::Pending, OrderStatus::Cancelled) => {
                actor.role == Role::Admin
                    || (actor.role == Role::Client && actor.id == self.customer_id)
            }
            // Not a table row; handle_command rejects before calling here
            _ => false,
        };

        if allowed {
            Ok(())
        } else {
            Err(OrderError::Unauthorized)
        }
    }

    fn handle_status_change(
        &self,
        actor: &Actor,
        change: &StatusChange,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        let from = self.status;
        let to = change.target();

        let is_table_row = matches!(
            (from, to),
            (OrderStatus::Pending, OrderStatus::Preparing)
                | (OrderStatus::Preparing, OrderStatus::Delivering)
                | (OrderStatus::Delivering, OrderStatus::Delivered)
                | (OrderStatus::Delivering, OrderStatus::Failed)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
        );
        if !is_table_row {
            return Err(OrderError::InvalidTransition { from, to });
        }

        self.authorize(actor, from, to)?;

        let now = Utc::now();
        let event = match to {
            OrderStatus::Preparing => {
                OrderEvent::PreparationStarted(PreparationStarted { started_at: now })
            }
            OrderStatus::Delivering => {
                OrderEvent::DeliveryStarted(DeliveryStarted { started_at: now })
            }
            OrderStatus::Delivered => OrderEvent::Delivered(OrderDelivered { delivered_at: now }),
            OrderStatus::Failed => {
                let info = match change {
                    StatusChange::Failure(info) => info,
                    StatusChange::Simple(_) => return Err(OrderError::MissingFailureReason),
                };
                if info.reason == FailureReason::Other
                    && info.details.as_deref().map_or(true, |d| d.trim().is_empty())
                {
                    return Err(OrderError::MissingFailureDetails);
                }
                OrderEvent::DeliveryFailed(DeliveryFailed {
                    reason: info.reason,
                    details: info.details.clone(),
                    failed_at: now,
                })
            }
            OrderStatus::Cancelled => OrderEvent::Cancelled(OrderCancelled {
                cancelled_by: actor.id,
                cancelled_at: now,
            }),
            // `pending` is never a transition target
            OrderStatus::Pending => return Err(OrderError::InvalidTransition { from, to }),
        };

        Ok(vec![event])
    }

    fn handle_assign_driver(
        &self,
        actor: &Actor,
        driver_id: Option<Uuid>,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        if actor.role != Role::Admin {
            return Err(OrderError::Unauthorized);
        }
        // Assignment is frozen once delivery starts and after terminal states
        match self.status {
            OrderStatus::Pending | OrderStatus::Preparing => {}
            status => return Err(OrderError::AssignmentFrozen(status)),
        }

        Ok(vec![OrderEvent::DriverAssigned(DriverAssigned {
            driver_id,
            assigned_by: actor.id,
            assigned_at: Utc::now(),
        })])
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for OrderAggregate {
    type Event = OrderEvent;
    type Command = OrderCommand;
    type Error = OrderError;

    fn apply_first_event(aggregate_id: Uuid, event: &Self::Event) -> Result<Self, Self::Error> {
        match event {
            OrderEvent::Placed(e) => Ok(Self {
                id: aggregate_id,
                version: 0,
                customer_id: e.customer_id,
                items: e.items.clone(),
                status: OrderStatus::Pending,
                subtotal: e.subtotal,
                delivery_fee: e.delivery_fee,
                total: e.total,
                delivery_address: e.delivery_address.clone(),
                phone: e.phone.clone(),
                payment_method: e.payment_method.clone(),
                assigned_driver: None,
                failure_reason: None,
                failure_details: None,
                created_at: e.placed_at,
                updated_at: e.placed_at,
            }),
            _ => Err(OrderError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        self.updated_at = Utc::now();

        match event {
            OrderEvent::Placed(_) => {
                // First event already applied
                Ok(())
            }
            OrderEvent::PreparationStarted(_) => {
                self.status = OrderStatus::Preparing;
                Ok(())
            }
            OrderEvent::DeliveryStarted(_) => {
                self.status = OrderStatus::Delivering;
                Ok(())
            }
            OrderEvent::Delivered(_) => {
                self.status = OrderStatus::Delivered;
                Ok(())
            }
            OrderEvent::DeliveryFailed(e) => {
                self.status = OrderStatus::Failed;
                self.failure_reason = Some(e.reason);
                self.failure_details = e.details.clone();
                Ok(())
            }
            OrderEvent::Cancelled(_) => {
                self.status = OrderStatus::Cancelled;
                Ok(())
            }
            OrderEvent::DriverAssigned(e) => {
                self.assigned_driver = e.driver_id;
                Ok(())
            }
        }
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            OrderCommand::Place { .. } => {
                // Placement never applies to an existing aggregate
                Err(OrderError::InvalidTransition {
                    from: self.status,
                    to: OrderStatus::Pending,
                })
            }
            OrderCommand::ChangeStatus { actor, change } => {
                self.handle_status_change(actor, change)
            }
            OrderCommand::AssignDriver { actor, driver_id } => {
                self.handle_assign_driver(actor, *driver_id)
            }
        }
    }

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::value_objects::{CylinderSize, FailureInfo};

    fn admin() -> Actor {
        Actor::new(Uuid::new_v4(), Role::Admin)
    }

    fn item(price: i64, quantity: i32) -> OrderItem {
        OrderItem {
            product_id: Uuid::new_v4(),
            product_name: "Butane 12kg".to_string(),
            product_image: "https://cdn.example/butane-12kg.jpg".to_string(),
            size: CylinderSize::Medium,
            quantity,
            price,
        }
    }

    fn place_order(items: Vec<OrderItem>) -> OrderAggregate {
        let event = OrderAggregate::place(
            &items,
            Uuid::new_v4(),
            "Rue 1.234, Bonapriso, Douala".to_string(),
            "+237600000000".to_string(),
            PaymentMethod::Cash,
        )
        .unwrap();
        OrderAggregate::apply_first_event(Uuid::new_v4(), &event).unwrap()
    }

    fn pending_order() -> OrderAggregate {
        place_order(vec![item(7_500, 2)])
    }

    /// Drive an order through handle_command + apply_event, panicking on
    /// rejection. Fixtures can only reach a status the table allows.
    fn transition(order: &mut OrderAggregate, actor: &Actor, change: StatusChange) {
        let events = order
            .handle_command(&OrderCommand::ChangeStatus {
                actor: *actor,
                change,
            })
            .unwrap();
        for event in &events {
            order.apply_event(event).unwrap();
        }
    }

    fn assign(order: &mut OrderAggregate, driver_id: Uuid) {
        let events = order
            .handle_command(&OrderCommand::AssignDriver {
                actor: admin(),
                driver_id: Some(driver_id),
            })
            .unwrap();
        for event in &events {
            order.apply_event(event).unwrap();
        }
    }

    fn delivering_order_with_driver(driver_id: Uuid) -> OrderAggregate {
        let mut order = pending_order();
        assign(&mut order, driver_id);
        transition(&mut order, &admin(), StatusChange::Simple(OrderStatus::Preparing));
        let driver = Actor::new(driver_id, Role::Driver);
        transition(&mut order, &driver, StatusChange::Simple(OrderStatus::Delivering));
        order
    }

    // ------------------------------------------------------------------
    // Placement and totals
    // ------------------------------------------------------------------

    #[test]
    fn test_place_sets_pending_and_totals() {
        let order = place_order(vec![item(7_500, 2)]);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.subtotal, 15_000);
        assert_eq!(order.delivery_fee, 3_500);
        assert_eq!(order.total, 18_500);
        assert!(order.assigned_driver.is_none());
        assert!(order.failure_reason.is_none());
    }

    #[test]
    fn test_place_large_subtotal_gets_free_delivery() {
        let order = place_order(vec![item(12_500, 2)]);
        assert_eq!(order.subtotal, 25_000);
        assert_eq!(order.delivery_fee, 0);
        assert_eq!(order.total, order.subtotal);
    }

    #[test]
    fn test_place_rejects_empty_items() {
        let err = OrderAggregate::place(
            &[],
            Uuid::new_v4(),
            "addr".to_string(),
            "+237".to_string(),
            PaymentMethod::MobileMoney,
        )
        .unwrap_err();
        assert!(matches!(err, OrderError::EmptyItems));
    }

    #[test]
    fn test_place_rejects_zero_quantity() {
        let err = OrderAggregate::place(
            &[item(5_000, 0)],
            Uuid::new_v4(),
            "addr".to_string(),
            "+237".to_string(),
            PaymentMethod::Cash,
        )
        .unwrap_err();
        assert!(matches!(err, OrderError::InvalidQuantity(0)));
    }

    #[test]
    fn test_place_rejects_negative_price() {
        let err = OrderAggregate::place(
            &[item(-1, 1)],
            Uuid::new_v4(),
            "addr".to_string(),
            "+237".to_string(),
            PaymentMethod::Cash,
        )
        .unwrap_err();
        assert!(matches!(err, OrderError::InvalidPrice(-1)));
    }

    // ------------------------------------------------------------------
    // Happy path and idempotent rejection
    // ------------------------------------------------------------------

    #[test]
    fn test_admin_starts_preparation() {
        let mut order = pending_order();
        transition(&mut order, &admin(), StatusChange::Simple(OrderStatus::Preparing));
        assert_eq!(order.status, OrderStatus::Preparing);

        // Retrying the same transition on the now-preparing order is rejected
        let err = order
            .handle_command(&OrderCommand::ChangeStatus {
                actor: admin(),
                change: StatusChange::Simple(OrderStatus::Preparing),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Preparing,
                to: OrderStatus::Preparing
            }
        ));
    }

    #[test]
    fn test_full_happy_path_to_delivered() {
        let driver_id = Uuid::new_v4();
        let mut order = delivering_order_with_driver(driver_id);
        assert_eq!(order.status, OrderStatus::Delivering);

        let driver = Actor::new(driver_id, Role::Driver);
        transition(&mut order, &driver, StatusChange::Simple(OrderStatus::Delivered));
        assert_eq!(order.status, OrderStatus::Delivered);

        // Delivered is terminal: the driver cannot re-deliver
        let err = order
            .handle_command(&OrderCommand::ChangeStatus {
                actor: driver,
                change: StatusChange::Simple(OrderStatus::Delivered),
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));
    }

    #[test]
    fn test_cannot_skip_straight_to_delivered() {
        let driver_id = Uuid::new_v4();
        let mut order = pending_order();
        assign(&mut order, driver_id);

        let err = order
            .handle_command(&OrderCommand::ChangeStatus {
                actor: Actor::new(driver_id, Role::Driver),
                change: StatusChange::Simple(OrderStatus::Delivered),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered
            }
        ));
    }

    #[test]
    fn test_terminal_statuses_reject_everything() {
        let driver_id = Uuid::new_v4();
        let driver = Actor::new(driver_id, Role::Driver);

        let mut delivered = delivering_order_with_driver(driver_id);
        transition(&mut delivered, &driver, StatusChange::Simple(OrderStatus::Delivered));

        let mut cancelled = pending_order();
        transition(&mut cancelled, &admin(), StatusChange::Simple(OrderStatus::Cancelled));

        let mut failed = delivering_order_with_driver(driver_id);
        transition(
            &mut failed,
            &driver,
            StatusChange::Failure(
                FailureInfo::new(FailureReason::CustomerUnavailable, None).unwrap(),
            ),
        );

        for order in [&delivered, &cancelled, &failed] {
            for target in [
                OrderStatus::Preparing,
                OrderStatus::Delivering,
                OrderStatus::Delivered,
                OrderStatus::Cancelled,
            ] {
                let err = order
                    .handle_command(&OrderCommand::ChangeStatus {
                        actor: admin(),
                        change: StatusChange::Simple(target),
                    })
                    .unwrap_err();
                assert!(
                    matches!(err, OrderError::InvalidTransition { .. }),
                    "expected InvalidTransition from {} to {}",
                    order.status,
                    target
                );
            }
        }
    }

    // ------------------------------------------------------------------
    // Role gates
    // ------------------------------------------------------------------

    #[test]
    fn test_client_cannot_start_preparation() {
        let order = pending_order();
        let owner = Actor::new(order.customer_id, Role::Client);

        let err = order
            .handle_command(&OrderCommand::ChangeStatus {
                actor: owner,
                change: StatusChange::Simple(OrderStatus::Preparing),
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::Unauthorized));
    }

    #[test]
    fn test_unassigned_driver_cannot_start_delivery() {
        let mut order = pending_order();
        assign(&mut order, Uuid::new_v4());
        transition(&mut order, &admin(), StatusChange::Simple(OrderStatus::Preparing));

        let other_driver = Actor::new(Uuid::new_v4(), Role::Driver);
        let err = order
            .handle_command(&OrderCommand::ChangeStatus {
                actor: other_driver,
                change: StatusChange::Simple(OrderStatus::Delivering),
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::Unauthorized));
    }

    #[test]
    fn test_assigned_driver_can_start_delivery() {
        let driver_id = Uuid::new_v4();
        let mut order = pending_order();
        assign(&mut order, driver_id);
        transition(&mut order, &admin(), StatusChange::Simple(OrderStatus::Preparing));

        let driver = Actor::new(driver_id, Role::Driver);
        transition(&mut order, &driver, StatusChange::Simple(OrderStatus::Delivering));
        assert_eq!(order.status, OrderStatus::Delivering);
    }

    #[test]
    fn test_different_driver_cannot_mark_delivered() {
        let d1 = Uuid::new_v4();
        let order = delivering_order_with_driver(d1);

        let d2 = Actor::new(Uuid::new_v4(), Role::Driver);
        let err = order
            .handle_command(&OrderCommand::ChangeStatus {
                actor: d2,
                change: StatusChange::Simple(OrderStatus::Delivered),
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::Unauthorized));
    }

    #[test]
    fn test_admin_cannot_mark_delivered() {
        let order = delivering_order_with_driver(Uuid::new_v4());

        let err = order
            .handle_command(&OrderCommand::ChangeStatus {
                actor: admin(),
                change: StatusChange::Simple(OrderStatus::Delivered),
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::Unauthorized));
    }

    // ------------------------------------------------------------------
    // Cancellation
    // ------------------------------------------------------------------

    #[test]
    fn test_owner_can_cancel_pending_order() {
        let mut order = pending_order();
        let owner = Actor::new(order.customer_id, Role::Client);
        transition(&mut order, &owner, StatusChange::Simple(OrderStatus::Cancelled));
        assert_eq!(order.status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_other_client_cannot_cancel() {
        let order = pending_order();
        let stranger = Actor::new(Uuid::new_v4(), Role::Client);

        let err = order
            .handle_command(&OrderCommand::ChangeStatus {
                actor: stranger,
                change: StatusChange::Simple(OrderStatus::Cancelled),
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::Unauthorized));
    }

    #[test]
    fn test_cancel_after_preparation_started_is_rejected() {
        let mut order = pending_order();
        transition(&mut order, &admin(), StatusChange::Simple(OrderStatus::Preparing));

        let err = order
            .handle_command(&OrderCommand::ChangeStatus {
                actor: admin(),
                change: StatusChange::Simple(OrderStatus::Cancelled),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Preparing,
                to: OrderStatus::Cancelled
            }
        ));
    }

    // ------------------------------------------------------------------
    // Failure taxonomy
    // ------------------------------------------------------------------

    #[test]
    fn test_failure_with_coded_reason_persists_fields() {
        let driver_id = Uuid::new_v4();
        let mut order = delivering_order_with_driver(driver_id);
        let driver = Actor::new(driver_id, Role::Driver);

        transition(
            &mut order,
            &driver,
            StatusChange::Failure(FailureInfo::new(FailureReason::WrongAddress, None).unwrap()),
        );

        assert_eq!(order.status, OrderStatus::Failed);
        assert_eq!(order.failure_reason, Some(FailureReason::WrongAddress));
        assert!(order.failure_details.is_none());
    }

    #[test]
    fn test_failure_with_other_reason_persists_details() {
        let driver_id = Uuid::new_v4();
        let mut order = delivering_order_with_driver(driver_id);
        let driver = Actor::new(driver_id, Role::Driver);

        transition(
            &mut order,
            &driver,
            StatusChange::Failure(
                FailureInfo::new(FailureReason::Other, Some("road flooded".to_string())).unwrap(),
            ),
        );

        assert_eq!(order.failure_reason, Some(FailureReason::Other));
        assert_eq!(order.failure_details.as_deref(), Some("road flooded"));
    }

    #[test]
    fn test_failure_without_payload_is_rejected() {
        let driver_id = Uuid::new_v4();
        let order = delivering_order_with_driver(driver_id);
        let driver = Actor::new(driver_id, Role::Driver);

        let err = order
            .handle_command(&OrderCommand::ChangeStatus {
                actor: driver,
                change: StatusChange::Simple(OrderStatus::Failed),
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::MissingFailureReason));
    }

    #[test]
    fn test_failure_other_without_details_is_rejected() {
        let driver_id = Uuid::new_v4();
        let order = delivering_order_with_driver(driver_id);
        let driver = Actor::new(driver_id, Role::Driver);

        // Bypass the FailureInfo constructor; the engine re-validates
        let err = order
            .handle_command(&OrderCommand::ChangeStatus {
                actor: driver,
                change: StatusChange::Failure(FailureInfo {
                    reason: FailureReason::Other,
                    details: None,
                }),
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::MissingFailureDetails));
    }

    #[test]
    fn test_failure_before_delivery_starts_is_invalid() {
        let mut order = pending_order();
        let driver_id = Uuid::new_v4();
        assign(&mut order, driver_id);

        let err = order
            .handle_command(&OrderCommand::ChangeStatus {
                actor: Actor::new(driver_id, Role::Driver),
                change: StatusChange::Failure(
                    FailureInfo::new(FailureReason::CustomerRefused, None).unwrap(),
                ),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Failed
            }
        ));
    }

    // ------------------------------------------------------------------
    // Driver assignment gate
    // ------------------------------------------------------------------

    #[test]
    fn test_admin_assigns_and_clears_driver() {
        let mut order = pending_order();
        let driver_id = Uuid::new_v4();

        assign(&mut order, driver_id);
        assert_eq!(order.assigned_driver, Some(driver_id));

        let events = order
            .handle_command(&OrderCommand::AssignDriver {
                actor: admin(),
                driver_id: None,
            })
            .unwrap();
        for event in &events {
            order.apply_event(event).unwrap();
        }
        assert!(order.assigned_driver.is_none());
    }

    #[test]
    fn test_non_admin_cannot_assign_driver() {
        let order = pending_order();
        let driver = Actor::new(Uuid::new_v4(), Role::Driver);

        let err = order
            .handle_command(&OrderCommand::AssignDriver {
                actor: driver,
                driver_id: Some(driver.id),
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::Unauthorized));
    }

    #[test]
    fn test_assignment_frozen_during_delivery() {
        let order = delivering_order_with_driver(Uuid::new_v4());

        let err = order
            .handle_command(&OrderCommand::AssignDriver {
                actor: admin(),
                driver_id: Some(Uuid::new_v4()),
            })
            .unwrap_err();
        assert!(matches!(err, OrderError::AssignmentFrozen(OrderStatus::Delivering)));
    }

    #[test]
    fn test_assignment_allowed_while_preparing() {
        let mut order = pending_order();
        transition(&mut order, &admin(), StatusChange::Simple(OrderStatus::Preparing));

        let driver_id = Uuid::new_v4();
        assign(&mut order, driver_id);
        assert_eq!(order.assigned_driver, Some(driver_id));
    }
}

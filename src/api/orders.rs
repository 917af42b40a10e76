use actix_web::{web, HttpResponse};
use uuid::Uuid;

use super::auth::AuthenticatedActor;
use super::error::ApiError;
use super::server::AppState;
use crate::domain::order::{HandlerError, OrderCommand, Role, StatusChange};
use crate::models::{
    AssignDriverRequest, CheckoutRequest, FailureReasonsResponse, OrderResponse,
    StatusUpdateRequest,
};

// ============================================================================
// Order Endpoints
// ============================================================================
//
// POST /api/orders                                checkout
// GET  /api/orders/{id}                           fetch one order
// PUT  /api/orders/{id}/status                    lifecycle transition
// PUT  /api/admin/orders/{id}/assign-driver       set/clear assigned driver
// GET  /api/driver/failure-reasons                failure reason registry
//
// ============================================================================

/// Checkout. The authenticated actor becomes the order's customer.
pub async fn create_order(
    state: web::Data<AppState>,
    actor: AuthenticatedActor,
    body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();

    let order = state
        .orders
        .place(
            actor.0.id,
            request.items,
            request.delivery_address,
            request.phone,
            request.payment_method,
        )
        .await?;

    state.metrics.orders_placed.inc();
    Ok(HttpResponse::Created().json(OrderResponse::from(&order)))
}

/// Fetch one order. Visible to admins, the owning customer, and the
/// assigned driver.
pub async fn get_order(
    state: web::Data<AppState>,
    actor: AuthenticatedActor,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let order = state.orders.get(path.into_inner()).await?;

    let visible = actor.0.role == Role::Admin
        || order.customer_id == actor.0.id
        || order.assigned_driver == Some(actor.0.id);
    if !visible {
        return Err(ApiError::forbidden("You do not have access to this order"));
    }

    Ok(HttpResponse::Ok().json(OrderResponse::from(&order)))
}

/// Request a lifecycle transition.
pub async fn update_status(
    state: web::Data<AppState>,
    actor: AuthenticatedActor,
    path: web::Path<Uuid>,
    body: web::Json<StatusUpdateRequest>,
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();
    let request = body.into_inner();

    let change = match StatusChange::from_parts(
        request.status,
        request.failure_reason.as_deref(),
        request.failure_details,
    ) {
        Ok(change) => change,
        Err(e) => {
            state.metrics.record_rejection(&e);
            return Err(e.into());
        }
    };
    let target = change.target();

    // Previous status, for the transition metric label
    let previous = state.orders.get(order_id).await?.status;

    let command = OrderCommand::ChangeStatus {
        actor: actor.0,
        change,
    };
    match state.orders.execute(order_id, command).await {
        Ok(order) => {
            state.metrics.record_transition(previous, target);
            Ok(HttpResponse::Ok().json(OrderResponse::from(&order)))
        }
        Err(HandlerError::Domain(e)) => {
            state.metrics.record_rejection(&e);
            Err(ApiError::from(&e))
        }
        Err(e) => Err(e.into()),
    }
}

/// Set or clear the assigned driver. Admin-only, enforced by the aggregate.
pub async fn assign_driver(
    state: web::Data<AppState>,
    actor: AuthenticatedActor,
    path: web::Path<Uuid>,
    body: web::Json<AssignDriverRequest>,
) -> Result<HttpResponse, ApiError> {
    let command = OrderCommand::AssignDriver {
        actor: actor.0,
        driver_id: body.into_inner().driver_id,
    };
    let order = state.orders.execute(path.into_inner(), command).await?;

    state.metrics.driver_assignments.inc();
    Ok(HttpResponse::Ok().json(OrderResponse::from(&order)))
}

/// The closed registry of delivery failure reasons, with fr/en labels.
pub async fn failure_reasons(_actor: AuthenticatedActor) -> HttpResponse {
    HttpResponse::Ok().json(FailureReasonsResponse::registry())
}

// ============================================================================
// Endpoint Tests
// ============================================================================

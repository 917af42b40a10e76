// ============================================================================
// Order Domain - Business Logic for the Order Aggregate
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (OrderItem, OrderStatus, Actor, FailureReason)
// - Events (OrderPlaced, DeliveryFailed, etc.)
// - Commands (Place, ChangeStatus, AssignDriver)
// - Errors (OrderError enum)
// - Aggregate (OrderAggregate with the transition and authorization rules)
// - Command Handler (OrderCommandHandler)
//
// This is completely separate from the generic event sourcing infrastructure.
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod command_handler;

// Re-export for convenience
pub use value_objects::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use command_handler::*;

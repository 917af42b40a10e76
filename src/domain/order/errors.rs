use super::value_objects::OrderStatus;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Cannot transition from '{from}' to '{to}'")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Actor is not permitted to perform this operation")]
    Unauthorized,

    #[error("A failure reason is required when marking a delivery as failed")]
    MissingFailureReason,

    #[error("Unknown failure reason code: '{0}'")]
    InvalidFailureReason(String),

    #[error("Details are required when the failure reason is 'other'")]
    MissingFailureDetails,

    #[error("Driver assignment is frozen while the order is '{0}'")]
    AssignmentFrozen(OrderStatus),

    #[error("Order items cannot be empty")]
    EmptyItems,

    #[error("Invalid item quantity: {0}")]
    InvalidQuantity(i32),

    #[error("Invalid item price: {0}")]
    InvalidPrice(i64),

    #[error("Aggregate not initialized")]
    NotInitialized,
}

impl OrderError {
    /// Machine-readable code surfaced in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            OrderError::InvalidTransition { .. } => "invalid_transition",
            OrderError::Unauthorized => "unauthorized",
            OrderError::MissingFailureReason => "missing_failure_reason",
            OrderError::InvalidFailureReason(_) => "invalid_failure_reason",
            OrderError::MissingFailureDetails => "missing_failure_details",
            OrderError::AssignmentFrozen(_) => "assignment_frozen",
            OrderError::EmptyItems => "empty_items",
            OrderError::InvalidQuantity(_) => "invalid_quantity",
            OrderError::InvalidPrice(_) => "invalid_price",
            OrderError::NotInitialized => "not_initialized",
        }
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::OrderError;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Free delivery once the subtotal reaches this amount (XAF).
pub const FREE_DELIVERY_THRESHOLD: i64 = 20_000;

/// Flat delivery fee below the free-delivery threshold (XAF).
pub const STANDARD_DELIVERY_FEE: i64 = 3_500;

/// Delivery fee for a given subtotal (XAF has no fractional subunit).
pub fn delivery_fee_for(subtotal: i64) -> i64 {
    if subtotal >= FREE_DELIVERY_THRESHOLD {
        0
    } else {
        STANDARD_DELIVERY_FEE
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CylinderSize {
    Small,
    Medium,
    Large,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub product_image: String,
    pub size: CylinderSize,
    pub quantity: i32,
    pub price: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    MobileMoney,
}

/// Lifecycle status of an order. Mutated only through validated transitions.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Delivering,
    Delivered,
    Cancelled,
    Failed,
}

impl OrderStatus {
    /// Terminal statuses have no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Failed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Actors
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    Admin,
    Driver,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Admin => "admin",
            Role::Driver => "driver",
        }
    }
}

/// The role-bearing party requesting a transition. Always passed explicitly
/// into commands, never read from ambient state.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }
}

// ============================================================================
// Failure Taxonomy
// ============================================================================

/// Coded explanation for why a delivery attempt did not succeed.
/// This is a closed registry; unknown codes are rejected at the boundary.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    CustomerUnavailable,
    WrongAddress,
    CustomerRefused,
    Other,
}

impl FailureReason {
    pub const ALL: [FailureReason; 4] = [
        FailureReason::CustomerUnavailable,
        FailureReason::WrongAddress,
        FailureReason::CustomerRefused,
        FailureReason::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            FailureReason::CustomerUnavailable => "customer_unavailable",
            FailureReason::WrongAddress => "wrong_address",
            FailureReason::CustomerRefused => "customer_refused",
            FailureReason::Other => "other",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.code() == code)
    }

    pub fn label_fr(&self) -> &'static str {
        match self {
            FailureReason::CustomerUnavailable => "Client absent",
            FailureReason::WrongAddress => "Adresse incorrecte",
            FailureReason::CustomerRefused => "Refus du client",
            FailureReason::Other => "Autre",
        }
    }

    pub fn label_en(&self) -> &'static str {
        match self {
            FailureReason::CustomerUnavailable => "Customer unavailable",
            FailureReason::WrongAddress => "Wrong address",
            FailureReason::CustomerRefused => "Customer refused",
            FailureReason::Other => "Other",
        }
    }
}

/// Validated failure payload attached to a delivery-failed transition.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FailureInfo {
    pub reason: FailureReason,
    pub details: Option<String>,
}

impl FailureInfo {
    /// Build a failure payload, enforcing that the `other` reason carries
    /// non-empty free-text details.
    pub fn new(reason: FailureReason, details: Option<String>) -> Result<Self, OrderError> {
        let details = details.filter(|d| !d.trim().is_empty());
        if reason == FailureReason::Other && details.is_none() {
            return Err(OrderError::MissingFailureDetails);
        }
        Ok(Self { reason, details })
    }
}

// ============================================================================
// Status Change - Structural Transition Payload
// ============================================================================

/// A requested status change: either a plain target status, or a failure
/// carrying its validated payload. Parsing the wire shape into this variant
/// makes the required-fields check structural instead of conditional.
#[derive(Clone, Debug, PartialEq)]
pub enum StatusChange {
    Simple(OrderStatus),
    Failure(FailureInfo),
}

impl StatusChange {
    /// Parse the wire payload `{status, failure_reason?, failure_details?}`.
    pub fn from_parts(
        status: OrderStatus,
        failure_reason: Option<&str>,
        failure_details: Option<String>,
    ) -> Result<Self, OrderError> {
        if status != OrderStatus::Failed {
            return Ok(StatusChange::Simple(status));
        }

        let code = failure_reason.ok_or(OrderError::MissingFailureReason)?;
        let reason = FailureReason::from_code(code)
            .ok_or_else(|| OrderError::InvalidFailureReason(code.to_string()))?;

        Ok(StatusChange::Failure(FailureInfo::new(reason, failure_details)?))
    }

    /// The status this change targets.
    pub fn target(&self) -> OrderStatus {
        match self {
            StatusChange::Simple(status) => *status,
            StatusChange::Failure(_) => OrderStatus::Failed,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

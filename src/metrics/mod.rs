use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

use crate::domain::order::{OrderError, OrderStatus};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Orders placed
// - Lifecycle transitions applied, labelled by (from, to)
// - Rejected commands, labelled by error code
// - Driver assignments
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Central metrics registry for the entire application
pub struct Metrics {
    registry: Registry,

    pub orders_placed: IntCounter,
    pub transitions_applied: IntCounterVec,
    pub transitions_rejected: IntCounterVec,
    pub driver_assignments: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_placed = IntCounter::new(
            "orders_placed_total",
            "Total orders created through checkout",
        )?;
        registry.register(Box::new(orders_placed.clone()))?;

        let transitions_applied = IntCounterVec::new(
            Opts::new("order_transitions_applied_total", "Lifecycle transitions applied"),
            &["from", "to"],
        )?;
        registry.register(Box::new(transitions_applied.clone()))?;

        let transitions_rejected = IntCounterVec::new(
            Opts::new("order_transitions_rejected_total", "Commands rejected by the state machine"),
            &["code"],
        )?;
        registry.register(Box::new(transitions_rejected.clone()))?;

        let driver_assignments = IntCounter::new(
            "driver_assignments_total",
            "Driver assignment changes (set or clear)",
        )?;
        registry.register(Box::new(driver_assignments.clone()))?;

        Ok(Self {
            registry,
            orders_placed,
            transitions_applied,
            transitions_rejected,
            driver_assignments,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record an applied transition
    pub fn record_transition(&self, from: OrderStatus, to: OrderStatus) {
        self.transitions_applied
            .with_label_values(&[from.as_str(), to.as_str()])
            .inc();
    }

    /// Helper to record a rejected command by its error code
    pub fn record_rejection(&self, error: &OrderError) {
        self.transitions_rejected
            .with_label_values(&[error.code()])
            .inc();
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert!(metrics.registry.gather().len() > 0);
    }

    #[test]
    fn test_record_transition() {
        let metrics = Metrics::new().unwrap();
        metrics.record_transition(OrderStatus::Pending, OrderStatus::Preparing);
        metrics.record_transition(OrderStatus::Pending, OrderStatus::Preparing);

        let gathered = metrics.registry.gather();
        let applied = gathered
            .iter()
            .find(|m| m.name() == "order_transitions_applied_total")
            .unwrap();
        assert_eq!(applied.metric[0].counter.value, Some(2.0));
    }

    #[test]
    fn test_record_rejection_by_code() {
        let metrics = Metrics::new().unwrap();
        metrics.record_rejection(&OrderError::Unauthorized);
        metrics.record_rejection(&OrderError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
        });

        let gathered = metrics.registry.gather();
        let rejected = gathered
            .iter()
            .find(|m| m.name() == "order_transitions_rejected_total")
            .unwrap();
        assert_eq!(rejected.metric.len(), 2); // Two different error codes
    }
}

//! Order lifecycle enums and the fulfillment timeline projection.

use serde::{Deserialize, Serialize};

/// Order fulfillment status as reported by the server.
///
/// The first five values form the forward fulfillment progression shown on
/// the order timeline. `Cancelled` and the return/refund states sit outside
/// that progression. `Unknown` absorbs any status value introduced
/// server-side before this client learns about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    ReturnRequested,
    Returned,
    Refunded,
    #[serde(other)]
    Unknown,
}

/// The canonical forward fulfillment progression.
pub const FULFILLMENT_PROGRESSION: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
];

impl OrderStatus {
    /// Position of this status within the forward progression, or `None`
    /// for cancelled/return states and unrecognized values.
    #[must_use]
    pub fn progress_index(self) -> Option<usize> {
        FULFILLMENT_PROGRESSION.iter().position(|s| *s == self)
    }

    /// Whether the customer may still cancel an order in this status.
    ///
    /// Cancellation is enforced server-side; this mirrors the rule so the
    /// action can be hidden up front.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Processing => "PROCESSING",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
            Self::ReturnRequested => "RETURN_REQUESTED",
            Self::Returned => "RETURNED",
            Self::Refunded => "REFUNDED",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{s}")
    }
}

/// Payment status for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Refunded,
    #[serde(other)]
    Unknown,
}

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    #[serde(rename = "COD")]
    Cod,
    /// Online payment through the Razorpay gateway.
    #[serde(rename = "RAZORPAY")]
    Razorpay,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cod => write!(f, "COD"),
            Self::Razorpay => write!(f, "RAZORPAY"),
        }
    }
}

// =============================================================================
// Timeline Projection
// =============================================================================

/// One step on the rendered fulfillment timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineStep {
    /// The status this step represents.
    pub status: OrderStatus,
    /// Whether the order has reached this step.
    pub reached: bool,
}

/// Projection of an order status onto the fulfillment timeline.
///
/// All steps at or before the current status are marked reached. A
/// cancelled order overrides the timeline entirely; unrecognized statuses
/// mark nothing reached rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTimeline {
    /// Terminal cancelled state, displayed instead of the progression.
    pub cancelled: bool,
    /// The five canonical steps with their reached flags.
    pub steps: [TimelineStep; 5],
}

impl OrderTimeline {
    /// Project an order status onto the timeline.
    #[must_use]
    pub fn project(status: OrderStatus) -> Self {
        let current = status.progress_index();
        let mut steps = FULFILLMENT_PROGRESSION.map(|s| TimelineStep {
            status: s,
            reached: false,
        });
        if let Some(current) = current {
            for (index, step) in steps.iter_mut().enumerate() {
                step.reached = index <= current;
            }
        }
        Self {
            cancelled: status == OrderStatus::Cancelled,
            steps,
        }
    }

    /// Number of steps the order has reached.
    #[must_use]
    pub fn reached_count(&self) -> usize {
        self.steps.iter().filter(|step| step.reached).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_index_follows_progression() {
        assert_eq!(OrderStatus::Pending.progress_index(), Some(0));
        assert_eq!(OrderStatus::Shipped.progress_index(), Some(3));
        assert_eq!(OrderStatus::Delivered.progress_index(), Some(4));
        assert_eq!(OrderStatus::Cancelled.progress_index(), None);
        assert_eq!(OrderStatus::Returned.progress_index(), None);
        assert_eq!(OrderStatus::Unknown.progress_index(), None);
    }

    #[test]
    fn test_cancelled_overrides_timeline() {
        let timeline = OrderTimeline::project(OrderStatus::Cancelled);
        assert!(timeline.cancelled);
        assert_eq!(timeline.reached_count(), 0);
    }

    #[test]
    fn test_delivered_reaches_all_steps() {
        let timeline = OrderTimeline::project(OrderStatus::Delivered);
        assert!(!timeline.cancelled);
        assert_eq!(timeline.reached_count(), 5);
        assert!(timeline.steps.iter().all(|step| step.reached));
    }

    #[test]
    fn test_processing_reaches_first_three() {
        let timeline = OrderTimeline::project(OrderStatus::Processing);
        assert_eq!(timeline.reached_count(), 3);
        assert!(timeline.steps[2].reached);
        assert!(!timeline.steps[3].reached);
    }

    #[test]
    fn test_unknown_status_degrades_gracefully() {
        let status: OrderStatus =
            serde_json::from_str("\"UNKNOWN_FUTURE_STATUS\"").expect("deserialize");
        assert_eq!(status, OrderStatus::Unknown);

        let timeline = OrderTimeline::project(status);
        assert!(!timeline.cancelled);
        assert_eq!(timeline.reached_count(), 0);
    }

    #[test]
    fn test_cancellable_window() {
        assert!(OrderStatus::Pending.is_cancellable());
        assert!(OrderStatus::Confirmed.is_cancellable());
        assert!(!OrderStatus::Shipped.is_cancellable());
        assert!(!OrderStatus::Cancelled.is_cancellable());
    }

    #[test]
    fn test_payment_method_wire_format() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cod).expect("serialize"),
            "\"COD\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Razorpay).expect("serialize"),
            "\"RAZORPAY\""
        );
    }

    #[test]
    fn test_order_status_wire_format() {
        let back: OrderStatus = serde_json::from_str("\"RETURN_REQUESTED\"").expect("deserialize");
        assert_eq!(back, OrderStatus::ReturnRequested);
    }
}

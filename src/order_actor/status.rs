//! # Order Status Machine
//!
//! ```text
//! pending -> accepted -> preparing -> out_for_delivery | ontheway -> delivered -> completed
//! any of the above except completed -> cancelled
//! ```
//!
//! `out_for_delivery` and `ontheway` are the same stage, so moving between them is allowed.
//! `completed` and `cancelled` are terminal. These checks only look at statuses; who may ask
//! for a change is decided in the entity.

use crate::model::{OrderStatus, Role};
use crate::order_actor::OrderError;

/// What a permitted request does to the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Apply the new status and its timestamps.
    Move,
    /// Already there; touch nothing.
    Stay,
}

/// Position along the delivery pipeline. `cancelled` sits outside it.
pub const fn stage(status: OrderStatus) -> Option<u8> {
    match status {
        OrderStatus::Pending => Some(0),
        OrderStatus::Accepted => Some(1),
        OrderStatus::Preparing => Some(2),
        OrderStatus::OutForDelivery | OrderStatus::OnTheWay => Some(3),
        OrderStatus::Delivered => Some(4),
        OrderStatus::Completed => Some(5),
        OrderStatus::Cancelled => None,
    }
}

fn conflict(from: OrderStatus, to: OrderStatus) -> OrderError {
    OrderError::Conflict(format!("cannot move order from {from} to {to}"))
}

/// A vendor or admin setting the status directly.
///
/// Forward moves and `cancelled` are allowed from any non-terminal status.
pub fn check_update(from: OrderStatus, to: OrderStatus) -> Result<Step, OrderError> {
    match (from, to) {
        (OrderStatus::Completed, _) => Err(OrderError::Conflict(
            "order is already completed".to_string(),
        )),
        (OrderStatus::Cancelled, OrderStatus::Cancelled) => Ok(Step::Stay),
        (OrderStatus::Cancelled, _) => Err(conflict(from, to)),
        (_, OrderStatus::Cancelled) => Ok(Step::Move),
        _ if from == to => Ok(Step::Stay),
        _ => match (stage(from), stage(to)) {
            (Some(current), Some(next)) if next >= current => Ok(Step::Move),
            _ => Err(conflict(from, to)),
        },
    }
}

/// The ordering user cancelling. Only before the food leaves the kitchen queue.
pub fn check_self_cancel(from: OrderStatus) -> Result<Step, OrderError> {
    match from {
        OrderStatus::Pending | OrderStatus::Preparing => Ok(Step::Move),
        other => Err(OrderError::Conflict(format!(
            "order cannot be cancelled while {other}"
        ))),
    }
}

/// The ordering user confirming the food arrived.
pub fn check_confirm_delivery(from: OrderStatus) -> Result<Step, OrderError> {
    match from {
        OrderStatus::OutForDelivery | OrderStatus::OnTheWay => Ok(Step::Move),
        other => Err(OrderError::Conflict(format!(
            "cannot confirm delivery of an order that is {other}"
        ))),
    }
}

/// Reason recorded when a cancellation does not give one.
pub const fn default_cancel_reason(role: Role) -> &'static str {
    match role {
        Role::Admin => "Cancelled by admin",
        Role::Vendor => "Cancelled by vendor",
        Role::User => "Cancelled by customer",
    }
}

//! Order status state machine
//!
//! Transition legality lives here as a pure function, separate from
//! storage. Handlers ask this module whether a move is legal, then apply
//! the winner with a status-guarded update.

use thiserror::Error;

use crate::db::models::OrderStatus;

/// Requested transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    Pay,
    Cancel,
}

impl std::fmt::Display for OrderAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderAction::Pay => "pay",
            OrderAction::Cancel => "cancel",
        };
        write!(f, "{s}")
    }
}

/// Illegal transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {action} an order that is {from}")]
pub struct TransitionError {
    pub from: OrderStatus,
    pub action: OrderAction,
}

/// Next status for `action` applied to `current`.
///
/// `pending` is the only state with outgoing edges: pay moves it to
/// `paid`, cancel to `canceled`. Canceling a paid order is refused;
/// undoing a payment is a refund, which is a different flow entirely.
pub fn transition(
    current: OrderStatus,
    action: OrderAction,
) -> Result<OrderStatus, TransitionError> {
    match (current, action) {
        (OrderStatus::Pending, OrderAction::Pay) => Ok(OrderStatus::Paid),
        (OrderStatus::Pending, OrderAction::Cancel) => Ok(OrderStatus::Canceled),
        (from, action) => Err(TransitionError { from, action }),
    }
}

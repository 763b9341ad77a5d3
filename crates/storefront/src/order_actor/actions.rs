use crate::model::{OrderStatus, Role, UserId};

/// A request by `by`, acting in `role`, to move an order to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub to: OrderStatus,
    pub by: UserId,
    pub role: Role,
}

/// Transitions return the status the order had before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderAction {
    Transition(StatusChange),
}

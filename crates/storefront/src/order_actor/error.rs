use crate::model::{OrderStatus, Role, UserId};
use crate::product_actor::ProductError;
use crate::wallet_actor::WalletError;
use record_store::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Invalid order: {0}")]
    Invalid(String),

    #[error("Payment failed: {0}")]
    Payment(#[from] WalletError),

    #[error("Stock update failed: {0}")]
    Stock(#[from] ProductError),

    #[error("A {role} may not move an order from {from} to {to}")]
    TransitionNotAllowed {
        from: OrderStatus,
        to: OrderStatus,
        role: Role,
    },

    #[error("User {0} is not the seller of this order")]
    NotSeller(UserId),

    #[error("Order can no longer be edited (status {0})")]
    NotEditable(OrderStatus),

    #[error("Store communication error: {0}")]
    Store(String),
}

impl From<StoreError> for OrderError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::Store(other.to_string()),
        }
    }
}

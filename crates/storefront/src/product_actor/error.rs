use record_store::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Invalid product: {0}")]
    Invalid(String),

    #[error("Product {0} is not for sale")]
    NotForSale(String),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Store communication error: {0}")]
    Store(String),
}

impl From<StoreError> for ProductError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ProductError::NotFound(id),
            other => ProductError::Store(other.to_string()),
        }
    }
}

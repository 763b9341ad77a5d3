//! # Cart Table
//!
//! Flat cart rows, one per (shopper, product). Grouping rows into per-seller
//! carts happens on read in [`crate::services::cart`].

use crate::model::{CartFilter, CartItem, CartItemCreate, CartItemId, CartItemUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use record_store::{Record, StoreError, Table, TableClient};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart item not found: {0}")]
    NotFound(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Store communication error: {0}")]
    Store(String),
}

impl From<StoreError> for CartError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => CartError::NotFound(id),
            other => CartError::Store(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum CartAction {}

#[async_trait]
impl Record for CartItem {
    type Id = CartItemId;
    type Create = CartItemCreate;
    type Update = CartItemUpdate;
    type Filter = CartFilter;
    type SortKey = DateTime<Utc>;
    type Action = CartAction;
    type ActionResult = ();
    type Context = ();
    type Error = CartError;

    fn from_create_params(id: CartItemId, params: CartItemCreate) -> Result<Self, Self::Error> {
        if params.quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }
        Ok(CartItem {
            id,
            user: params.user,
            product: params.product,
            quantity: params.quantity,
            unit_price: params.unit_price,
            total: params.unit_price * u64::from(params.quantity),
            created_at: Utc::now(),
        })
    }

    fn matches(&self, filter: &CartFilter) -> bool {
        filter.matches(self)
    }

    fn sort_key(&self) -> DateTime<Utc> {
        self.created_at
    }

    async fn on_update(&mut self, update: CartItemUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if update.quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }
        if let Some(unit_price) = update.unit_price {
            self.unit_price = unit_price;
        }
        self.quantity = update.quantity;
        self.total = self.unit_price * u64::from(self.quantity);
        Ok(())
    }

    async fn handle_action(&mut self, action: CartAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}

pub fn new(buffer_size: usize) -> (Table<CartItem>, TableClient<CartItem>) {
    Table::new(buffer_size)
}

//! # Order Table
//!
//! Orders move money and stock, so this table reaches into the product and
//! wallet tables through its [`OrderContext`]:
//!
//! - **create**: the buyer's wallet is debited by the order total, then each
//!   item's stock is decremented. A failed decrement puts back what was
//!   already taken and refunds the buyer; the order is not stored.
//! - **cancel**: every item's quantity goes back to stock and the buyer is
//!   refunded the order total.
//! - **complete**: the seller's wallet is credited the order total.
//!
//! Which role may make which move is decided by
//! [`OrderStatus::allows`](crate::model::OrderStatus::allows). A seller may
//! only act on their own orders.
//!
//! The dependency graph is acyclic (orders -> products, wallets), so the
//! table shuts down cleanly once its own clients are dropped.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{ProductClient, WalletClient};
use crate::model::Order;
use record_store::{Table, TableClient};

/// Clients the order table calls into from its hooks.
#[derive(Clone)]
pub struct OrderContext {
    pub products: ProductClient,
    pub wallets: WalletClient,
}

pub fn new(buffer_size: usize) -> (Table<Order>, TableClient<Order>) {
    Table::new(buffer_size)
}

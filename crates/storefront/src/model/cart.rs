use super::{CartItemId, Product, ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored cart row: a quantity of one product for one shopper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub user: UserId,
    pub product: ProductId,
    pub quantity: u32,
    /// Unit price captured when the row was written.
    pub unit_price: u64,
    /// `unit_price * quantity`, kept in step with every quantity change.
    pub total: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CartItemCreate {
    pub user: UserId,
    pub product: ProductId,
    pub quantity: u32,
    pub unit_price: u64,
}

#[derive(Debug, Clone)]
pub struct CartItemUpdate {
    pub quantity: u32,
    pub unit_price: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct CartFilter {
    pub user: Option<UserId>,
    pub product: Option<ProductId>,
}

impl CartFilter {
    pub fn of_user(user: UserId) -> Self {
        Self {
            user: Some(user),
            product: None,
        }
    }

    pub fn matches(&self, item: &CartItem) -> bool {
        self.user.is_none_or(|user| user == item.user)
            && self.product.is_none_or(|product| product == item.product)
    }
}

/// A cart row joined with its product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub item: CartItemId,
    pub product: Product,
    pub quantity: u32,
    pub total: u64,
}

/// Cart rows of one shopper that share a seller. Never stored; rebuilt from
/// the flat rows on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cart {
    pub seller_id: UserId,
    pub seller_name: String,
    pub lines: Vec<CartLine>,
    pub total: u64,
}

impl Cart {
    pub fn item_ids(&self) -> Vec<CartItemId> {
        self.lines.iter().map(|line| line.item).collect()
    }
}

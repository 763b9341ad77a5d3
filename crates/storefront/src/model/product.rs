use super::{ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// `floor(amount * percent / 100)`.
pub fn percent_of(amount: u64, percent: u8) -> u64 {
    amount * u64::from(percent) / 100
}

/// `amount` with `percent` taken off, rounding the reduction down.
pub fn discounted(amount: u64, percent: u8) -> u64 {
    amount - percent_of(amount, percent.min(100))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductStatus {
    Available,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    Unavailable,
}

impl Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProductStatus::Available => "Available",
            ProductStatus::OutOfStock => "Out of Stock",
            ProductStatus::Unavailable => "Unavailable",
        })
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(ProductStatus::Available),
            "Out of Stock" => Ok(ProductStatus::OutOfStock),
            "Unavailable" => Ok(ProductStatus::Unavailable),
            other => Err(format!("unknown product status: {other}")),
        }
    }
}

/// Single items and bundled collections share the product table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProductKind {
    #[default]
    Product,
    Collection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub owner: UserId,
    pub name: String,
    pub description: String,
    /// List price in coins.
    pub price: u64,
    /// Percentage taken off `price`, 0..=100.
    pub discount: u8,
    pub stock: u32,
    pub category: String,
    pub brand: String,
    /// Wear condition as a percentage, 100 being new.
    pub condition: u8,
    pub usage: String,
    pub other_message: String,
    pub status: ProductStatus,
    pub kind: ProductKind,
    pub image_url: Option<String>,
    pub sub_images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Price per unit after the product's own discount.
    pub fn unit_price(&self) -> u64 {
        discounted(self.price, self.discount)
    }

    pub fn is_purchasable(&self) -> bool {
        self.status == ProductStatus::Available && self.stock > 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub owner: UserId,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub discount: u8,
    pub stock: u32,
    pub category: String,
    pub brand: String,
    pub condition: u8,
    pub usage: String,
    pub other_message: String,
    pub status: ProductStatus,
    pub kind: ProductKind,
    pub image_url: Option<String>,
    pub sub_images: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub discount: Option<u8>,
    pub stock: Option<u32>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub condition: Option<u8>,
    pub usage: Option<String>,
    pub other_message: Option<String>,
    pub status: Option<ProductStatus>,
    pub image_url: Option<String>,
    pub sub_images: Option<Vec<String>>,
}

/// Listing predicate. Unset fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub owner: Option<UserId>,
    pub kind: Option<ProductKind>,
    pub category: Option<String>,
    /// Case-insensitive substring of the name.
    pub search: Option<String>,
    /// Only `Available` rows with stock left.
    pub purchasable: bool,
    pub exclude: Option<ProductId>,
}

impl ProductFilter {
    /// What a shopper may see: purchasable rows of one kind.
    pub fn storefront(kind: ProductKind) -> Self {
        Self {
            kind: Some(kind),
            purchasable: true,
            ..Self::default()
        }
    }

    pub fn owned_by(owner: UserId) -> Self {
        Self {
            owner: Some(owner),
            ..Self::default()
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        if self.purchasable && !product.is_purchasable() {
            return false;
        }
        if self.exclude == Some(product.id) {
            return false;
        }
        if self.owner.is_some_and(|owner| owner != product.owner) {
            return false;
        }
        if self.kind.is_some_and(|kind| kind != product.kind) {
            return false;
        }
        if let Some(category) = &self.category {
            if *category != product.category {
                return false;
            }
        }
        match &self.search {
            Some(needle) => product
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

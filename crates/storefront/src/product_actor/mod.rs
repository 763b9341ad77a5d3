//! # Product Table
//!
//! Holds the catalog: single products and collections. Stock is only ever
//! changed through [`ProductAction`]s so that concurrent purchases of the last
//! unit cannot both succeed.
//!
//! A product whose stock reaches zero flips from `Available` to
//! `Out of Stock`, and back again when stock is restored.
//!
//! ```rust
//! use storefront::clients::ProductClient;
//! use storefront::model::{ProductCreate, ProductKind, ProductStatus, UserId};
//! use storefront::product_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (table, inner) = product_actor::new(32);
//!     let client = ProductClient::new(inner);
//!     tokio::spawn(table.run(()));
//!
//!     let id = client
//!         .create_product(ProductCreate {
//!             owner: UserId(1),
//!             name: "Canvas Tote".into(),
//!             description: String::new(),
//!             price: 40,
//!             discount: 0,
//!             stock: 2,
//!             category: "bags".into(),
//!             brand: String::new(),
//!             condition: 100,
//!             usage: String::new(),
//!             other_message: String::new(),
//!             status: ProductStatus::Available,
//!             kind: ProductKind::Product,
//!             image_url: None,
//!             sub_images: Vec::new(),
//!         })
//!         .await?;
//!
//!     assert_eq!(client.decrement_stock(id, 2).await?, 0);
//!     assert!(client.decrement_stock(id, 1).await.is_err());
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use record_store::{Table, TableClient};

pub fn new(buffer_size: usize) -> (Table<Product>, TableClient<Product>) {
    Table::new(buffer_size)
}

//! # Record Store
//!
//! An in-process stand-in for a hosted row store: typed tables with CRUD,
//! filtered and paged listings, and per-row atomic actions.
//!
//! ## Model
//!
//! Each table is a tokio task owning every row of one [`Record`] type. Callers
//! talk to it through a cloneable [`TableClient`], which sends a
//! [`TableRequest`] over an mpsc channel and awaits the reply on a oneshot
//! channel. The table processes requests strictly one at a time, so:
//!
//! - an [`Action`](Record::Action) is a read-modify-write that no other request
//!   can interleave with (stock decrements, balance adjustments);
//! - a hook that fails leaves the stored row untouched;
//! - work spanning several tables is a sequence of independent awaits with no
//!   shared transaction.
//!
//! ## Layers
//!
//! 1. [`Record`] - row type, payloads, filter, sort key, hooks and actions
//! 2. [`Table`] - the task holding the rows
//! 3. [`TableClient`] - typed async handle
//! 4. [`RecordClient`] - trait for domain wrappers mapping [`StoreError`]
//!    into their own error type
//!
//! ## Listing
//!
//! [`Query`] combines the record's filter with a [`Direction`] over its sort
//! key and an optional [`Range`]. The reply is a [`Page`] carrying the window
//! and the exact count of matching rows; [`total_pages`] turns that into a
//! page count.
//!
//! ```rust
//! use record_store::{Query, Record, Table};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Item { id: u32, name: String, stock: u32 }
//! #[derive(Debug)] struct ItemCreate { name: String, stock: u32 }
//! #[derive(Debug)] struct ItemUpdate;
//! #[derive(Debug)] struct InStock;
//! #[derive(Debug)] enum ItemAction { Take(u32) }
//! #[derive(Debug, thiserror::Error)] #[error("not enough stock")] struct ItemError;
//!
//! #[async_trait]
//! impl Record for Item {
//!     type Id = u32;
//!     type Create = ItemCreate;
//!     type Update = ItemUpdate;
//!     type Filter = InStock;
//!     type SortKey = String;
//!     type Action = ItemAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = ItemError;
//!
//!     fn from_create_params(id: u32, p: ItemCreate) -> Result<Self, ItemError> {
//!         Ok(Self { id, name: p.name, stock: p.stock })
//!     }
//!     fn matches(&self, _: &InStock) -> bool { self.stock > 0 }
//!     fn sort_key(&self) -> String { self.name.clone() }
//!     async fn on_update(&mut self, _: ItemUpdate, _: &()) -> Result<(), ItemError> { Ok(()) }
//!     async fn handle_action(&mut self, action: ItemAction, _: &()) -> Result<u32, ItemError> {
//!         let ItemAction::Take(n) = action;
//!         self.stock = self.stock.checked_sub(n).ok_or(ItemError)?;
//!         Ok(self.stock)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (table, client) = Table::<Item>::new(16);
//!     tokio::spawn(table.run(()));
//!
//!     let pen = client.create(ItemCreate { name: "pen".into(), stock: 1 }).await.unwrap();
//!     client.create(ItemCreate { name: "ink".into(), stock: 4 }).await.unwrap();
//!
//!     assert_eq!(client.perform_action(pen, ItemAction::Take(1)).await.unwrap(), 0);
//!
//!     let page = client.list(Query::new(InStock)).await.unwrap();
//!     assert_eq!(page.total, 1);
//!     assert_eq!(page.items[0].name, "ink");
//! }
//! ```
//!
//! ## Testing
//!
//! See [`mock`] for tables answered from scripted expectations.

pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod query;
pub mod record;
pub mod table;
pub mod tracing;

pub use client::TableClient;
pub use client_trait::RecordClient;
pub use error::StoreError;
pub use message::{Response, TableRequest};
pub use query::{total_pages, Direction, Page, Query, Range};
pub use record::Record;
pub use table::Table;

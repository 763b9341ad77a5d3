//! # Storefront
//!
//! A second-hand storefront: shoppers browse a catalog, fill a cart that is
//! split by seller, and check out with coins from their wallet, optionally
//! with a coupon. Sellers confirm or cancel orders; couriers move them
//! through pickup and delivery to completion.
//!
//! ## Layout
//!
//! - [`model`]: the records and their filters
//! - `*_actor`: one [`record_store::Table`] per record, with its validation,
//!   hooks and atomic actions
//! - [`clients`]: typed wrappers over the table clients
//! - [`services`]: the flows built from client calls
//! - [`config`]: command line and environment configuration
//! - [`lifecycle`]: starts and stops the whole system
//!
//! Money never leaves the wallet table except through its `Credit` and
//! `Debit` actions, and stock never leaves the product table except through
//! `DecrementStock` and `RestoreStock`, so concurrent checkouts cannot
//! oversell or overdraw.

pub mod account_actor;
pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod coupon_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod profile_actor;
pub mod review_actor;
pub mod services;
pub mod storage_actor;
pub mod transaction_actor;
pub mod wallet_actor;

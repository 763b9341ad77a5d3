//! Records and views of the storefront.
//!
//! Rows are plain data; the tables that hold them live in the `*_actor`
//! modules, which implement [`record_store::Record`] for each of them.

pub mod account;
pub mod cart;
pub mod coupon;
pub mod ids;
pub mod object;
pub mod order;
pub mod product;
pub mod profile;
pub mod review;
pub mod transaction;
pub mod wallet;

pub use account::*;
pub use cart::*;
pub use coupon::*;
pub use ids::*;
pub use object::*;
pub use order::*;
pub use product::*;
pub use profile::*;
pub use review::*;
pub use transaction::*;
pub use wallet::*;

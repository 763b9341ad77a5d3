//! # Table Clients
//!
//! One typed wrapper per table. Each implements
//! [`RecordClient`](record_store::RecordClient) for `get`, `list`, `count` and
//! `delete`, and adds the operations specific to its records. Errors coming
//! back from a table are turned into the record's own error type, so a
//! wallet refusing a debit surfaces as
//! `WalletError::InsufficientBalance` rather than a string.

pub mod account_client;
pub mod cart_client;
pub mod coupon_client;
pub mod order_client;
pub mod product_client;
pub mod profile_client;
pub mod review_client;
pub mod storage_client;
pub mod transaction_client;
pub mod wallet_client;

pub use account_client::AccountClient;
pub use cart_client::CartClient;
pub use coupon_client::CouponClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
pub use profile_client::ProfileClient;
pub use record_store::RecordClient;
pub use review_client::ReviewClient;
pub use storage_client::StorageClient;
pub use transaction_client::TransactionClient;
pub use wallet_client::WalletClient;

use record_store::StoreError;

/// Recovers the record's error from a [`StoreError`], falling back to the
/// error's transport variants.
pub(crate) fn record_error<E>(e: StoreError) -> E
where
    E: std::error::Error + Send + Sync + 'static + From<StoreError>,
{
    e.into_record_error::<E>().unwrap_or_else(E::from)
}

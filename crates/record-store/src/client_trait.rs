//! # RecordClient Trait
//!
//! Domain clients wrap a [`TableClient`] and translate [`StoreError`] into
//! their own error type. Implementing [`RecordClient`] gives them `get`,
//! `list`, `count` and `delete` for free.
//!
//! ```rust
//! use record_store::{Record, RecordClient, StoreError, TableClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Coupon { id: u32, name: String }
//! #[derive(Debug)] struct CouponCreate { name: String }
//! #[derive(Debug)] struct CouponUpdate;
//! #[derive(Debug)] enum CouponAction {}
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("{0}")]
//! struct CouponError(String);
//!
//! #[async_trait]
//! impl Record for Coupon {
//!     type Id = u32;
//!     type Create = CouponCreate;
//!     type Update = CouponUpdate;
//!     type Filter = Option<String>;
//!     type SortKey = u32;
//!     type Action = CouponAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = CouponError;
//!
//!     fn from_create_params(id: u32, p: CouponCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, name: p.name })
//!     }
//!     fn matches(&self, name: &Option<String>) -> bool {
//!         name.as_ref().map_or(true, |n| *n == self.name)
//!     }
//!     fn sort_key(&self) -> u32 { self.id }
//!     async fn on_update(&mut self, _: CouponUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: CouponAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! struct CouponClient { inner: TableClient<Coupon> }
//!
//! impl RecordClient<Coupon> for CouponClient {
//!     type Error = CouponError;
//!
//!     fn inner(&self) -> &TableClient<Coupon> { &self.inner }
//!
//!     fn map_error(e: StoreError) -> CouponError { CouponError(e.to_string()) }
//! }
//!
//! async fn usage(client: CouponClient) {
//!     let _ = client.get(1).await;
//!     let _ = client.count(Some("SAVE10".into())).await;
//! }
//! ```

use crate::{Page, Query, Record, StoreError, TableClient};
use async_trait::async_trait;

#[async_trait]
pub trait RecordClient<T: Record>: Send + Sync {
    type Error: Send + Sync;

    fn inner(&self) -> &TableClient<T>;

    fn map_error(e: StoreError) -> Self::Error;

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, query: Query<T::Filter>) -> Result<Page<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(query).await.map_err(Self::map_error)
    }

    async fn count(&self, filter: T::Filter) -> Result<usize, Self::Error> {
        self.inner().count(filter).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}

use super::record_error;
use crate::coupon_actor::CouponError;
use crate::model::{Coupon, CouponCreate, CouponFilter, CouponId};
use async_trait::async_trait;
use record_store::{Query, RecordClient, StoreError, TableClient};
use tracing::instrument;

#[derive(Clone)]
pub struct CouponClient {
    inner: TableClient<Coupon>,
}

#[async_trait]
impl RecordClient<Coupon> for CouponClient {
    type Error = CouponError;

    fn inner(&self) -> &TableClient<Coupon> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        record_error(e)
    }
}

impl CouponClient {
    pub fn new(inner: TableClient<Coupon>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_coupon(&self, params: CouponCreate) -> Result<CouponId, CouponError> {
        self.inner.create(params).await.map_err(record_error)
    }

    /// Looks a coupon up by its exact code.
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Coupon>, CouponError> {
        let filter = CouponFilter {
            name: Some(name.to_string()),
        };
        Ok(self
            .list(Query::new(filter).limit(1))
            .await?
            .items
            .into_iter()
            .next())
    }
}

use super::record_error;
use crate::model::{Review, ReviewCreate, ReviewFilter, ReviewId, UserId};
use crate::review_actor::ReviewError;
use async_trait::async_trait;
use record_store::{Page, Query, RecordClient, StoreError, TableClient};
use tracing::instrument;

#[derive(Clone)]
pub struct ReviewClient {
    inner: TableClient<Review>,
}

#[async_trait]
impl RecordClient<Review> for ReviewClient {
    type Error = ReviewError;

    fn inner(&self) -> &TableClient<Review> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        record_error(e)
    }
}

impl ReviewClient {
    pub fn new(inner: TableClient<Review>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_review(&self, params: ReviewCreate) -> Result<ReviewId, ReviewError> {
        self.inner.create(params).await.map_err(record_error)
    }

    /// Reviews about `subject`, newest first.
    pub async fn reviews_of(
        &self,
        subject: UserId,
        page: usize,
        limit: usize,
    ) -> Result<Page<Review>, ReviewError> {
        let filter = ReviewFilter {
            subject: Some(subject),
            reviewer: None,
        };
        self.list(Query::new(filter).descending().page(page, limit))
            .await
    }

    /// Every review about `subject`, in no particular window.
    pub async fn all_reviews_of(&self, subject: UserId) -> Result<Vec<Review>, ReviewError> {
        let filter = ReviewFilter {
            subject: Some(subject),
            reviewer: None,
        };
        Ok(self.list(Query::new(filter)).await?.items)
    }
}

use super::record_error;
use crate::model::{
    CoinTransaction, CoinTransactionCreate, CoinTransactionId, TransactionFilter, UserId,
};
use crate::transaction_actor::TransactionError;
use async_trait::async_trait;
use record_store::{Page, Query, RecordClient, StoreError, TableClient};
use tracing::instrument;

#[derive(Clone)]
pub struct TransactionClient {
    inner: TableClient<CoinTransaction>,
}

#[async_trait]
impl RecordClient<CoinTransaction> for TransactionClient {
    type Error = TransactionError;

    fn inner(&self) -> &TableClient<CoinTransaction> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        record_error(e)
    }
}

impl TransactionClient {
    pub fn new(inner: TableClient<CoinTransaction>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn record(
        &self,
        params: CoinTransactionCreate,
    ) -> Result<CoinTransactionId, TransactionError> {
        self.inner.create(params).await.map_err(record_error)
    }

    /// A user's transactions, newest first.
    pub async fn history_of(
        &self,
        user: UserId,
        page: usize,
        limit: usize,
    ) -> Result<Page<CoinTransaction>, TransactionError> {
        let filter = TransactionFilter { user: Some(user) };
        self.list(Query::new(filter).descending().page(page, limit))
            .await
    }
}

use super::record_error;
use crate::account_actor::{AccountAction, AccountError};
use crate::model::{Account, AccountCreate, AccountFilter, AccountUpdate, UserId};
use async_trait::async_trait;
use record_store::{Query, RecordClient, StoreError, TableClient};
use tracing::instrument;

#[derive(Clone)]
pub struct AccountClient {
    inner: TableClient<Account>,
}

#[async_trait]
impl RecordClient<Account> for AccountClient {
    type Error = AccountError;

    fn inner(&self) -> &TableClient<Account> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        record_error(e)
    }
}

impl AccountClient {
    pub fn new(inner: TableClient<Account>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_account(&self, params: AccountCreate) -> Result<UserId, AccountError> {
        self.inner.create(params).await.map_err(record_error)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let filter = AccountFilter {
            email: Some(email.to_string()),
        };
        Ok(self
            .list(Query::new(filter).limit(1))
            .await?
            .items
            .into_iter()
            .next())
    }

    #[instrument(skip(self, password))]
    pub async fn verify(&self, id: UserId, password: &str) -> Result<bool, AccountError> {
        self.inner
            .perform_action(id, AccountAction::Verify(password.to_string()))
            .await
            .map_err(record_error)
    }

    #[instrument(skip(self))]
    pub async fn update_account(
        &self,
        id: UserId,
        update: AccountUpdate,
    ) -> Result<Account, AccountError> {
        self.inner.update(id, update).await.map_err(record_error)
    }
}

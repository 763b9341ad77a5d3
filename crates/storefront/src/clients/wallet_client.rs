use super::record_error;
use crate::model::{UserId, Wallet, WalletCreate, WalletFilter, WalletId};
use crate::wallet_actor::{WalletAction, WalletError};
use async_trait::async_trait;
use record_store::{Query, RecordClient, StoreError, TableClient};
use tracing::{info, instrument};

/// Wallet access keyed by user rather than by wallet id.
#[derive(Clone)]
pub struct WalletClient {
    inner: TableClient<Wallet>,
}

#[async_trait]
impl RecordClient<Wallet> for WalletClient {
    type Error = WalletError;

    fn inner(&self) -> &TableClient<Wallet> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        record_error(e)
    }
}

impl WalletClient {
    pub fn new(inner: TableClient<Wallet>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn open_wallet(&self, user: UserId) -> Result<WalletId, WalletError> {
        self.inner
            .create(WalletCreate { user, balance: 0 })
            .await
            .map_err(record_error)
    }

    pub async fn wallet_of(&self, user: UserId) -> Result<Wallet, WalletError> {
        let page = self
            .list(Query::new(WalletFilter { user: Some(user) }).limit(1))
            .await?;
        page.items
            .into_iter()
            .next()
            .ok_or(WalletError::NoWallet(user))
    }

    #[instrument(skip(self))]
    pub async fn balance_of(&self, user: UserId) -> Result<u64, WalletError> {
        self.apply(user, WalletAction::Balance).await
    }

    /// Adds coins. Returns the new balance.
    #[instrument(skip(self))]
    pub async fn credit(&self, user: UserId, amount: u64) -> Result<u64, WalletError> {
        let balance = self.apply(user, WalletAction::Credit(amount)).await?;
        info!(%user, amount, balance, "Wallet credited");
        Ok(balance)
    }

    /// Removes coins, failing instead of going negative. Returns the new
    /// balance.
    #[instrument(skip(self))]
    pub async fn debit(&self, user: UserId, amount: u64) -> Result<u64, WalletError> {
        let balance = self.apply(user, WalletAction::Debit(amount)).await?;
        info!(%user, amount, balance, "Wallet debited");
        Ok(balance)
    }

    async fn apply(&self, user: UserId, action: WalletAction) -> Result<u64, WalletError> {
        let wallet = self.wallet_of(user).await?;
        self.inner
            .perform_action(wallet.id, action)
            .await
            .map_err(record_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_store::mock::MockTable;
    use record_store::Page;

    fn wallet(user: u32, balance: u64) -> Wallet {
        Wallet {
            id: WalletId(user),
            user: UserId(user),
            balance,
        }
    }

    #[tokio::test]
    async fn test_debit_looks_up_wallet_by_user() {
        let mut mock = MockTable::<Wallet>::new();
        mock.expect_list().return_ok(Page {
            items: vec![wallet(3, 500)],
            total: 1,
        });
        mock.expect_action(WalletId(3)).return_ok(380);

        let client = WalletClient::new(mock.client());
        assert_eq!(client.debit(UserId(3), 120).await.unwrap(), 380);
        mock.verify();
    }

    #[tokio::test]
    async fn test_user_without_wallet() {
        let mut mock = MockTable::<Wallet>::new();
        mock.expect_list().return_ok(Page::empty());

        let client = WalletClient::new(mock.client());
        assert_eq!(
            client.credit(UserId(8), 10).await,
            Err(WalletError::NoWallet(UserId(8)))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_insufficient_balance_surfaces_typed() {
        let mut mock = MockTable::<Wallet>::new();
        mock.expect_list().return_ok(Page {
            items: vec![wallet(2, 50)],
            total: 1,
        });
        mock.expect_action(WalletId(2))
            .return_err(StoreError::Record(Box::new(
                WalletError::InsufficientBalance {
                    required: 80,
                    available: 50,
                },
            )));

        let client = WalletClient::new(mock.client());
        assert_eq!(
            client.debit(UserId(2), 80).await,
            Err(WalletError::InsufficientBalance {
                required: 80,
                available: 50
            })
        );
    }
}

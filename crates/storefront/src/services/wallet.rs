//! Coin balance, coin purchases and purchase history.

use super::payments::{ChargeOutcome, PaymentError, PaymentGateway};
use crate::clients::{TransactionClient, WalletClient};
use crate::config::CoinRates;
use crate::model::{
    CoinTransaction, CoinTransactionCreate, CoinTransactionId, TransactionStatus, UserId,
};
use crate::transaction_actor::TransactionError;
use crate::wallet_actor::WalletError;
use record_store::total_pages;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

const CENTS_PER_UNIT: u64 = 100;

#[derive(Debug, Error)]
pub enum WalletServiceError {
    #[error("The smallest purchase is {minimum} coins")]
    BelowMinimum { minimum: u64 },

    #[error("Purchase of {0} is too large")]
    TooLarge(u64),

    #[error("Payment declined: {0}")]
    Declined(String),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// A price both ways: coins and what they cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub coins: u64,
    pub amount_cents: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub transaction: CoinTransactionId,
    pub coins: u64,
    pub balance: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionPage {
    pub items: Vec<CoinTransaction>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

#[derive(Clone)]
pub struct WalletService {
    wallets: WalletClient,
    transactions: TransactionClient,
    gateway: Arc<dyn PaymentGateway>,
    rates: CoinRates,
    page_size: usize,
}

impl WalletService {
    pub fn new(
        wallets: WalletClient,
        transactions: TransactionClient,
        gateway: Arc<dyn PaymentGateway>,
        rates: CoinRates,
        page_size: usize,
    ) -> Self {
        Self {
            wallets,
            transactions,
            gateway,
            rates,
            page_size,
        }
    }

    /// Quote for a number of coins, raised to the minimum purchase.
    pub fn quote_coins(&self, coins: u64) -> Result<Quote, WalletServiceError> {
        let coins = coins.max(self.rates.min_coins);
        let cents = coins
            .checked_mul(CENTS_PER_UNIT)
            .ok_or(WalletServiceError::TooLarge(coins))?;
        Ok(Quote {
            coins,
            amount_cents: cents / self.rates.coins_per_unit.max(1),
        })
    }

    /// Quote for an amount of money, raised to one currency unit.
    pub fn quote_amount(&self, amount_cents: u64) -> Result<Quote, WalletServiceError> {
        let amount_cents = amount_cents.max(CENTS_PER_UNIT);
        let coins = amount_cents
            .checked_mul(self.rates.coins_per_unit)
            .ok_or(WalletServiceError::TooLarge(amount_cents))?;
        Ok(Quote {
            coins: coins / CENTS_PER_UNIT,
            amount_cents,
        })
    }

    pub async fn balance(&self, user: UserId) -> Result<u64, WalletServiceError> {
        Ok(self.wallets.balance_of(user).await?)
    }

    /// Charges the card for `coins` and credits them. Every attempt that
    /// reaches the gateway is recorded, failed ones as `Failed`.
    #[instrument(skip(self, card))]
    pub async fn purchase(
        &self,
        user: UserId,
        coins: u64,
        card: &str,
    ) -> Result<PurchaseReceipt, WalletServiceError> {
        if coins < self.rates.min_coins {
            return Err(WalletServiceError::BelowMinimum {
                minimum: self.rates.min_coins,
            });
        }
        let quote = self.quote_coins(coins)?;
        // Fail before charging if the user has no wallet to credit.
        self.wallets.wallet_of(user).await?;

        let failure = match self.gateway.charge(quote.amount_cents, card).await {
            Ok(ChargeOutcome::Succeeded) => None,
            Ok(ChargeOutcome::Declined(status)) => Some(WalletServiceError::Declined(status)),
            Err(e) => Some(WalletServiceError::Payment(e)),
        };

        if let Some(error) = failure {
            warn!(%user, error = %error, "Coin purchase failed");
            self.record(user, quote, TransactionStatus::Failed).await?;
            return Err(error);
        }

        let balance = self.wallets.credit(user, quote.coins).await?;
        let transaction = self
            .record(user, quote, TransactionStatus::Succeeded)
            .await?;
        info!(%user, coins = quote.coins, balance, "Coins purchased");
        Ok(PurchaseReceipt {
            transaction,
            coins: quote.coins,
            balance,
        })
    }

    pub async fn history(
        &self,
        user: UserId,
        page: usize,
    ) -> Result<TransactionPage, WalletServiceError> {
        let page = page.max(1);
        let result = self
            .transactions
            .history_of(user, page, self.page_size)
            .await?;
        Ok(TransactionPage {
            total_pages: total_pages(result.total, self.page_size),
            total: result.total,
            items: result.items,
            page,
        })
    }

    async fn record(
        &self,
        user: UserId,
        quote: Quote,
        status: TransactionStatus,
    ) -> Result<CoinTransactionId, WalletServiceError> {
        Ok(self
            .transactions
            .record(CoinTransactionCreate {
                user,
                coins: quote.coins,
                amount_cents: quote.amount_cents,
                status,
            })
            .await?)
    }
}

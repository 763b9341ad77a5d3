//! # Coin Transaction Table
//!
//! Append-only record of coin purchases, successful or not.

use crate::model::{CoinTransaction, CoinTransactionCreate, CoinTransactionId, TransactionFilter};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use record_store::{Record, StoreError, Table, TableClient};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransactionError {
    #[error("Transaction not found: {0}")]
    NotFound(String),

    #[error("Transactions cannot be modified")]
    Immutable,

    #[error("Store communication error: {0}")]
    Store(String),
}

impl From<StoreError> for TransactionError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => TransactionError::NotFound(id),
            other => TransactionError::Store(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransactionUpdate;

#[derive(Debug, Clone)]
pub enum TransactionAction {}

#[async_trait]
impl Record for CoinTransaction {
    type Id = CoinTransactionId;
    type Create = CoinTransactionCreate;
    type Update = TransactionUpdate;
    type Filter = TransactionFilter;
    type SortKey = DateTime<Utc>;
    type Action = TransactionAction;
    type ActionResult = ();
    type Context = ();
    type Error = TransactionError;

    fn from_create_params(
        id: CoinTransactionId,
        params: CoinTransactionCreate,
    ) -> Result<Self, Self::Error> {
        Ok(CoinTransaction {
            id,
            user: params.user,
            coins: params.coins,
            amount_cents: params.amount_cents,
            status: params.status,
            created_at: Utc::now(),
        })
    }

    fn matches(&self, filter: &TransactionFilter) -> bool {
        filter.user.is_none_or(|user| user == self.user)
    }

    fn sort_key(&self) -> DateTime<Utc> {
        self.created_at
    }

    async fn on_update(&mut self, _update: TransactionUpdate, _ctx: &()) -> Result<(), Self::Error> {
        Err(TransactionError::Immutable)
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        Err(TransactionError::Immutable)
    }

    async fn handle_action(
        &mut self,
        action: TransactionAction,
        _ctx: &(),
    ) -> Result<(), Self::Error> {
        match action {}
    }
}

pub fn new(buffer_size: usize) -> (Table<CoinTransaction>, TableClient<CoinTransaction>) {
    Table::new(buffer_size)
}

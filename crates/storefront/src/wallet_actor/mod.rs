//! # Wallet Table
//!
//! One coin balance per user. Balances only move through [`WalletAction`]s,
//! which the table applies one at a time, so two purchases racing on the same
//! wallet cannot both spend the same coins.

use crate::model::{UserId, Wallet, WalletCreate, WalletFilter, WalletId};
use async_trait::async_trait;
use record_store::{Record, StoreError, Table, TableClient};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WalletError {
    #[error("Wallet not found: {0}")]
    NotFound(String),

    #[error("No wallet for user {0}")]
    NoWallet(UserId),

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: u64, available: u64 },

    #[error("Balance overflow")]
    Overflow,

    #[error("Store communication error: {0}")]
    Store(String),
}

impl From<StoreError> for WalletError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => WalletError::NotFound(id),
            other => WalletError::Store(other.to_string()),
        }
    }
}

/// Each action returns the balance afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletAction {
    Balance,
    Credit(u64),
    Debit(u64),
}

/// Wallets are never edited directly; balance changes go through actions.
#[derive(Debug, Clone)]
pub struct WalletUpdate;

#[async_trait]
impl Record for Wallet {
    type Id = WalletId;
    type Create = WalletCreate;
    type Update = WalletUpdate;
    type Filter = WalletFilter;
    type SortKey = WalletId;
    type Action = WalletAction;
    type ActionResult = u64;
    type Context = ();
    type Error = WalletError;

    fn from_create_params(id: WalletId, params: WalletCreate) -> Result<Self, Self::Error> {
        Ok(Wallet {
            id,
            user: params.user,
            balance: params.balance,
        })
    }

    fn matches(&self, filter: &WalletFilter) -> bool {
        filter.user.is_none_or(|user| user == self.user)
    }

    fn sort_key(&self) -> WalletId {
        self.id
    }

    async fn on_update(&mut self, _update: WalletUpdate, _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, action: WalletAction, _ctx: &()) -> Result<u64, Self::Error> {
        match action {
            WalletAction::Balance => {}
            WalletAction::Credit(amount) => {
                self.balance = self
                    .balance
                    .checked_add(amount)
                    .ok_or(WalletError::Overflow)?;
            }
            WalletAction::Debit(amount) => {
                if amount > self.balance {
                    return Err(WalletError::InsufficientBalance {
                        required: amount,
                        available: self.balance,
                    });
                }
                self.balance -= amount;
            }
        }
        Ok(self.balance)
    }
}

pub fn new(buffer_size: usize) -> (Table<Wallet>, TableClient<Wallet>) {
    Table::new(buffer_size)
}

//! # Account Table
//!
//! Credentials for the local auth provider. The row id doubles as the user
//! id every other table refers to.

use crate::model::{Account, AccountCreate, AccountFilter, AccountUpdate, UserId};
use async_trait::async_trait;
use record_store::{Record, StoreError, Table, TableClient};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Invalid account: {0}")]
    Invalid(String),

    #[error("Store communication error: {0}")]
    Store(String),
}

impl From<StoreError> for AccountError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => AccountError::NotFound(id),
            other => AccountError::Store(other.to_string()),
        }
    }
}

#[derive(Clone)]
pub enum AccountAction {
    /// Whether the given password is the account's.
    Verify(String),
}

impl fmt::Debug for AccountAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountAction::Verify(_) => f.write_str("Verify(..)"),
        }
    }
}

#[async_trait]
impl Record for Account {
    type Id = UserId;
    type Create = AccountCreate;
    type Update = AccountUpdate;
    type Filter = AccountFilter;
    type SortKey = UserId;
    type Action = AccountAction;
    type ActionResult = bool;
    type Context = ();
    type Error = AccountError;

    fn from_create_params(id: UserId, params: AccountCreate) -> Result<Self, Self::Error> {
        if params.email.trim().is_empty() || params.password.is_empty() {
            return Err(AccountError::Invalid("email and password are required".into()));
        }
        Ok(Account {
            id,
            email: params.email.trim().to_string(),
            password: params.password,
        })
    }

    fn matches(&self, filter: &AccountFilter) -> bool {
        filter
            .email
            .as_ref()
            .is_none_or(|email| email.trim().eq_ignore_ascii_case(&self.email))
    }

    fn sort_key(&self) -> UserId {
        self.id
    }

    async fn on_update(&mut self, update: AccountUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(email) = update.email {
            self.email = email.trim().to_string();
        }
        if let Some(password) = update.password {
            if password.is_empty() {
                return Err(AccountError::Invalid("password must not be empty".into()));
            }
            self.password = password;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: AccountAction, _ctx: &()) -> Result<bool, Self::Error> {
        match action {
            AccountAction::Verify(password) => Ok(password == self.password),
        }
    }
}

pub fn new(buffer_size: usize) -> (Table<Account>, TableClient<Account>) {
    Table::new(buffer_size)
}

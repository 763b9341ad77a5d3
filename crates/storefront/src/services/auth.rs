//! Credentials and sessions.

use crate::account_actor::AccountError;
use crate::clients::AccountClient;
use crate::model::{AccountCreate, AccountUpdate, UserId};
use async_trait::async_trait;
use mockall::automock;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

const TOKEN_LENGTH: usize = 48;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: UserId,
    pub email: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account already exists for {0}")]
    EmailTaken(String),

    #[error("No active session")]
    NoSession,

    #[error(transparent)]
    Account(#[from] AccountError),
}

/// The identity backend: credential storage and session issue.
#[automock]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserId, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_out(&self, token: &str) -> Result<(), AuthError>;

    async fn session(&self, token: &str) -> Result<Option<Session>, AuthError>;

    async fn verify_password(&self, user: UserId, password: &str) -> Result<bool, AuthError>;

    async fn change_password(&self, user: UserId, password: &str) -> Result<(), AuthError>;

    async fn change_email(&self, user: UserId, email: &str) -> Result<(), AuthError>;
}

/// Auth provider over the accounts table, with sessions held in memory.
#[derive(Clone)]
pub struct LocalAuth {
    accounts: AccountClient,
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl LocalAuth {
    pub fn new(accounts: AccountClient) -> Self {
        Self {
            accounts,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn new_token() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }
}

#[async_trait]
impl AuthProvider for LocalAuth {
    #[instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        if self.accounts.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailTaken(email.to_string()));
        }
        let user = self
            .accounts
            .create_account(AccountCreate {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        info!(%user, "Account created");
        Ok(user)
    }

    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let Some(account) = self.accounts.find_by_email(email).await? else {
            warn!("Sign in for unknown email");
            return Err(AuthError::InvalidCredentials);
        };
        if !self.accounts.verify(account.id, password).await? {
            warn!(user = %account.id, "Wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session {
            token: Self::new_token(),
            user: account.id,
            email: account.email,
        };
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());
        info!(user = %session.user, "Signed in");
        Ok(session)
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        match self.sessions.write().await.remove(token) {
            Some(session) => {
                info!(user = %session.user, "Signed out");
                Ok(())
            }
            None => Err(AuthError::NoSession),
        }
    }

    async fn session(&self, token: &str) -> Result<Option<Session>, AuthError> {
        Ok(self.sessions.read().await.get(token).cloned())
    }

    #[instrument(skip(self, password))]
    async fn verify_password(&self, user: UserId, password: &str) -> Result<bool, AuthError> {
        Ok(self.accounts.verify(user, password).await?)
    }

    #[instrument(skip(self, password))]
    async fn change_password(&self, user: UserId, password: &str) -> Result<(), AuthError> {
        self.accounts
            .update_account(
                user,
                AccountUpdate {
                    email: None,
                    password: Some(password.to_string()),
                },
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn change_email(&self, user: UserId, email: &str) -> Result<(), AuthError> {
        if let Some(existing) = self.accounts.find_by_email(email).await? {
            if existing.id != user {
                return Err(AuthError::EmailTaken(email.to_string()));
            }
        }
        self.accounts
            .update_account(
                user,
                AccountUpdate {
                    email: Some(email.to_string()),
                    password: None,
                },
            )
            .await?;

        for session in self.sessions.write().await.values_mut() {
            if session.user == user {
                session.email = email.to_string();
            }
        }
        Ok(())
    }
}

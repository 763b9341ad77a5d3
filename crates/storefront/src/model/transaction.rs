use super::{CoinTransactionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Succeeded,
    Failed,
}

/// A coin purchase attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinTransaction {
    pub id: CoinTransactionId,
    pub user: UserId,
    pub coins: u64,
    /// Amount charged, in cents.
    pub amount_cents: u64,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CoinTransactionCreate {
    pub user: UserId,
    pub coins: u64,
    pub amount_cents: u64,
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub user: Option<UserId>,
}

use super::{UserId, WalletId};
use serde::{Deserialize, Serialize};

/// A user's coin balance. One per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,
    pub user: UserId,
    pub balance: u64,
}

#[derive(Debug, Clone)]
pub struct WalletCreate {
    pub user: UserId,
    pub balance: u64,
}

#[derive(Debug, Clone, Default)]
pub struct WalletFilter {
    pub user: Option<UserId>,
}

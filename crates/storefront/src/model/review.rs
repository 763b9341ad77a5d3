use super::{ReviewId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_RATING: u8 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub reviewer: UserId,
    /// The user being reviewed.
    pub subject: UserId,
    pub rating: u8,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ReviewCreate {
    pub reviewer: UserId,
    pub subject: UserId,
    pub rating: u8,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub subject: Option<UserId>,
    pub reviewer: Option<UserId>,
}

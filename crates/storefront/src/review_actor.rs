//! # Review Table

use crate::model::{Review, ReviewCreate, ReviewFilter, ReviewId, MAX_RATING};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use record_store::{Record, StoreError, Table, TableClient};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    #[error("Review not found: {0}")]
    NotFound(String),

    #[error("Rating must be between 0 and 10, got {0}")]
    InvalidRating(u8),

    #[error("Review message must not be empty")]
    EmptyMessage,

    #[error("Users cannot review themselves")]
    SelfReview,

    #[error("Store communication error: {0}")]
    Store(String),
}

impl From<StoreError> for ReviewError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ReviewError::NotFound(id),
            other => ReviewError::Store(other.to_string()),
        }
    }
}

fn validate(rating: u8, message: &str) -> Result<(), ReviewError> {
    if rating > MAX_RATING {
        return Err(ReviewError::InvalidRating(rating));
    }
    if message.trim().is_empty() {
        return Err(ReviewError::EmptyMessage);
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ReviewUpdate {
    pub rating: u8,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum ReviewAction {}

#[async_trait]
impl Record for Review {
    type Id = ReviewId;
    type Create = ReviewCreate;
    type Update = ReviewUpdate;
    type Filter = ReviewFilter;
    type SortKey = DateTime<Utc>;
    type Action = ReviewAction;
    type ActionResult = ();
    type Context = ();
    type Error = ReviewError;

    fn from_create_params(id: ReviewId, params: ReviewCreate) -> Result<Self, Self::Error> {
        validate(params.rating, &params.message)?;
        if params.reviewer == params.subject {
            return Err(ReviewError::SelfReview);
        }
        Ok(Review {
            id,
            reviewer: params.reviewer,
            subject: params.subject,
            rating: params.rating,
            message: params.message,
            created_at: Utc::now(),
        })
    }

    fn matches(&self, filter: &ReviewFilter) -> bool {
        filter.subject.is_none_or(|subject| subject == self.subject)
            && filter.reviewer.is_none_or(|reviewer| reviewer == self.reviewer)
    }

    fn sort_key(&self) -> DateTime<Utc> {
        self.created_at
    }

    async fn on_update(&mut self, update: ReviewUpdate, _ctx: &()) -> Result<(), Self::Error> {
        validate(update.rating, &update.message)?;
        self.rating = update.rating;
        self.message = update.message;
        Ok(())
    }

    async fn handle_action(&mut self, action: ReviewAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}

pub fn new(buffer_size: usize) -> (Table<Review>, TableClient<Review>) {
    Table::new(buffer_size)
}

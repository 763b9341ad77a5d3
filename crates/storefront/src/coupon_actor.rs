//! # Coupon Table

use crate::model::{Coupon, CouponCreate, CouponFilter, CouponId};
use async_trait::async_trait;
use record_store::{Record, StoreError, Table, TableClient};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CouponError {
    #[error("Coupon not found: {0}")]
    NotFound(String),

    #[error("Invalid coupon: {0}")]
    Invalid(String),

    #[error("Store communication error: {0}")]
    Store(String),
}

impl From<StoreError> for CouponError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => CouponError::NotFound(id),
            other => CouponError::Store(other.to_string()),
        }
    }
}

/// Coupons are maintained outside the storefront, so rows are never edited.
#[derive(Debug, Clone)]
pub enum CouponUpdate {}

#[derive(Debug, Clone)]
pub enum CouponAction {}

#[async_trait]
impl Record for Coupon {
    type Id = CouponId;
    type Create = CouponCreate;
    type Update = CouponUpdate;
    type Filter = CouponFilter;
    type SortKey = CouponId;
    type Action = CouponAction;
    type ActionResult = ();
    type Context = ();
    type Error = CouponError;

    fn from_create_params(id: CouponId, params: CouponCreate) -> Result<Self, Self::Error> {
        if params.name.is_empty() {
            return Err(CouponError::Invalid("name must not be empty".into()));
        }
        if params.percent > 100 {
            return Err(CouponError::Invalid(format!(
                "percent must be 0-100, got {}",
                params.percent
            )));
        }
        Ok(Coupon {
            id,
            name: params.name,
            percent: params.percent,
        })
    }

    /// Exact, case-sensitive name match.
    fn matches(&self, filter: &CouponFilter) -> bool {
        filter.name.as_ref().is_none_or(|name| *name == self.name)
    }

    fn sort_key(&self) -> CouponId {
        self.id
    }

    async fn on_update(&mut self, update: CouponUpdate, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(&mut self, action: CouponAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}

pub fn new(buffer_size: usize) -> (Table<Coupon>, TableClient<Coupon>) {
    Table::new(buffer_size)
}

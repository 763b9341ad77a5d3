//! # Profile Table
//!
//! Role and contact details of each user. A profile is created at sign-up
//! with the `user` role; couriers are promoted to `delivery` by an operator.

use crate::model::{Profile, ProfileCreate, ProfileFilter, ProfileId, ProfileUpdate};
use async_trait::async_trait;
use record_store::{Record, StoreError, Table, TableClient};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Invalid profile: {0}")]
    Invalid(String),

    #[error("Store communication error: {0}")]
    Store(String),
}

impl From<StoreError> for ProfileError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ProfileError::NotFound(id),
            other => ProfileError::Store(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ProfileAction {}

#[async_trait]
impl Record for Profile {
    type Id = ProfileId;
    type Create = ProfileCreate;
    type Update = ProfileUpdate;
    type Filter = ProfileFilter;
    type SortKey = ProfileId;
    type Action = ProfileAction;
    type ActionResult = ();
    type Context = ();
    type Error = ProfileError;

    fn from_create_params(id: ProfileId, params: ProfileCreate) -> Result<Self, Self::Error> {
        if params.email.trim().is_empty() {
            return Err(ProfileError::Invalid("email must not be empty".into()));
        }
        Ok(Profile {
            id,
            user: params.user,
            role: params.role,
            name: None,
            email: params.email,
            phone: None,
            address: None,
            avatar_url: None,
        })
    }

    fn matches(&self, filter: &ProfileFilter) -> bool {
        filter.matches(self)
    }

    fn sort_key(&self) -> ProfileId {
        self.id
    }

    async fn on_update(&mut self, update: ProfileUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(name) = update.name {
            self.name = Some(name);
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(avatar_url) = update.avatar_url {
            self.avatar_url = Some(avatar_url);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: ProfileAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}

pub fn new(buffer_size: usize) -> (Table<Profile>, TableClient<Profile>) {
    Table::new(buffer_size)
}

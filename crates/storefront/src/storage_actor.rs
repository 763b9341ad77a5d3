//! # Object Storage Table
//!
//! Files keyed by (bucket, path). The storage client looks a path up before
//! writing it: a taken path is refused unless the caller asks for an upsert,
//! which becomes an update of the existing object.

use crate::model::{ObjectFilter, StoredObject, StoredObjectCreate, StoredObjectId, StoredObjectUpdate};
use async_trait::async_trait;
use chrono::Utc;
use record_store::{Record, StoreError, Table, TableClient};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Object already exists: {bucket}/{path}")]
    AlreadyExists { bucket: String, path: String },

    #[error("Invalid object: {0}")]
    Invalid(String),

    #[error("Not a public URL of this storage: {0}")]
    ForeignUrl(String),

    #[error("Store communication error: {0}")]
    Store(String),
}

impl From<StoreError> for StorageError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => StorageError::NotFound(id),
            other => StorageError::Store(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum StorageAction {}

#[async_trait]
impl Record for StoredObject {
    type Id = StoredObjectId;
    type Create = StoredObjectCreate;
    type Update = StoredObjectUpdate;
    type Filter = ObjectFilter;
    type SortKey = (String, String);
    type Action = StorageAction;
    type ActionResult = ();
    type Context = ();
    type Error = StorageError;

    fn from_create_params(
        id: StoredObjectId,
        params: StoredObjectCreate,
    ) -> Result<Self, Self::Error> {
        if params.bucket.is_empty() || params.path.is_empty() {
            return Err(StorageError::Invalid("bucket and path are required".into()));
        }
        if params.bytes.is_empty() {
            return Err(StorageError::Invalid(format!("{} is empty", params.path)));
        }
        Ok(StoredObject {
            id,
            bucket: params.bucket,
            path: params.path,
            content_type: params.content_type,
            bytes: params.bytes,
            updated_at: Utc::now(),
        })
    }

    fn matches(&self, filter: &ObjectFilter) -> bool {
        filter.bucket.as_ref().is_none_or(|bucket| *bucket == self.bucket)
            && filter.path.as_ref().is_none_or(|path| *path == self.path)
    }

    fn sort_key(&self) -> (String, String) {
        (self.bucket.clone(), self.path.clone())
    }

    async fn on_update(
        &mut self,
        update: StoredObjectUpdate,
        _ctx: &(),
    ) -> Result<(), Self::Error> {
        if update.bytes.is_empty() {
            return Err(StorageError::Invalid(format!("{} is empty", self.path)));
        }
        self.content_type = update.content_type;
        self.bytes = update.bytes;
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, action: StorageAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}

pub fn new(buffer_size: usize) -> (Table<StoredObject>, TableClient<StoredObject>) {
    Table::new(buffer_size)
}

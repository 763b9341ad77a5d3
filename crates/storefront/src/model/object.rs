use super::StoredObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const PRODUCT_IMAGES: &str = "product-images";
pub const AVATARS: &str = "avatars";

/// A file in an object storage bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredObject {
    pub id: StoredObjectId,
    pub bucket: String,
    pub path: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub updated_at: DateTime<Utc>,
}

impl StoredObject {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone)]
pub struct StoredObjectCreate {
    pub bucket: String,
    pub path: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Replaces the content of an existing object (upsert).
#[derive(Debug, Clone)]
pub struct StoredObjectUpdate {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct ObjectFilter {
    pub bucket: Option<String>,
    pub path: Option<String>,
}

impl ObjectFilter {
    pub fn at(bucket: &str, path: &str) -> Self {
        Self {
            bucket: Some(bucket.to_string()),
            path: Some(path.to_string()),
        }
    }
}

/// A file handed in by a user, not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

//! # Storage Client
//!
//! Bucket-style access to stored files and their public URLs. Public URLs
//! follow `{base}/storage/v1/object/public/{bucket}/{path}`.

use super::record_error;
use crate::model::{ObjectFilter, StoredObject, StoredObjectCreate, StoredObjectUpdate};
use crate::storage_actor::StorageError;
use async_trait::async_trait;
use record_store::{Query, RecordClient, StoreError, TableClient};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Clones share one write lock, so a path lookup and the write that
/// follows it are never interleaved with another upload or removal.
#[derive(Clone)]
pub struct StorageClient {
    inner: TableClient<StoredObject>,
    public_base: String,
    writes: Arc<Mutex<()>>,
}

#[async_trait]
impl RecordClient<StoredObject> for StorageClient {
    type Error = StorageError;

    fn inner(&self) -> &TableClient<StoredObject> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        record_error(e)
    }
}

impl StorageClient {
    pub fn new(inner: TableClient<StoredObject>, public_base: impl Into<String>) -> Self {
        Self {
            inner,
            public_base: public_base.into().trim_end_matches('/').to_string(),
            writes: Arc::new(Mutex::new(())),
        }
    }

    fn public_prefix(&self, bucket: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/", self.public_base)
    }

    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}{path}", self.public_prefix(bucket))
    }

    /// Inverse of [`public_url`](Self::public_url).
    pub fn path_from_url(&self, bucket: &str, url: &str) -> Result<String, StorageError> {
        url.strip_prefix(&self.public_prefix(bucket))
            .filter(|path| !path.is_empty())
            .map(str::to_string)
            .ok_or_else(|| StorageError::ForeignUrl(url.to_string()))
    }

    pub async fn find(&self, bucket: &str, path: &str) -> Result<Option<StoredObject>, StorageError> {
        let page = self
            .list(Query::new(ObjectFilter::at(bucket, path)).limit(1))
            .await?;
        Ok(page.items.into_iter().next())
    }

    /// Stores `bytes` at `bucket/path`. With `upsert` an existing object is
    /// overwritten; without it a taken path is an error.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
        upsert: bool,
    ) -> Result<String, StorageError> {
        let _write = self.writes.lock().await;
        match self.find(bucket, path).await? {
            Some(existing) if upsert => {
                self.inner
                    .update(
                        existing.id,
                        StoredObjectUpdate {
                            content_type: content_type.to_string(),
                            bytes,
                        },
                    )
                    .await
                    .map_err(record_error::<StorageError>)?;
                debug!("Overwrote existing object");
            }
            Some(_) => {
                return Err(StorageError::AlreadyExists {
                    bucket: bucket.to_string(),
                    path: path.to_string(),
                })
            }
            None => {
                self.inner
                    .create(StoredObjectCreate {
                        bucket: bucket.to_string(),
                        path: path.to_string(),
                        content_type: content_type.to_string(),
                        bytes,
                    })
                    .await
                    .map_err(record_error::<StorageError>)?;
            }
        }
        info!(bucket, path, "Uploaded");
        Ok(path.to_string())
    }

    /// Deletes the given paths. Paths that do not exist are skipped.
    #[instrument(skip(self))]
    pub async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        let _write = self.writes.lock().await;
        for path in paths {
            match self.find(bucket, path).await? {
                Some(object) => self.delete(object.id).await?,
                None => warn!(bucket, path, "Nothing to remove"),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage_actor;
    use record_store::mock::create_mock_client;

    fn client() -> StorageClient {
        let (inner, _receiver) = create_mock_client::<StoredObject>(1);
        StorageClient::new(inner, "https://cdn.example.com/")
    }

    #[tokio::test]
    async fn public_urls_round_trip() {
        let storage = client();
        let url = storage.public_url("product-images", "products/1700_lamp.png");
        assert_eq!(
            url,
            "https://cdn.example.com/storage/v1/object/public/product-images/products/1700_lamp.png"
        );
        assert_eq!(
            storage.path_from_url("product-images", &url).unwrap(),
            "products/1700_lamp.png"
        );
    }

    #[tokio::test]
    async fn urls_of_other_buckets_are_rejected() {
        let storage = client();
        let url = storage.public_url("avatars", "7/avatar");
        assert!(matches!(
            storage.path_from_url("product-images", &url),
            Err(StorageError::ForeignUrl(_))
        ));
    }

    #[tokio::test]
    async fn racing_uploads_to_one_path_store_it_once() {
        let (table, inner) = storage_actor::new(16);
        tokio::spawn(table.run(()));
        let storage = StorageClient::new(inner, "https://cdn.example.com");

        let mut handles = Vec::new();
        for n in 0..8u8 {
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                storage
                    .upload("avatars", "user_1/avatar", "image/png", vec![n], false)
                    .await
            }));
        }

        let mut stored = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => stored += 1,
                Err(e) => assert!(matches!(e, StorageError::AlreadyExists { .. })),
            }
        }
        assert_eq!(stored, 1);
        let objects = storage
            .count(ObjectFilter::at("avatars", "user_1/avatar"))
            .await
            .unwrap();
        assert_eq!(objects, 1);
    }
}

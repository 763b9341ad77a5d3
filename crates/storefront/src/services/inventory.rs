//! Seller listings and their images.
//!
//! Images live in the `product-images` bucket and products refer to them by
//! public URL. Files uploaded for a listing that then fails to save are
//! removed again; files a saved listing no longer refers to are removed
//! after the save.

use crate::clients::{ProductClient, RecordClient, StorageClient};
use crate::model::{
    Product, ProductCreate, ProductFilter, ProductId, ProductKind, ProductStatus, ProductUpdate,
    Upload, UserId, PRODUCT_IMAGES,
};
use crate::product_actor::ProductError;
use crate::storage_actor::StorageError;
use chrono::Utc;
use record_store::Query;
use thiserror::Error;
use tracing::{info, instrument, warn};

pub const SUB_IMAGE_COUNT: usize = 3;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("A main image is required")]
    MissingMainImage,

    #[error("Exactly 3 sub-images are required, got {0}")]
    SubImageCount(usize),

    #[error("Product {0} belongs to another seller")]
    NotOwner(ProductId),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The editable product fields.
#[derive(Debug, Clone)]
pub struct ListingForm {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub discount: u8,
    pub stock: u32,
    pub category: String,
    pub brand: String,
    pub condition: u8,
    pub usage: String,
    pub other_message: String,
    pub status: ProductStatus,
    pub kind: ProductKind,
}

#[derive(Debug, Clone)]
pub struct NewListing {
    pub form: ListingForm,
    pub main_image: Option<Upload>,
    pub sub_images: Vec<Upload>,
}

/// A sub-image slot on the edit form: either an image the product already
/// has, or a new file.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Existing(String),
    Upload(Upload),
}

#[derive(Debug, Clone)]
pub struct ListingEdit {
    pub form: ListingForm,
    /// A replacement for the main image.
    pub main_image: Option<Upload>,
    /// The full new set of sub-images; `None` keeps the current set.
    pub sub_images: Option<Vec<ImageSource>>,
}

fn file_segment(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

pub fn main_image_path(millis: i64, file_name: &str) -> String {
    format!("products/{millis}_{}", file_segment(file_name))
}

pub fn sub_image_path(millis: i64, index: usize, file_name: &str) -> String {
    format!("products/{millis}_sub_{index}_{}", file_segment(file_name))
}

#[derive(Clone)]
pub struct InventoryService {
    products: ProductClient,
    storage: StorageClient,
}

impl InventoryService {
    pub fn new(products: ProductClient, storage: StorageClient) -> Self {
        Self { products, storage }
    }

    /// Every listing of `owner`, whatever its status, newest first.
    pub async fn seller_products(&self, owner: UserId) -> Result<Vec<Product>, InventoryError> {
        let query = Query::new(ProductFilter::owned_by(owner)).descending();
        Ok(self.products.list(query).await?.items)
    }

    #[instrument(skip(self, listing), fields(name = %listing.form.name))]
    pub async fn create_listing(
        &self,
        owner: UserId,
        listing: NewListing,
    ) -> Result<Product, InventoryError> {
        let main = listing.main_image.ok_or(InventoryError::MissingMainImage)?;
        if listing.sub_images.len() != SUB_IMAGE_COUNT {
            return Err(InventoryError::SubImageCount(listing.sub_images.len()));
        }

        let mut uploaded = Vec::new();
        let result = self
            .upload_and_insert(owner, listing.form, main, listing.sub_images, &mut uploaded)
            .await;

        if result.is_err() {
            warn!(files = uploaded.len(), "Listing not saved, removing its images");
            self.discard(&uploaded).await;
        }
        result
    }

    async fn upload_and_insert(
        &self,
        owner: UserId,
        form: ListingForm,
        main: Upload,
        subs: Vec<Upload>,
        uploaded: &mut Vec<String>,
    ) -> Result<Product, InventoryError> {
        let millis = Utc::now().timestamp_millis();

        let image_url = self
            .upload(main_image_path(millis, &main.file_name), main, uploaded)
            .await?;
        let mut sub_images = Vec::with_capacity(subs.len());
        for (index, sub) in subs.into_iter().enumerate() {
            let path = sub_image_path(millis, index, &sub.file_name);
            sub_images.push(self.upload(path, sub, uploaded).await?);
        }

        let id = self
            .products
            .create_product(ProductCreate {
                owner,
                name: form.name,
                description: form.description,
                price: form.price,
                discount: form.discount,
                stock: form.stock,
                category: form.category,
                brand: form.brand,
                condition: form.condition,
                usage: form.usage,
                other_message: form.other_message,
                status: form.status,
                kind: form.kind,
                image_url: Some(image_url),
                sub_images,
            })
            .await?;
        info!(%id, "Listing created");
        Ok(self.products.fetch(id).await?)
    }

    /// Saves the edit form. A new main image replaces the old file; the
    /// sub-image set is diffed against the current one.
    #[instrument(skip(self, edit))]
    pub async fn update_listing(
        &self,
        owner: UserId,
        id: ProductId,
        edit: ListingEdit,
    ) -> Result<Product, InventoryError> {
        let current = self.products.fetch(id).await?;
        if current.owner != owner {
            return Err(InventoryError::NotOwner(id));
        }

        let millis = Utc::now().timestamp_millis();
        let mut uploaded = Vec::new();
        let result = self
            .upload_edit_images(&current, millis, edit.main_image, edit.sub_images, &mut uploaded)
            .await;
        let (image_url, sub_images) = match result {
            Ok(images) => images,
            Err(e) => {
                self.discard(&uploaded).await;
                return Err(e);
            }
        };

        let form = edit.form;
        let update = ProductUpdate {
            name: Some(form.name),
            description: Some(form.description),
            price: Some(form.price),
            discount: Some(form.discount),
            stock: Some(form.stock),
            category: Some(form.category),
            brand: Some(form.brand),
            condition: Some(form.condition),
            usage: Some(form.usage),
            other_message: Some(form.other_message),
            status: Some(form.status),
            image_url: image_url.clone(),
            sub_images: sub_images.clone(),
        };
        let updated = match self.products.update_product(id, update).await {
            Ok(product) => product,
            Err(e) => {
                self.discard(&uploaded).await;
                return Err(e.into());
            }
        };

        let mut stale = Vec::new();
        if image_url.is_some() {
            stale.extend(current.image_url.clone());
        }
        if let Some(kept) = &sub_images {
            stale.extend(
                current
                    .sub_images
                    .iter()
                    .filter(|url| !kept.contains(url))
                    .cloned(),
            );
        }
        self.discard_urls(&stale).await;

        info!(%id, replaced = stale.len(), added = uploaded.len(), "Listing updated");
        Ok(updated)
    }

    /// Deletes the listing, then its images. Cart rows still pointing at it
    /// are skipped when carts are read.
    #[instrument(skip(self))]
    pub async fn delete_listing(&self, owner: UserId, id: ProductId) -> Result<(), InventoryError> {
        let product = self.products.fetch(id).await?;
        if product.owner != owner {
            return Err(InventoryError::NotOwner(id));
        }

        self.products.delete(id).await?;
        let files: Vec<String> = product
            .image_url
            .into_iter()
            .chain(product.sub_images)
            .collect();
        self.discard_urls(&files).await;

        info!(%id, files = files.len(), "Listing deleted");
        Ok(())
    }

    async fn upload_edit_images(
        &self,
        current: &Product,
        millis: i64,
        main: Option<Upload>,
        subs: Option<Vec<ImageSource>>,
        uploaded: &mut Vec<String>,
    ) -> Result<(Option<String>, Option<Vec<String>>), InventoryError> {
        let image_url = match main {
            Some(main) => Some(
                self.upload(main_image_path(millis, &main.file_name), main, uploaded)
                    .await?,
            ),
            None => None,
        };

        let sub_images = match subs {
            Some(sources) => {
                let mut urls = Vec::with_capacity(sources.len());
                for (index, source) in sources.into_iter().enumerate() {
                    match source {
                        ImageSource::Existing(url) if current.sub_images.contains(&url) => {
                            urls.push(url)
                        }
                        ImageSource::Existing(url) => {
                            warn!(%url, "Ignoring an image the product does not have");
                        }
                        ImageSource::Upload(file) => {
                            let path = sub_image_path(millis, index, &file.file_name);
                            urls.push(self.upload(path, file, uploaded).await?);
                        }
                    }
                }
                Some(urls)
            }
            None => None,
        };
        Ok((image_url, sub_images))
    }

    async fn upload(
        &self,
        path: String,
        file: Upload,
        uploaded: &mut Vec<String>,
    ) -> Result<String, InventoryError> {
        self.storage
            .upload(PRODUCT_IMAGES, &path, &file.content_type, file.bytes, false)
            .await?;
        let url = self.storage.public_url(PRODUCT_IMAGES, &path);
        uploaded.push(path);
        Ok(url)
    }

    async fn discard(&self, paths: &[String]) {
        if let Err(e) = self.storage.remove(PRODUCT_IMAGES, paths).await {
            warn!(error = %e, "Image cleanup failed");
        }
    }

    async fn discard_urls(&self, urls: &[String]) {
        let paths: Vec<String> = urls
            .iter()
            .filter_map(|url| match self.storage.path_from_url(PRODUCT_IMAGES, url) {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!(error = %e, "Not removing an image stored elsewhere");
                    None
                }
            })
            .collect();
        self.discard(&paths).await;
    }
}

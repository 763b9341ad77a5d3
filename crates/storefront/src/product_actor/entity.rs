use super::{ProductAction, ProductError};
use crate::model::{Product, ProductCreate, ProductFilter, ProductId, ProductStatus, ProductUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use record_store::Record;

fn validate(name: &str, price: u64, discount: u8, condition: u8) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::Invalid("name must not be empty".into()));
    }
    if price == 0 {
        return Err(ProductError::Invalid("price must be at least 1".into()));
    }
    if discount > 100 {
        return Err(ProductError::Invalid(format!(
            "discount must be 0-100, got {discount}"
        )));
    }
    if condition > 100 {
        return Err(ProductError::Invalid(format!(
            "condition must be 0-100, got {condition}"
        )));
    }
    Ok(())
}

impl Product {
    fn sync_stock_status(&mut self) {
        match self.status {
            ProductStatus::Available if self.stock == 0 => self.status = ProductStatus::OutOfStock,
            ProductStatus::OutOfStock if self.stock > 0 => self.status = ProductStatus::Available,
            _ => {}
        }
    }
}

#[async_trait]
impl Record for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Filter = ProductFilter;
    type SortKey = DateTime<Utc>;
    type Action = ProductAction;
    type ActionResult = u32;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        validate(&params.name, params.price, params.discount, params.condition)?;
        let mut product = Product {
            id,
            owner: params.owner,
            name: params.name,
            description: params.description,
            price: params.price,
            discount: params.discount,
            stock: params.stock,
            category: params.category,
            brand: params.brand,
            condition: params.condition,
            usage: params.usage,
            other_message: params.other_message,
            status: params.status,
            kind: params.kind,
            image_url: params.image_url,
            sub_images: params.sub_images,
            created_at: Utc::now(),
        };
        product.sync_stock_status();
        Ok(product)
    }

    fn matches(&self, filter: &ProductFilter) -> bool {
        filter.matches(self)
    }

    fn sort_key(&self) -> DateTime<Utc> {
        self.created_at
    }

    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        let status_given = update.status.is_some();
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(discount) = update.discount {
            self.discount = discount;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(brand) = update.brand {
            self.brand = brand;
        }
        if let Some(condition) = update.condition {
            self.condition = condition;
        }
        if let Some(usage) = update.usage {
            self.usage = usage;
        }
        if let Some(other_message) = update.other_message {
            self.other_message = other_message;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(sub_images) = update.sub_images {
            self.sub_images = sub_images;
        }
        validate(&self.name, self.price, self.discount, self.condition)?;
        if !status_given {
            self.sync_stock_status();
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<u32, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(self.stock),
            ProductAction::DecrementStock(quantity) => {
                if quantity == 0 {
                    return Err(ProductError::InvalidQuantity(quantity));
                }
                if self.status != ProductStatus::Available {
                    return Err(ProductError::NotForSale(self.id.to_string()));
                }
                if quantity > self.stock {
                    return Err(ProductError::InsufficientStock {
                        requested: quantity,
                        available: self.stock,
                    });
                }
                self.stock -= quantity;
                self.sync_stock_status();
                Ok(self.stock)
            }
            ProductAction::RestoreStock(quantity) => {
                self.stock += quantity;
                self.sync_stock_status();
                Ok(self.stock)
            }
        }
    }
}

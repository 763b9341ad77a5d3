//! # Product Client
//!
//! Typed access to the product table, including the stock actions used by
//! checkout and cancellation.

use super::record_error;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductError};
use async_trait::async_trait;
use record_store::{RecordClient, StoreError, TableClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ProductClient {
    inner: TableClient<Product>,
}

#[async_trait]
impl RecordClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &TableClient<Product> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        record_error(e)
    }
}

impl ProductClient {
    pub fn new(inner: TableClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!(?params, "create_product called");
        self.inner.create(params).await.map_err(record_error)
    }

    /// Like `get`, but a missing row is an error.
    pub async fn fetch(&self, id: ProductId) -> Result<Product, ProductError> {
        self.get(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        self.inner.update(id, update).await.map_err(record_error)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        self.stock_action(id, ProductAction::CheckStock).await
    }

    /// Atomically takes `quantity` units. Returns the stock left.
    #[instrument(skip(self))]
    pub async fn decrement_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Decrementing {} units of {}", quantity, id);
        self.stock_action(id, ProductAction::DecrementStock(quantity))
            .await
    }

    #[instrument(skip(self))]
    pub async fn restore_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Restoring {} units of {}", quantity, id);
        self.stock_action(id, ProductAction::RestoreStock(quantity))
            .await
    }

    async fn stock_action(
        &self,
        id: ProductId,
        action: ProductAction,
    ) -> Result<u32, ProductError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(record_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_store::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_decrement_stock_sends_action() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task =
            tokio::spawn(async move { product_client.decrement_stock(ProductId(1), 5).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert_eq!(action, ProductAction::DecrementStock(5));
        responder.send(Ok(7)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn test_record_errors_keep_their_type() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task =
            tokio::spawn(async move { product_client.decrement_stock(ProductId(1), 100).await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        responder
            .send(Err(StoreError::Record(Box::new(
                ProductError::InsufficientStock {
                    requested: 100,
                    available: 3,
                },
            ))))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ProductError::InsufficientStock {
                requested: 100,
                available: 3
            })
        );
    }

    #[tokio::test]
    async fn test_missing_row_maps_to_not_found() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task = tokio::spawn(async move { product_client.restore_stock(ProductId(4), 1).await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        responder
            .send(Err(StoreError::NotFound("product_4".into())))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ProductError::NotFound("product_4".into()))
        );
    }
}

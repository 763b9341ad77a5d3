use super::record_error;
use crate::cart_actor::CartError;
use crate::model::{
    CartFilter, CartItem, CartItemCreate, CartItemId, CartItemUpdate, ProductId, UserId,
};
use async_trait::async_trait;
use record_store::{Query, RecordClient, StoreError, TableClient};
use tracing::instrument;

#[derive(Clone)]
pub struct CartClient {
    inner: TableClient<CartItem>,
}

#[async_trait]
impl RecordClient<CartItem> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &TableClient<CartItem> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        record_error(e)
    }
}

impl CartClient {
    pub fn new(inner: TableClient<CartItem>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn add_item(&self, params: CartItemCreate) -> Result<CartItemId, CartError> {
        self.inner.create(params).await.map_err(record_error)
    }

    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        id: CartItemId,
        quantity: u32,
        unit_price: Option<u64>,
    ) -> Result<CartItem, CartError> {
        self.inner
            .update(
                id,
                CartItemUpdate {
                    quantity,
                    unit_price,
                },
            )
            .await
            .map_err(record_error)
    }

    /// All rows of a shopper, oldest first.
    pub async fn items_of(&self, user: UserId) -> Result<Vec<CartItem>, CartError> {
        Ok(self.list(Query::new(CartFilter::of_user(user))).await?.items)
    }

    pub async fn find(
        &self,
        user: UserId,
        product: ProductId,
    ) -> Result<Option<CartItem>, CartError> {
        let filter = CartFilter {
            user: Some(user),
            product: Some(product),
        };
        Ok(self
            .list(Query::new(filter).limit(1))
            .await?
            .items
            .into_iter()
            .next())
    }
}

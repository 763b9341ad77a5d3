//! The shopping cart, grouped by seller.
//!
//! Cart rows are stored flat per user; the cart a shopper sees is rebuilt on
//! every read by grouping rows under the owner of each product, because an
//! order is always placed with a single seller.

use crate::cart_actor::CartError;
use crate::clients::{CartClient, ProductClient, ProfileClient, RecordClient};
use crate::model::{Cart, CartItem, CartItemCreate, CartItemId, CartLine, ProductId, UserId};
use crate::product_actor::ProductError;
use crate::profile_actor::ProfileError;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Error)]
pub enum CartServiceError {
    #[error("You cannot buy your own product")]
    OwnProduct,

    #[error("Product {0} is not for sale")]
    NotForSale(ProductId),

    #[error("Only {available} left in stock, {requested} requested")]
    NotEnoughStock { requested: u32, available: u32 },

    #[error("Cart item {0} does not belong to this user")]
    NotYours(CartItemId),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

#[derive(Clone)]
pub struct CartService {
    carts: CartClient,
    products: ProductClient,
    profiles: ProfileClient,
}

impl CartService {
    pub fn new(carts: CartClient, products: ProductClient, profiles: ProfileClient) -> Self {
        Self {
            carts,
            products,
            profiles,
        }
    }

    /// Puts `quantity` of a product in the cart, adding to an existing row
    /// for the same product.
    #[instrument(skip(self))]
    pub async fn add(
        &self,
        user: UserId,
        product: ProductId,
        quantity: u32,
    ) -> Result<CartItemId, CartServiceError> {
        let product = self.products.fetch(product).await?;
        if product.owner == user {
            return Err(CartServiceError::OwnProduct);
        }
        if !product.is_purchasable() {
            return Err(CartServiceError::NotForSale(product.id));
        }

        let existing = self.carts.find(user, product.id).await?;
        let requested = quantity.saturating_add(existing.as_ref().map_or(0, |item| item.quantity));
        if requested > product.stock {
            return Err(CartServiceError::NotEnoughStock {
                requested,
                available: product.stock,
            });
        }

        let id = match existing {
            Some(item) => {
                self.carts
                    .set_quantity(item.id, requested, Some(product.unit_price()))
                    .await?;
                debug!(item = %item.id, requested, "Merged into existing cart row");
                item.id
            }
            None => {
                self.carts
                    .add_item(CartItemCreate {
                        user,
                        product: product.id,
                        quantity,
                        unit_price: product.unit_price(),
                    })
                    .await?
            }
        };
        info!(%id, "Added to cart");
        Ok(id)
    }

    /// Changes a row's quantity. Zero removes the row.
    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        user: UserId,
        item: CartItemId,
        quantity: u32,
    ) -> Result<(), CartServiceError> {
        let row = self.owned_row(user, item).await?;
        if quantity == 0 {
            return self.remove(user, item).await;
        }

        let product = self.products.fetch(row.product).await?;
        if quantity > product.stock {
            return Err(CartServiceError::NotEnoughStock {
                requested: quantity,
                available: product.stock,
            });
        }
        self.carts
            .set_quantity(item, quantity, Some(product.unit_price()))
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, user: UserId, item: CartItemId) -> Result<(), CartServiceError> {
        self.owned_row(user, item).await?;
        self.carts.delete(item).await?;
        Ok(())
    }

    /// The user's cart split by seller, sellers in id order. Line totals use
    /// the products' current prices.
    #[instrument(skip(self))]
    pub async fn carts(&self, user: UserId) -> Result<Vec<Cart>, CartServiceError> {
        let items = self.carts.items_of(user).await?;

        let mut groups: BTreeMap<UserId, Vec<CartLine>> = BTreeMap::new();
        for item in items {
            let Some(product) = self.products.get(item.product).await? else {
                warn!(item = %item.id, product = %item.product, "Cart row points at a missing product");
                continue;
            };
            groups.entry(product.owner).or_default().push(CartLine {
                item: item.id,
                total: product.unit_price() * u64::from(item.quantity),
                quantity: item.quantity,
                product,
            });
        }

        let sellers = self.profiles.profiles_of(groups.keys().copied()).await?;
        Ok(groups
            .into_iter()
            .map(|(seller_id, lines)| Cart {
                seller_name: sellers
                    .get(&seller_id)
                    .map(|profile| profile.display_name().to_string())
                    .unwrap_or_else(|| seller_id.to_string()),
                total: lines.iter().map(|line| line.total).sum(),
                seller_id,
                lines,
            })
            .collect())
    }

    pub async fn cart_for(
        &self,
        user: UserId,
        seller: UserId,
    ) -> Result<Option<Cart>, CartServiceError> {
        Ok(self
            .carts(user)
            .await?
            .into_iter()
            .find(|cart| cart.seller_id == seller))
    }

    async fn owned_row(
        &self,
        user: UserId,
        item: CartItemId,
    ) -> Result<CartItem, CartServiceError> {
        let row = self
            .carts
            .get(item)
            .await?
            .ok_or_else(|| CartError::NotFound(item.to_string()))?;
        if row.user != user {
            return Err(CartServiceError::NotYours(item));
        }
        Ok(row)
    }
}

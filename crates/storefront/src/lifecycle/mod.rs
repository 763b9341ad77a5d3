//! # Storefront System
//!
//! Spawns one task per table, wires the order table to the product and
//! wallet tables it charges and restocks through, and builds the services
//! on top of the clients.
//!
//! Shutdown works by dropping every client: each table sees its channel
//! close and leaves its loop. The order table holds product and wallet
//! clients in its context, so those two tables stop after it.

use crate::clients::{
    AccountClient, CartClient, CouponClient, OrderClient, ProductClient, ProfileClient,
    ReviewClient, StorageClient, TransactionClient, WalletClient,
};
use crate::config::Settings;
use crate::order_actor::OrderContext;
use crate::services::{
    CartService, CatalogService, CheckoutService, CouponService, FulfilmentService,
    HttpPaymentGateway, IdentityService, InventoryService, LocalAuth, PaymentError,
    PaymentGateway, ReviewService, WalletService,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Table task failed: {0}")]
    TableFailed(String),
}

/// Typed clients of every table.
#[derive(Clone)]
pub struct Tables {
    pub accounts: AccountClient,
    pub carts: CartClient,
    pub coupons: CouponClient,
    pub orders: OrderClient,
    pub products: ProductClient,
    pub profiles: ProfileClient,
    pub reviews: ReviewClient,
    pub storage: StorageClient,
    pub transactions: TransactionClient,
    pub wallets: WalletClient,
}

pub struct StorefrontSystem {
    pub tables: Tables,
    pub catalog: CatalogService,
    pub cart: CartService,
    pub coupons: CouponService,
    pub checkout: CheckoutService,
    pub fulfilment: FulfilmentService,
    pub inventory: InventoryService,
    pub wallet: WalletService,
    pub identity: IdentityService,
    pub reviews: ReviewService,

    handles: Vec<JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Starts the system with the HTTP payment gateway from `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment client cannot be built.
    pub fn start(settings: &Settings) -> Result<Self, PaymentError> {
        let gateway =
            HttpPaymentGateway::new(settings.payment_endpoint.clone(), settings.payment_timeout)?;
        Ok(Self::new(settings, Arc::new(gateway)))
    }

    /// Starts every table and builds the services. Must be called inside a
    /// tokio runtime.
    pub fn new(settings: &Settings, gateway: Arc<dyn PaymentGateway>) -> Self {
        let buffer = settings.table_buffer.max(1);

        let (account_table, accounts) = crate::account_actor::new(buffer);
        let (cart_table, carts) = crate::cart_actor::new(buffer);
        let (coupon_table, coupons) = crate::coupon_actor::new(buffer);
        let (order_table, orders) = crate::order_actor::new(buffer);
        let (product_table, products) = crate::product_actor::new(buffer);
        let (profile_table, profiles) = crate::profile_actor::new(buffer);
        let (review_table, reviews) = crate::review_actor::new(buffer);
        let (storage_table, storage) = crate::storage_actor::new(buffer);
        let (transaction_table, transactions) = crate::transaction_actor::new(buffer);
        let (wallet_table, wallets) = crate::wallet_actor::new(buffer);

        let tables = Tables {
            accounts: AccountClient::new(accounts),
            carts: CartClient::new(carts),
            coupons: CouponClient::new(coupons),
            orders: OrderClient::new(orders),
            products: ProductClient::new(products),
            profiles: ProfileClient::new(profiles),
            reviews: ReviewClient::new(reviews),
            storage: StorageClient::new(storage, settings.storage_public_url.clone()),
            transactions: TransactionClient::new(transactions),
            wallets: WalletClient::new(wallets),
        };

        let order_context = OrderContext {
            products: tables.products.clone(),
            wallets: tables.wallets.clone(),
        };

        let handles = vec![
            tokio::spawn(account_table.run(())),
            tokio::spawn(cart_table.run(())),
            tokio::spawn(coupon_table.run(())),
            tokio::spawn(order_table.run(order_context)),
            tokio::spawn(product_table.run(())),
            tokio::spawn(profile_table.run(())),
            tokio::spawn(review_table.run(())),
            tokio::spawn(storage_table.run(())),
            tokio::spawn(transaction_table.run(())),
            tokio::spawn(wallet_table.run(())),
        ];

        let pages = settings.pages.clone();
        let catalog = CatalogService::new(
            tables.products.clone(),
            tables.profiles.clone(),
            pages.clone(),
        );
        let cart = CartService::new(
            tables.carts.clone(),
            tables.products.clone(),
            tables.profiles.clone(),
        );
        let coupons = CouponService::new(tables.coupons.clone());
        let checkout = CheckoutService::new(
            cart.clone(),
            tables.carts.clone(),
            coupons.clone(),
            tables.wallets.clone(),
            tables.orders.clone(),
        );
        let fulfilment = FulfilmentService::new(
            tables.orders.clone(),
            tables.profiles.clone(),
            pages.clone(),
        );
        let inventory = InventoryService::new(tables.products.clone(), tables.storage.clone());
        let wallet = WalletService::new(
            tables.wallets.clone(),
            tables.transactions.clone(),
            gateway,
            settings.coins,
            pages.transactions,
        );
        let identity = IdentityService::new(
            Arc::new(LocalAuth::new(tables.accounts.clone())),
            tables.profiles.clone(),
            tables.wallets.clone(),
            tables.storage.clone(),
        );
        let reviews = ReviewService::new(tables.reviews.clone(), pages.reviews);

        info!(tables = handles.len(), "Storefront started");

        Self {
            tables,
            catalog,
            cart,
            coupons,
            checkout,
            fulfilment,
            inventory,
            wallet,
            identity,
            reviews,
            handles,
        }
    }

    /// Drops every client held by the system and waits for the tables to
    /// stop. Clones handed out earlier keep their tables alive until they
    /// are dropped too.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down storefront...");

        let Self {
            tables,
            catalog,
            cart,
            coupons,
            checkout,
            fulfilment,
            inventory,
            wallet,
            identity,
            reviews,
            handles,
        } = self;
        drop((
            tables, catalog, cart, coupons, checkout, fulfilment, inventory, wallet, identity,
            reviews,
        ));

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Table task failed: {:?}", e);
                return Err(LifecycleError::TableFailed(e.to_string()));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}

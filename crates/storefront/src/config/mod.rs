//! Storefront configuration
//!
//! [`StorefrontConfig`] is read from the command line and environment (with a
//! `.env` file loaded first). [`Settings`] is the plain runtime copy handed to
//! the system; its `Default` matches the command-line defaults.

use clap::Parser;
use std::time::Duration;

pub mod catalog;
pub mod logging;
pub mod services;

pub use catalog::CatalogConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use services::{ServicesConfig, TableConfig, WalletConfig};

/// Storefront configuration
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront demo runtime", long_about = None)]
pub struct StorefrontConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Table settings.
    #[command(flatten)]
    pub tables: TableConfig,

    /// Listing page sizes.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Coin exchange settings.
    #[command(flatten)]
    pub wallet: WalletConfig,

    /// External services.
    #[command(flatten)]
    pub services: ServicesConfig,
}

impl StorefrontConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub fn settings(&self) -> Settings {
        Settings {
            table_buffer: self.tables.table_buffer,
            pages: PageSizes {
                shop: self.catalog.shop_page_size,
                collections: self.catalog.collection_page_size,
                sales: self.catalog.sales_page_size,
                delivery: self.catalog.delivery_page_size,
                transactions: self.catalog.transaction_page_size,
                reviews: self.catalog.review_page_size,
                new_arrivals: self.catalog.new_arrivals_limit,
                related: self.catalog.related_limit,
            },
            coins: CoinRates {
                coins_per_unit: self.wallet.coins_per_unit,
                min_coins: self.wallet.min_coin_purchase,
            },
            storage_public_url: self.services.storage_public_url.clone(),
            payment_endpoint: self.services.payment_endpoint.clone(),
            payment_timeout: Duration::from_secs(self.services.payment_timeout_seconds),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSizes {
    pub shop: usize,
    pub collections: usize,
    pub sales: usize,
    pub delivery: usize,
    pub transactions: usize,
    pub reviews: usize,
    pub new_arrivals: usize,
    pub related: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            shop: 12,
            collections: 12,
            sales: 6,
            delivery: 8,
            transactions: 8,
            reviews: 10,
            new_arrivals: 30,
            related: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinRates {
    pub coins_per_unit: u64,
    pub min_coins: u64,
}

impl Default for CoinRates {
    fn default() -> Self {
        Self {
            coins_per_unit: 100,
            min_coins: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub table_buffer: usize,
    pub pages: PageSizes,
    pub coins: CoinRates,
    pub storage_public_url: String,
    pub payment_endpoint: String,
    pub payment_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            table_buffer: 32,
            pages: PageSizes::default(),
            coins: CoinRates::default(),
            storage_public_url: "http://localhost:54321".into(),
            payment_endpoint: "http://localhost:5000".into(),
            payment_timeout: Duration::from_secs(10),
        }
    }
}

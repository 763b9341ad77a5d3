//! Tables, wallet and external services

use clap::builder::RangedU64ValueParser;
use clap::Args;

#[derive(Debug, Args)]
pub struct TableConfig {
    /// Request buffer of each table's channel
    #[arg(
        long,
        env = "TABLE_BUFFER",
        default_value_t = 32,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub table_buffer: usize,
}

#[derive(Debug, Args)]
pub struct WalletConfig {
    /// Coins bought per currency unit
    #[arg(
        long,
        env = "COINS_PER_UNIT",
        default_value_t = 100,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub coins_per_unit: u64,

    /// Smallest purchase, in coins
    #[arg(long, env = "MIN_COIN_PURCHASE", default_value_t = 100)]
    pub min_coin_purchase: u64,
}

#[derive(Debug, Args)]
pub struct ServicesConfig {
    /// Base URL public object URLs are built on
    #[arg(
        long,
        env = "STORAGE_PUBLIC_URL",
        default_value = "http://localhost:54321"
    )]
    pub storage_public_url: String,

    /// Base URL of the payment-intent service
    #[arg(long, env = "PAYMENT_ENDPOINT", default_value = "http://localhost:5000")]
    pub payment_endpoint: String,

    /// Timeout for payment requests, in seconds
    #[arg(long, env = "PAYMENT_TIMEOUT_SECONDS", default_value_t = 10u64)]
    pub payment_timeout_seconds: u64,
}

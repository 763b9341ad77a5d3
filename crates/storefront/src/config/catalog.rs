//! Page sizes of the listing screens

use clap::Args;

#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Products per shop page
    #[arg(long, env = "SHOP_PAGE_SIZE", default_value_t = 12)]
    pub shop_page_size: usize,

    /// Collections per page
    #[arg(long, env = "COLLECTION_PAGE_SIZE", default_value_t = 12)]
    pub collection_page_size: usize,

    /// Orders per page on the seller's sales list
    #[arg(long, env = "SALES_PAGE_SIZE", default_value_t = 6)]
    pub sales_page_size: usize,

    /// Orders per page on the courier's board
    #[arg(long, env = "DELIVERY_PAGE_SIZE", default_value_t = 8)]
    pub delivery_page_size: usize,

    /// Coin transactions per page
    #[arg(long, env = "TRANSACTION_PAGE_SIZE", default_value_t = 8)]
    pub transaction_page_size: usize,

    /// Reviews per page
    #[arg(long, env = "REVIEW_PAGE_SIZE", default_value_t = 10)]
    pub review_page_size: usize,

    /// Size of the new arrivals strip
    #[arg(long, env = "NEW_ARRIVALS_LIMIT", default_value_t = 30)]
    pub new_arrivals_limit: usize,

    /// Size of the "you might like" strip
    #[arg(long, env = "RELATED_LIMIT", default_value_t = 8)]
    pub related_limit: usize,
}

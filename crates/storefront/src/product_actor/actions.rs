/// Stock operations. Each returns the stock left afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductAction {
    CheckStock,
    /// Takes units out of stock for a purchase. Fails rather than going
    /// below zero.
    DecrementStock(u32),
    /// Puts units back, e.g. when an order is canceled.
    RestoreStock(u32),
}

//! # Record Trait
//!
//! Every table in the store holds rows of a single type implementing [`Record`].
//! The trait ties together the row's identifier, the payloads used to create
//! and update it, the filter used to select it in listings, and the per-row
//! actions the table can apply atomically.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A row type served by a [`Table`](crate::Table).
///
/// Hooks receive the table's `Context`, injected when the table is started
/// with [`Table::run`](crate::Table::run). A table that needs to reach other
/// tables (for example orders debiting wallets) carries their clients there.
///
/// Hooks that mutate a row work on a staged copy: if the hook returns an error
/// the stored row is left exactly as it was.
#[async_trait]
pub trait Record: Clone + Send + Sync + 'static {
    /// Row identifier. Tables allocate ids from a `u32` counter starting at 1.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload for inserting a row.
    type Create: Send + Sync + Debug;

    /// Payload for patching a row.
    type Update: Send + Sync + Debug;

    /// Predicate payload for listings.
    type Filter: Send + Sync + Debug;

    /// Ordering key for listings.
    type SortKey: Ord;

    /// Per-row atomic operation.
    type Action: Send + Sync + Debug;

    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected at startup.
    type Context: Send + Sync;

    type Error: std::error::Error + Send + Sync + 'static;

    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this row is selected by `filter`.
    fn matches(&self, filter: &Self::Filter) -> bool;

    fn sort_key(&self) -> Self::SortKey;

    // --- Lifecycle Hooks (Async) ---

    /// Runs before the row is stored. An error aborts the insert.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before the row is removed. An error keeps the row.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

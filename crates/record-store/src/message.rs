//! # Table Messages
//!
//! Requests sent from a [`TableClient`](crate::TableClient) to its
//! [`Table`](crate::Table). Each carries a oneshot sender for the reply.

use crate::error::StoreError;
use crate::query::{Page, Query};
use crate::record::Record;
use tokio::sync::oneshot;

pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum TableRequest<T: Record> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        query: Query<T::Filter>,
        respond_to: Response<Page<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

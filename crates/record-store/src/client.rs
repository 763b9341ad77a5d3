//! # Table Client
//!
//! Typed async handle to a running [`Table`](crate::Table).

use crate::error::StoreError;
use crate::message::TableRequest;
use crate::query::{Page, Query, Range};
use crate::record::Record;
use tokio::sync::{mpsc, oneshot};

/// Forwards requests over the table's mpsc channel and awaits the oneshot
/// reply. Holds only a sender, so clones are cheap and can be shared across
/// tasks. The table shuts down once every clone has been dropped.
pub struct TableClient<T: Record> {
    sender: mpsc::Sender<TableRequest<T>>,
}

impl<T: Record> Clone for TableClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Record> TableClient<T> {
    pub fn new(sender: mpsc::Sender<TableRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> TableRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::TableClosed)?;
        response.await.map_err(|_| StoreError::TableDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, StoreError> {
        self.request(|respond_to| TableRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| TableRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self, query: Query<T::Filter>) -> Result<Page<T>, StoreError> {
        self.request(|respond_to| TableRequest::List { query, respond_to })
            .await
    }

    /// Number of rows matching `filter`.
    pub async fn count(&self, filter: T::Filter) -> Result<usize, StoreError> {
        let page = self.list(Query::new(filter).range(Range::first(0))).await?;
        Ok(page.total)
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.request(|respond_to| TableRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| TableRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, StoreError> {
        self.request(|respond_to| TableRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}

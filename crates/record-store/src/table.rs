//! # Table Actor
//!
//! A [`Table`] owns every row of one record type and serves requests one at a
//! time from its channel. Because a single task applies all mutations, each
//! request (including an action's read-modify-write) is atomic with respect to
//! every other request on the same table.

use crate::client::TableClient;
use crate::error::StoreError;
use crate::message::TableRequest;
use crate::query::{Direction, Page, Query};
use crate::record::Record;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct Table<T: Record> {
    receiver: mpsc::Receiver<TableRequest<T>>,
    rows: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: Record> Table<T> {
    pub fn new(buffer_size: usize) -> (Self, TableClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let table = Self {
            receiver,
            rows: BTreeMap::new(),
            next_id: 1,
        };
        (table, TableClient::new(sender))
    }

    pub async fn run(mut self, context: T::Context) {
        // "Product" rather than "storefront::model::product::Product"
        let table = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(table, "Table started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                TableRequest::Create { params, respond_to } => {
                    debug!(table, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut row) => {
                            if let Err(e) = row.on_create(&context).await {
                                warn!(table, error = %e, "on_create failed");
                                let _ = respond_to.send(Err(StoreError::Record(Box::new(e))));
                                continue;
                            }
                            self.rows.insert(id.clone(), row);
                            info!(table, %id, size = self.rows.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(table, error = %e, "Create failed");
                            let _ = respond_to.send(Err(StoreError::Record(Box::new(e))));
                        }
                    }
                }
                TableRequest::Get { id, respond_to } => {
                    let row = self.rows.get(&id).cloned();
                    debug!(table, %id, found = row.is_some(), "Get");
                    let _ = respond_to.send(Ok(row));
                }
                TableRequest::List { query, respond_to } => {
                    let page = self.select(&query);
                    debug!(table, ?query, returned = page.items.len(), total = page.total, "List");
                    let _ = respond_to.send(Ok(page));
                }
                TableRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(table, %id, ?update, "Update");
                    let Some(row) = self.rows.get(&id) else {
                        warn!(table, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut staged = row.clone();
                    if let Err(e) = staged.on_update(update, &context).await {
                        warn!(table, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(StoreError::Record(Box::new(e))));
                        continue;
                    }
                    self.rows.insert(id.clone(), staged.clone());
                    info!(table, %id, "Updated");
                    let _ = respond_to.send(Ok(staged));
                }
                TableRequest::Delete { id, respond_to } => {
                    debug!(table, %id, "Delete");
                    let Some(row) = self.rows.get(&id) else {
                        warn!(table, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = row.on_delete(&context).await {
                        warn!(table, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(StoreError::Record(Box::new(e))));
                        continue;
                    }
                    self.rows.remove(&id);
                    info!(table, %id, size = self.rows.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                TableRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(table, %id, ?action, "Action");
                    let Some(row) = self.rows.get(&id) else {
                        warn!(table, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut staged = row.clone();
                    match staged.handle_action(action, &context).await {
                        Ok(result) => {
                            self.rows.insert(id.clone(), staged);
                            info!(table, %id, "Action ok");
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(table, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(StoreError::Record(Box::new(e))));
                        }
                    }
                }
            }
        }

        info!(table, size = self.rows.len(), "Shutdown");
    }

    fn select(&self, query: &Query<T::Filter>) -> Page<T> {
        let mut matching: Vec<&T> = self
            .rows
            .values()
            .filter(|row| row.matches(&query.filter))
            .collect();

        // Stable sort: rows with equal keys keep id order.
        matching.sort_by_key(|row| row.sort_key());
        if query.direction == Direction::Descending {
            matching.reverse();
        }

        let total = matching.len();
        let items = match query.range {
            Some(range) => matching
                .into_iter()
                .skip(range.offset)
                .take(range.limit)
                .cloned()
                .collect(),
            None => matching.into_iter().cloned().collect(),
        };
        Page { items, total }
    }
}

//! # Mock Tables
//!
//! [`MockTable<T>`] hands out an ordinary [`TableClient<T>`] whose requests are
//! answered from a queue of expectations instead of a running [`Table`]. Use
//! it to test workflow code against scripted store behaviour, including
//! failures that are awkward to provoke with a real table.
//!
//! ```rust
//! use record_store::mock::MockTable;
//! use record_store::{Page, Query, Record, StoreError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Wallet { id: u32, balance: u64 }
//! #[derive(Debug)] struct WalletCreate;
//! #[derive(Debug)] struct WalletUpdate;
//! #[derive(Debug)] enum WalletAction { Debit(u64) }
//! #[derive(Debug, thiserror::Error)] #[error("wallet")] struct WalletError;
//!
//! #[async_trait]
//! impl Record for Wallet {
//!     type Id = u32; type Create = WalletCreate; type Update = WalletUpdate;
//!     type Filter = (); type SortKey = u32;
//!     type Action = WalletAction; type ActionResult = u64;
//!     type Context = (); type Error = WalletError;
//!     fn from_create_params(id: u32, _: WalletCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, balance: 0 })
//!     }
//!     fn matches(&self, _: &()) -> bool { true }
//!     fn sort_key(&self) -> u32 { self.id }
//!     async fn on_update(&mut self, _: WalletUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: WalletAction, _: &()) -> Result<u64, Self::Error> { Ok(0) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockTable::<Wallet>::new();
//!     mock.expect_list().return_ok(Page { items: vec![Wallet { id: 1, balance: 50 }], total: 1 });
//!     mock.expect_action(1).return_err(StoreError::TableClosed);
//!
//!     let client = mock.client();
//!     let page = client.list(Query::new(())).await.unwrap();
//!     assert_eq!(page.items[0].balance, 50);
//!     assert!(client.perform_action(1, WalletAction::Debit(10)).await.is_err());
//!
//!     mock.verify();
//! }
//! ```
//!
//! For finer control, [`create_mock_client`] returns the raw request receiver
//! so a test can inspect each payload before answering it.

use crate::client::TableClient;
use crate::error::StoreError;
use crate::message::TableRequest;
use crate::query::{Page, Query};
use crate::record::Record;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: Record> {
    Get {
        response: Result<Option<T>, StoreError>,
    },
    List {
        response: Result<Page<T>, StoreError>,
    },
    Create {
        response: Result<T::Id, StoreError>,
    },
    Update {
        response: Result<T, StoreError>,
    },
    Delete {
        response: Result<(), StoreError>,
    },
    Action {
        response: Result<T::ActionResult, StoreError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// Answers requests in order from a queue of expectations.
///
/// A request that does not match the kind of the next expectation panics the
/// mock's task, which surfaces in the test as a `TableDropped` error.
pub struct MockTable<T: Record> {
    client: TableClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Record> Default for MockTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MockTable<T> {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<TableRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (TableRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::List { respond_to, .. },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::Update { respond_to, .. },
                        Some(Expectation::Update { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::Delete { respond_to, .. },
                        Some(Expectation::Delete { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::Action { respond_to, .. },
                        Some(Expectation::Action { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: TableClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    pub fn client(&self) -> TableClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, _id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(|response| Expectation::Get { response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Page<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, _id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Update { response })
    }

    pub fn expect_delete(&mut self, _id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(|response| Expectation::Delete { response })
    }

    pub fn expect_action(&mut self, _id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(|response| Expectation::Action { response })
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn builder<R>(
        &self,
        wrap: fn(Result<R, StoreError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
        }
    }
}

pub struct ExpectationBuilder<T: Record, R> {
    wrap: fn(Result<R, StoreError>) -> Expectation<T>,
    expectations: Expectations<T>,
}

impl<T: Record, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(response));
    }
}

/// A client plus the receiving end of its channel.
pub fn create_mock_client<T: Record>(
    buffer_size: usize,
) -> (TableClient<T>, mpsc::Receiver<TableRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (TableClient::new(sender), receiver)
}

pub async fn expect_create<T: Record>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, StoreError>>)> {
    match receiver.recv().await {
        Some(TableRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

pub async fn expect_get<T: Record>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(TableRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_list<T: Record>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(Query<T::Filter>, oneshot::Sender<Result<Page<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(TableRequest::List { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

pub async fn expect_action<T: Record>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, StoreError>>,
)> {
    match receiver.recv().await {
        Some(TableRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Coupon {
        id: u32,
        name: String,
        percent: u8,
    }

    #[derive(Debug)]
    struct CouponCreate {
        name: String,
        percent: u8,
    }

    #[derive(Debug)]
    struct CouponUpdate;

    #[derive(Debug)]
    enum CouponAction {}

    #[derive(Debug, thiserror::Error)]
    #[error("Coupon error")]
    struct CouponError;

    #[async_trait]
    impl Record for Coupon {
        type Id = u32;
        type Create = CouponCreate;
        type Update = CouponUpdate;
        type Filter = Option<String>;
        type SortKey = u32;
        type Action = CouponAction;
        type ActionResult = ();
        type Context = ();
        type Error = CouponError;

        fn from_create_params(id: u32, params: CouponCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                name: params.name,
                percent: params.percent,
            })
        }

        fn matches(&self, name: &Option<String>) -> bool {
            name.as_ref().is_none_or(|n| *n == self.name)
        }

        fn sort_key(&self) -> u32 {
            self.id
        }

        async fn on_update(&mut self, _: CouponUpdate, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _: CouponAction, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn coupon(id: u32, name: &str, percent: u8) -> Coupon {
        Coupon {
            id,
            name: name.to_string(),
            percent,
        }
    }

    #[tokio::test]
    async fn test_raw_mock_client_inspects_payloads() {
        let (client, mut receiver) = create_mock_client::<Coupon>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(CouponCreate {
                    name: "SAVE10".to_string(),
                    percent: 10,
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "SAVE10");
        assert_eq!(payload.percent, 10);
        responder.send(Ok(7)).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn test_list_requests_carry_the_query() {
        let (client, mut receiver) = create_mock_client::<Coupon>(10);

        let list_task = tokio::spawn(async move {
            client
                .list(Query::new(Some("SAVE10".to_string())).limit(1))
                .await
        });

        let (query, responder) = expect_list(&mut receiver)
            .await
            .expect("Expected List request");
        assert_eq!(query.filter.as_deref(), Some("SAVE10"));
        assert_eq!(query.range.map(|r| r.limit), Some(1));
        responder
            .send(Ok(Page {
                items: vec![coupon(1, "SAVE10", 10)],
                total: 1,
            }))
            .unwrap();

        let page = list_task.await.unwrap().unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_expectations_answer_in_order() {
        let mut mock = MockTable::<Coupon>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(coupon(1, "SAVE10", 10)));
        mock.expect_delete(1).return_err(StoreError::NotFound("1".into()));

        let client = mock.client();

        let id = client
            .create(CouponCreate {
                name: "SAVE10".to_string(),
                percent: 10,
            })
            .await
            .unwrap();
        assert_eq!(id, 1);

        let fetched = client.get(1).await.unwrap().unwrap();
        assert_eq!(fetched.percent, 10);

        assert!(matches!(
            client.delete(1).await,
            Err(StoreError::NotFound(_))
        ));

        mock.verify();
    }
}

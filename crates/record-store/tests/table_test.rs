use async_trait::async_trait;
use record_store::{total_pages, Query, Record, StoreError, Table};

// --- Test Record ---

#[derive(Clone, Debug, PartialEq)]
struct Listing {
    id: u32,
    title: String,
    category: String,
    stock: u32,
    listed_at: u32,
}

#[derive(Debug)]
struct ListingCreate {
    title: String,
    category: String,
    stock: u32,
    listed_at: u32,
}

#[derive(Debug)]
struct ListingUpdate {
    title: Option<String>,
    stock: Option<u32>,
}

#[derive(Debug, Default)]
struct ListingFilter {
    category: Option<String>,
    in_stock: bool,
}

#[derive(Debug)]
enum ListingAction {
    Take(u32),
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum ListingError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
}

#[async_trait]
impl Record for Listing {
    type Id = u32;
    type Create = ListingCreate;
    type Update = ListingUpdate;
    type Filter = ListingFilter;
    type SortKey = u32;
    type Action = ListingAction;
    type ActionResult = u32;
    type Context = ();
    type Error = ListingError;

    fn from_create_params(id: u32, params: ListingCreate) -> Result<Self, Self::Error> {
        if params.title.is_empty() {
            return Err(ListingError::EmptyTitle);
        }
        Ok(Self {
            id,
            title: params.title,
            category: params.category,
            stock: params.stock,
            listed_at: params.listed_at,
        })
    }

    fn matches(&self, filter: &ListingFilter) -> bool {
        filter.category.as_ref().is_none_or(|c| *c == self.category)
            && (!filter.in_stock || self.stock > 0)
    }

    fn sort_key(&self) -> u32 {
        self.listed_at
    }

    async fn on_update(&mut self, update: ListingUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(title) = update.title {
            if title.is_empty() {
                return Err(ListingError::EmptyTitle);
            }
            self.title = title;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ListingAction,
        _ctx: &(),
    ) -> Result<u32, Self::Error> {
        match action {
            ListingAction::Take(requested) => {
                if requested > self.stock {
                    return Err(ListingError::InsufficientStock {
                        requested,
                        available: self.stock,
                    });
                }
                self.stock -= requested;
                Ok(self.stock)
            }
        }
    }
}

fn listing(title: &str, category: &str, stock: u32, listed_at: u32) -> ListingCreate {
    ListingCreate {
        title: title.into(),
        category: category.into(),
        stock,
        listed_at,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_table_full_lifecycle() {
    let (table, client) = Table::<Listing>::new(10);
    tokio::spawn(table.run(()));

    let id: u32 = client.create(listing("Lamp", "home", 3, 1)).await.unwrap();
    assert_eq!(id, 1);

    let left = client
        .perform_action(id, ListingAction::Take(2))
        .await
        .unwrap();
    assert_eq!(left, 1);

    let updated = client
        .update(
            id,
            ListingUpdate {
                title: Some("Desk Lamp".into()),
                stock: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Desk Lamp");
    assert_eq!(updated.stock, 1);

    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(matches!(
        client.delete(id).await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_failed_hooks_leave_row_untouched() {
    let (table, client) = Table::<Listing>::new(10);
    tokio::spawn(table.run(()));

    let id = client.create(listing("Chair", "home", 2, 1)).await.unwrap();

    // stock is applied before the title check fails
    let err = client
        .update(
            id,
            ListingUpdate {
                title: Some(String::new()),
                stock: Some(50),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        err.into_record_error::<ListingError>().unwrap(),
        ListingError::EmptyTitle
    );

    let err = client
        .perform_action(id, ListingAction::Take(5))
        .await
        .unwrap_err();
    assert_eq!(
        err.into_record_error::<ListingError>().unwrap(),
        ListingError::InsufficientStock {
            requested: 5,
            available: 2
        }
    );

    let row = client.get(id).await.unwrap().unwrap();
    assert_eq!(row.stock, 2);
    assert_eq!(row.title, "Chair");
}

#[tokio::test]
async fn test_rejected_create_is_not_stored() {
    let (table, client) = Table::<Listing>::new(10);
    tokio::spawn(table.run(()));

    assert!(client.create(listing("", "home", 1, 1)).await.is_err());
    assert_eq!(client.count(ListingFilter::default()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_filters_orders_and_pages() {
    let (table, client) = Table::<Listing>::new(32);
    tokio::spawn(table.run(()));

    for n in 0..13u32 {
        client
            .create(listing(&format!("book {n}"), "books", 1, n))
            .await
            .unwrap();
    }
    client.create(listing("sold out", "books", 0, 100)).await.unwrap();
    client.create(listing("kettle", "home", 4, 200)).await.unwrap();

    let filter = || ListingFilter {
        category: Some("books".into()),
        in_stock: true,
    };

    let first = client
        .list(Query::new(filter()).descending().page(1, 12))
        .await
        .unwrap();
    assert_eq!(first.total, 13);
    assert_eq!(first.items.len(), 12);
    assert_eq!(first.items[0].title, "book 12");
    assert_eq!(total_pages(first.total, 12), 2);

    let second = client
        .list(Query::new(filter()).descending().page(2, 12))
        .await
        .unwrap();
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].title, "book 0");

    let beyond = client
        .list(Query::new(filter()).page(3, 12))
        .await
        .unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total, 13);

    let far_beyond = client
        .list(Query::new(filter()).page(usize::MAX, 12))
        .await
        .unwrap();
    assert!(far_beyond.items.is_empty());
    assert_eq!(far_beyond.total, 13);
}

#[tokio::test]
async fn test_concurrent_actions_are_serialized() {
    let (table, client) = Table::<Listing>::new(64);
    tokio::spawn(table.run(()));

    let id = client.create(listing("Ticket", "events", 10, 1)).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..25 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.perform_action(id, ListingAction::Take(1)).await
        }));
    }

    let mut taken = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            taken += 1;
        }
    }

    assert_eq!(taken, 10);
    assert_eq!(client.get(id).await.unwrap().unwrap().stock, 0);
}

#[tokio::test]
async fn test_client_reports_closed_table() {
    let (table, client) = Table::<Listing>::new(1);
    drop(table);

    assert!(matches!(
        client.get(1).await,
        Err(StoreError::TableClosed)
    ));
}

//! # Order Client
//!
//! Placing an order and moving it through its statuses. Payment and stock
//! side effects run inside the order table's hooks, not here.

use super::record_error;
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, OrderUpdate, Role, ShippingDetails, UserId};
use crate::order_actor::{OrderAction, OrderError, StatusChange};
use async_trait::async_trait;
use record_store::{RecordClient, StoreError, TableClient};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct OrderClient {
    inner: TableClient<Order>,
}

#[async_trait]
impl RecordClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &TableClient<Order> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        record_error(e)
    }
}

impl OrderClient {
    pub fn new(inner: TableClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(buyer = %params.buyer, seller = %params.seller, total = params.total))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "create_order called");
        info!("Sending create_order to table");
        self.inner.create(params).await.map_err(record_error)
    }

    pub async fn fetch(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Moves the order to `to` on behalf of `by`. Returns the previous status.
    #[instrument(skip(self))]
    pub async fn transition(
        &self,
        id: OrderId,
        to: OrderStatus,
        by: UserId,
        role: Role,
    ) -> Result<OrderStatus, OrderError> {
        self.inner
            .perform_action(id, OrderAction::Transition(StatusChange { to, by, role }))
            .await
            .map_err(record_error)
    }

    #[instrument(skip(self))]
    pub async fn update_shipping(
        &self,
        id: OrderId,
        shipping: ShippingDetails,
    ) -> Result<Order, OrderError> {
        self.inner
            .update(id, OrderUpdate { shipping })
            .await
            .map_err(record_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_store::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_transition_carries_who_and_role() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let orders = OrderClient::new(client);

        let task = tokio::spawn(async move {
            orders
                .transition(OrderId(5), OrderStatus::Pickup, UserId(30), Role::Delivery)
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, OrderId(5));
        assert_eq!(
            action,
            OrderAction::Transition(StatusChange {
                to: OrderStatus::Pickup,
                by: UserId(30),
                role: Role::Delivery,
            })
        );
        responder.send(Ok(OrderStatus::Confirmed)).unwrap();

        assert_eq!(task.await.unwrap(), Ok(OrderStatus::Confirmed));
    }
}

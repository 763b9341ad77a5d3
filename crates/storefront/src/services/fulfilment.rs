//! Order lists and status changes for sellers, buyers and couriers.

use crate::clients::{OrderClient, ProfileClient, RecordClient};
use crate::config::PageSizes;
use crate::model::{
    Order, OrderFilter, OrderId, OrderStatus, Profile, Role, ShippingDetails, UserId,
};
use crate::order_actor::OrderError;
use crate::profile_actor::ProfileError;
use chrono::Utc;
use record_store::{total_pages, Query};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum FulfilmentError {
    #[error("User {0} is not a delivery courier")]
    NotCourier(UserId),

    #[error("Courier {0} has no district set")]
    NoDistrict(UserId),

    #[error("Order {order} is outside the courier's district")]
    OutsideDistrict { order: OrderId },

    #[error("Order {order} was placed by another buyer")]
    NotBuyer { order: OrderId },

    #[error("Pending orders are not on the delivery board")]
    PendingNotDeliverable,

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// An order with the profiles of both parties, when they have one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderView {
    pub order: Order,
    pub buyer: Option<Profile>,
    pub seller: Option<Profile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPage {
    pub items: Vec<OrderView>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliveryStats {
    pub today: usize,
    pub all: usize,
    pub completed: usize,
    pub not_completed: usize,
}

#[derive(Clone)]
pub struct FulfilmentService {
    orders: OrderClient,
    profiles: ProfileClient,
    pages: PageSizes,
}

impl FulfilmentService {
    pub fn new(orders: OrderClient, profiles: ProfileClient, pages: PageSizes) -> Self {
        Self {
            orders,
            profiles,
            pages,
        }
    }

    pub async fn seller_sales(
        &self,
        seller: UserId,
        page: usize,
    ) -> Result<OrderPage, FulfilmentError> {
        let filter = OrderFilter {
            seller: Some(seller),
            ..OrderFilter::default()
        };
        self.page_of(filter, page, self.pages.sales).await
    }

    pub async fn purchases(&self, buyer: UserId, page: usize) -> Result<OrderPage, FulfilmentError> {
        let filter = OrderFilter {
            buyer: Some(buyer),
            ..OrderFilter::default()
        };
        self.page_of(filter, page, self.pages.sales).await
    }

    /// Orders in the courier's district with `status`, newest first.
    #[instrument(skip(self))]
    pub async fn delivery_board(
        &self,
        courier: UserId,
        status: OrderStatus,
        page: usize,
    ) -> Result<OrderPage, FulfilmentError> {
        if status == OrderStatus::Pending {
            return Err(FulfilmentError::PendingNotDeliverable);
        }
        let district = self.district_of(courier).await?;
        let filter = OrderFilter {
            status: Some(status),
            exclude_status: Some(OrderStatus::Pending),
            district: Some(district),
            ..OrderFilter::default()
        };
        self.page_of(filter, page, self.pages.delivery).await
    }

    /// Store-wide order counts shown on the delivery dashboard. "Today" is
    /// the current UTC date.
    pub async fn delivery_stats(&self) -> Result<DeliveryStats, FulfilmentError> {
        let today = OrderFilter {
            placed_on: Some(Utc::now().date_naive()),
            ..OrderFilter::default()
        };
        let completed = OrderFilter {
            status: Some(OrderStatus::Completed),
            ..OrderFilter::default()
        };
        let not_completed = OrderFilter {
            exclude_status: Some(OrderStatus::Completed),
            ..OrderFilter::default()
        };
        Ok(DeliveryStats {
            today: self.orders.count(today).await?,
            all: self.orders.count(OrderFilter::default()).await?,
            completed: self.orders.count(completed).await?,
            not_completed: self.orders.count(not_completed).await?,
        })
    }

    /// Seller moves: confirm or cancel. Returns the order afterwards.
    #[instrument(skip(self))]
    pub async fn seller_update(
        &self,
        seller: UserId,
        order: OrderId,
        to: OrderStatus,
    ) -> Result<Order, FulfilmentError> {
        let from = self.orders.transition(order, to, seller, Role::User).await?;
        info!(%order, %from, %to, "Seller moved order");
        Ok(self.orders.fetch(order).await?)
    }

    /// Courier moves: pickup, delivering, completed. Only orders shipping
    /// to the courier's own district may be moved.
    #[instrument(skip(self))]
    pub async fn courier_update(
        &self,
        courier: UserId,
        order: OrderId,
        to: OrderStatus,
    ) -> Result<Order, FulfilmentError> {
        let district = self.district_of(courier).await?;
        let current = self.orders.fetch(order).await?;
        if current.shipping.address != district {
            return Err(FulfilmentError::OutsideDistrict { order });
        }

        let from = self
            .orders
            .transition(order, to, courier, Role::Delivery)
            .await?;
        info!(%order, %from, %to, "Courier moved order");
        Ok(self.orders.fetch(order).await?)
    }

    /// Buyer correction of the shipping details, while the seller has not
    /// yet confirmed.
    #[instrument(skip(self, shipping))]
    pub async fn edit_shipping(
        &self,
        buyer: UserId,
        order: OrderId,
        shipping: ShippingDetails,
    ) -> Result<Order, FulfilmentError> {
        let current = self.orders.fetch(order).await?;
        if current.buyer != buyer {
            return Err(FulfilmentError::NotBuyer { order });
        }
        let updated = self.orders.update_shipping(order, shipping).await?;
        info!(%order, "Shipping details changed");
        Ok(updated)
    }

    async fn district_of(&self, courier: UserId) -> Result<String, FulfilmentError> {
        let profile = self
            .profiles
            .profile_of(courier)
            .await?
            .filter(|profile| profile.role == Role::Delivery)
            .ok_or(FulfilmentError::NotCourier(courier))?;
        profile
            .address
            .filter(|address| !address.trim().is_empty())
            .ok_or(FulfilmentError::NoDistrict(courier))
    }

    async fn page_of(
        &self,
        filter: OrderFilter,
        page: usize,
        limit: usize,
    ) -> Result<OrderPage, FulfilmentError> {
        let page = page.max(1);
        let result = self
            .orders
            .list(Query::new(filter).descending().page(page, limit))
            .await?;

        let parties = result
            .items
            .iter()
            .flat_map(|order| [order.buyer, order.seller]);
        let profiles = self.profiles.profiles_of(parties).await?;

        Ok(OrderPage {
            total_pages: total_pages(result.total, limit),
            total: result.total,
            page,
            items: result
                .items
                .into_iter()
                .map(|order| OrderView {
                    buyer: profiles.get(&order.buyer).cloned(),
                    seller: profiles.get(&order.seller).cloned(),
                    order,
                })
                .collect(),
        })
    }
}

use super::{discounted, CouponId, OrderId, ProductId, Role, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Pickup,
    Delivering,
    Completed,
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Pickup,
        OrderStatus::Delivering,
        OrderStatus::Completed,
        OrderStatus::Canceled,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Canceled)
    }

    /// Whether `role` may move an order from `self` to `to`.
    ///
    /// Sellers accept or reject new orders and may still cancel a confirmed
    /// one; couriers carry a confirmed order through to completion.
    pub fn allows(self, to: OrderStatus, role: Role) -> bool {
        use OrderStatus::*;
        match role {
            Role::User => matches!(
                (self, to),
                (Pending, Confirmed) | (Pending, Canceled) | (Confirmed, Canceled)
            ),
            Role::Delivery => matches!(
                (self, to),
                (Confirmed, Pickup) | (Pickup, Delivering) | (Delivering, Completed)
            ),
        }
    }

    /// The statuses `role` can move to from here.
    pub fn next_for(self, role: Role) -> Vec<OrderStatus> {
        Self::ALL
            .into_iter()
            .filter(|to| self.allows(*to, role))
            .collect()
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.to_string() == s)
            .ok_or_else(|| format!("unknown order status: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Refunded,
}

/// Snapshot of one cart line at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: ProductId,
    pub quantity: u32,
    pub price: u64,
    pub discount: u8,
}

impl OrderItem {
    pub fn total(&self) -> u64 {
        discounted(self.price, self.discount) * u64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub full_name: String,
    /// District the courier delivers to.
    pub address: String,
    pub phone_number: String,
    pub note: Option<String>,
}

impl ShippingDetails {
    /// Name of the first required field left blank.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("full name", &self.full_name),
            ("address", &self.address),
            ("phone number", &self.phone_number),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub buyer: UserId,
    pub seller: UserId,
    pub items: Vec<OrderItem>,
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
    pub coupon: Option<CouponId>,
    pub shipping: ShippingDetails,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub buyer: UserId,
    pub seller: UserId,
    pub items: Vec<OrderItem>,
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
    pub coupon: Option<CouponId>,
    pub shipping: ShippingDetails,
}

/// Shipping corrections, accepted while the order is still pending.
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    pub shipping: ShippingDetails,
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub buyer: Option<UserId>,
    pub seller: Option<UserId>,
    pub status: Option<OrderStatus>,
    pub exclude_status: Option<OrderStatus>,
    /// Exact match on the shipping address.
    pub district: Option<String>,
    pub placed_on: Option<NaiveDate>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        self.buyer.is_none_or(|buyer| buyer == order.buyer)
            && self.seller.is_none_or(|seller| seller == order.seller)
            && self.status.is_none_or(|status| status == order.status)
            && self.exclude_status != Some(order.status)
            && self
                .district
                .as_ref()
                .is_none_or(|district| *district == order.shipping.address)
            && self
                .placed_on
                .is_none_or(|day| day == order.created_at.date_naive())
    }
}

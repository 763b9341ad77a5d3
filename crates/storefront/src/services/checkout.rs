//! Turning one seller's share of the cart into an order.

use super::cart::{CartService, CartServiceError};
use super::coupon::CouponService;
use crate::cart_actor::CartError;
use crate::clients::{CartClient, OrderClient, RecordClient, WalletClient};
use crate::coupon_actor::CouponError;
use crate::model::{
    percent_of, Order, OrderCreate, OrderId, OrderItem, ShippingDetails, UserId,
};
use crate::order_actor::OrderError;
use crate::wallet_actor::WalletError;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Please fill in the {0}")]
    MissingShipping(&'static str),

    #[error("Your cart has nothing from seller {0}")]
    EmptyCart(UserId),

    #[error("Invalid coupon code: {0}")]
    UnknownCoupon(String),

    #[error("Insufficient balance: {required} coins required, {available} available")]
    InsufficientBalance { required: u64, available: u64 },

    #[error("Order {order} was placed but the cart could not be cleared: {source}")]
    CartNotCleared { order: OrderId, source: CartError },

    #[error(transparent)]
    Cart(#[from] CartServiceError),

    #[error(transparent)]
    Coupon(#[from] CouponError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub buyer: UserId,
    pub seller: UserId,
    pub shipping: ShippingDetails,
    pub coupon_code: Option<String>,
}

#[derive(Clone)]
pub struct CheckoutService {
    cart: CartService,
    cart_rows: CartClient,
    coupons: CouponService,
    wallets: WalletClient,
    orders: OrderClient,
}

impl CheckoutService {
    pub fn new(
        cart: CartService,
        cart_rows: CartClient,
        coupons: CouponService,
        wallets: WalletClient,
        orders: OrderClient,
    ) -> Self {
        Self {
            cart,
            cart_rows,
            coupons,
            wallets,
            orders,
        }
    }

    /// Places the order for everything the buyer has from `seller`.
    ///
    /// The wallet is charged and stock taken by the order table while the
    /// order is created; the cart rows are deleted afterwards.
    #[instrument(skip(self, request), fields(buyer = %request.buyer, seller = %request.seller))]
    pub async fn place_order(&self, request: CheckoutRequest) -> Result<Order, CheckoutError> {
        if let Some(field) = request.shipping.missing_field() {
            return Err(CheckoutError::MissingShipping(field));
        }

        let cart = self
            .cart
            .cart_for(request.buyer, request.seller)
            .await?
            .ok_or(CheckoutError::EmptyCart(request.seller))?;

        let coupon = match request.coupon_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => Some(
                self.coupons
                    .lookup(code)
                    .await?
                    .ok_or_else(|| CheckoutError::UnknownCoupon(code.to_string()))?,
            ),
            _ => None,
        };

        let subtotal = cart.total;
        let discount = coupon
            .as_ref()
            .map_or(0, |coupon| percent_of(subtotal, coupon.percent));
        let total = subtotal - discount;
        debug!(subtotal, discount, total, "Order priced");

        let available = self.wallets.balance_of(request.buyer).await?;
        if available < total {
            return Err(CheckoutError::InsufficientBalance {
                required: total,
                available,
            });
        }

        let items = cart
            .lines
            .iter()
            .map(|line| OrderItem {
                product: line.product.id,
                quantity: line.quantity,
                price: line.product.price,
                discount: line.product.discount,
            })
            .collect();

        let id = self
            .orders
            .create_order(OrderCreate {
                buyer: request.buyer,
                seller: request.seller,
                items,
                subtotal,
                discount,
                total,
                coupon: coupon.map(|coupon| coupon.id),
                shipping: request.shipping,
            })
            .await?;

        for item in cart.item_ids() {
            if let Err(source) = self.cart_rows.delete(item).await {
                warn!(order = %id, %item, error = %source, "Cart row left behind");
                return Err(CheckoutError::CartNotCleared { order: id, source });
            }
        }

        info!(order = %id, total, "Order placed");
        Ok(self.orders.fetch(id).await?)
    }
}

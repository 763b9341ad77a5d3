use super::{OrderAction, OrderContext, OrderError, StatusChange};
use crate::model::{
    Order, OrderCreate, OrderFilter, OrderId, OrderItem, OrderStatus, OrderUpdate, PaymentStatus,
    Role,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use record_store::Record;
use tracing::{info, warn};

fn check_totals(params: &OrderCreate) -> Result<(), OrderError> {
    if params.items.is_empty() {
        return Err(OrderError::Invalid("an order needs at least one item".into()));
    }
    if params.items.iter().any(|item| item.quantity == 0) {
        return Err(OrderError::Invalid("item quantities must be positive".into()));
    }
    if params.buyer == params.seller {
        return Err(OrderError::Invalid("sellers cannot buy their own products".into()));
    }
    let subtotal: u64 = params.items.iter().map(OrderItem::total).sum();
    if subtotal != params.subtotal {
        return Err(OrderError::Invalid(format!(
            "subtotal {} does not match items ({subtotal})",
            params.subtotal
        )));
    }
    if params.discount > params.subtotal || params.total != params.subtotal - params.discount {
        return Err(OrderError::Invalid(format!(
            "total {} does not equal subtotal {} minus discount {}",
            params.total, params.subtotal, params.discount
        )));
    }
    if let Some(field) = params.shipping.missing_field() {
        return Err(OrderError::Invalid(format!("{field} is required")));
    }
    Ok(())
}

impl Order {
    /// Puts back stock taken for `items`, logging anything that fails.
    async fn restore_items(&self, items: &[OrderItem], ctx: &OrderContext) {
        for item in items {
            if let Err(e) = ctx.products.restore_stock(item.product, item.quantity).await {
                warn!(order = %self.id, product = %item.product, error = %e, "Stock restore failed");
            }
        }
    }

    async fn apply_transition(
        &mut self,
        change: StatusChange,
        ctx: &OrderContext,
    ) -> Result<OrderStatus, OrderError> {
        let from = self.status;
        if !from.allows(change.to, change.role) {
            return Err(OrderError::TransitionNotAllowed {
                from,
                to: change.to,
                role: change.role,
            });
        }
        if change.role == Role::User && change.by != self.seller {
            return Err(OrderError::NotSeller(change.by));
        }

        match change.to {
            OrderStatus::Canceled => {
                for item in &self.items {
                    ctx.products.restore_stock(item.product, item.quantity).await?;
                }
                ctx.wallets.credit(self.buyer, self.total).await?;
                self.payment_status = PaymentStatus::Refunded;
            }
            OrderStatus::Completed => {
                ctx.wallets.credit(self.seller, self.total).await?;
            }
            _ => {}
        }

        self.status = change.to;
        info!(order = %self.id, %from, to = %change.to, by = %change.by, "Order status changed");
        Ok(from)
    }
}

#[async_trait]
impl Record for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Filter = OrderFilter;
    type SortKey = DateTime<Utc>;
    type Action = OrderAction;
    type ActionResult = OrderStatus;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        check_totals(&params)?;
        Ok(Order {
            id,
            buyer: params.buyer,
            seller: params.seller,
            items: params.items,
            subtotal: params.subtotal,
            discount: params.discount,
            total: params.total,
            coupon: params.coupon,
            shipping: params.shipping,
            payment_status: PaymentStatus::Paid,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        })
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        filter.matches(self)
    }

    fn sort_key(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Charges the buyer, then takes stock item by item. If any item cannot
    /// be taken, stock already taken is put back and the buyer refunded
    /// before the order is rejected.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        ctx.wallets.debit(self.buyer, self.total).await?;

        for (taken, item) in self.items.iter().enumerate() {
            if let Err(e) = ctx
                .products
                .decrement_stock(item.product, item.quantity)
                .await
            {
                warn!(order = %self.id, product = %item.product, error = %e, "Stock decrement failed, rolling back");
                self.restore_items(&self.items[..taken], ctx).await;
                if let Err(refund) = ctx.wallets.credit(self.buyer, self.total).await {
                    warn!(order = %self.id, error = %refund, "Refund after failed order failed");
                }
                return Err(OrderError::Stock(e));
            }
        }
        Ok(())
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &OrderContext) -> Result<(), Self::Error> {
        if self.status != OrderStatus::Pending {
            return Err(OrderError::NotEditable(self.status));
        }
        if let Some(field) = update.shipping.missing_field() {
            return Err(OrderError::Invalid(format!("{field} is required")));
        }
        self.shipping = update.shipping;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<OrderStatus, Self::Error> {
        match action {
            OrderAction::Transition(change) => self.apply_transition(change, ctx).await,
        }
    }
}

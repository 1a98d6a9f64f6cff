//! [`ActorEntity`] implementation for [`Order`], including the checkout saga.

use super::actions::{OrderAction, StatusAuthority};
use super::status::{self, Step};
use crate::clients::{CartClient, MenuClient, VendorClient};
use crate::model::{
    round2, Cart, Money, Order, OrderCreate, OrderId, OrderItem, OrderStatus, OrderUpdate,
    PaymentStatus, Role, UserId, VendorId,
};
use crate::model::money::{checked_sum, line_total};
use crate::order_actor::OrderError;
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info, warn};

/// Everything checkout needs from the rest of the system.
#[derive(Clone)]
pub struct OrderContext {
    pub carts: CartClient,
    pub menu: MenuClient,
    pub vendors: VendorClient,
    /// Fraction of the subtotal charged as tax.
    pub tax_rate: Money,
}

fn out_of_range(what: &str) -> OrderError {
    OrderError::ValidationError(format!("{what} is out of range"))
}

fn require_text(field: &str, value: &str) -> Result<(), OrderError> {
    if value.trim().is_empty() {
        return Err(OrderError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}

impl Order {
    /// Prices the cart into this order. Leaves `self` untouched on error.
    async fn price_cart(&mut self, cart: &Cart, ctx: &OrderContext) -> Result<(), OrderError> {
        let mut items = Vec::with_capacity(cart.items.len());
        for line in &cart.items {
            let dish = ctx.menu.find_menu_item(line.menu_item_id).await?;
            if dish.vendor_id != cart.vendor_id || !dish.is_available {
                return Err(OrderError::ValidationError(format!(
                    "{} is no longer available",
                    dish.name
                )));
            }
            let total_item_price = line_total(dish.price, line.quantity)
                .ok_or_else(|| out_of_range(&format!("line total for {}", dish.name)))?;
            items.push(OrderItem {
                menu_item_id: dish.id,
                name: dish.name,
                price: dish.price,
                quantity: line.quantity,
                total_item_price,
            });
        }
        let vendor = ctx.vendors.find_vendor(cart.vendor_id).await?;

        let total_amount = checked_sum(items.iter().map(|item| item.total_item_price))
            .ok_or_else(|| out_of_range("totalAmount"))?;
        let tax_amount = total_amount
            .checked_mul(ctx.tax_rate)
            .map(round2)
            .ok_or_else(|| out_of_range("taxAmount"))?;
        let discount_amount = Money::ZERO;
        let final_amount = checked_sum([total_amount, vendor.delivery_fee, tax_amount])
            .and_then(|amount| amount.checked_sub(discount_amount))
            .ok_or_else(|| out_of_range("finalAmount"))?;

        self.vendor_id = vendor.id;
        self.items = items;
        self.total_amount = total_amount;
        self.delivery_fee = vendor.delivery_fee;
        self.tax_amount = tax_amount;
        self.discount_amount = discount_amount;
        self.final_amount = final_amount;
        Ok(())
    }

    fn check_owner(&self, user_id: UserId) -> Result<(), OrderError> {
        if user_id != self.user_id {
            return Err(OrderError::Forbidden(format!(
                "{} was not placed by {user_id}",
                self.id
            )));
        }
        Ok(())
    }

    /// Sets `next` and the timestamp it implies.
    fn apply(&mut self, next: OrderStatus, reason: Option<String>, actor: Role) {
        let now = Utc::now();
        match next {
            OrderStatus::Delivered => self.delivered_at = Some(now),
            OrderStatus::Completed => self.completed_at = Some(now),
            OrderStatus::Cancelled => {
                self.cancelled_at = Some(now);
                self.cancel_reason = Some(
                    reason.unwrap_or_else(|| status::default_cancel_reason(actor).to_string()),
                );
            }
            _ => {}
        }
        info!(id = %self.id, from = %self.order_status, to = %next, "Order status changed");
        self.order_status = next;
        self.updated_at = now;
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = OrderContext;
    type Error = OrderError;

    /// Checks the delivery details. Items and amounts are filled in by `on_create`.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        require_text("deliveryAddress", &params.delivery_address)?;
        require_text("contactPhone", &params.contact_phone)?;
        let now = Utc::now();
        Ok(Self {
            id,
            user_id: params.user_id,
            vendor_id: VendorId(0),
            items: Vec::new(),
            total_amount: Money::ZERO,
            delivery_fee: Money::ZERO,
            tax_amount: Money::ZERO,
            discount_amount: Money::ZERO,
            final_amount: Money::ZERO,
            delivery_address: params.delivery_address,
            contact_phone: params.contact_phone,
            special_instructions: params.special_instructions.filter(|s| !s.trim().is_empty()),
            payment_method: params.payment_method,
            payment_status: PaymentStatus::Pending,
            order_status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
            delivered_at: None,
            completed_at: None,
            cancelled_at: None,
            cancel_reason: None,
        })
    }

    /// Checkout saga: take the cart, snapshot it, restore the cart on failure.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        let cart = match ctx.carts.take_cart(self.user_id).await? {
            Some(cart) if !cart.items.is_empty() => cart,
            _ => return Err(OrderError::ValidationError("empty cart".to_string())),
        };

        let Err(failure) = self.price_cart(&cart, ctx).await else {
            info!(
                id = %self.id,
                user_id = %self.user_id,
                vendor_id = %self.vendor_id,
                lines = self.items.len(),
                final_amount = %self.final_amount,
                "Checkout complete"
            );
            return Ok(());
        };

        warn!(id = %self.id, user_id = %self.user_id, error = %failure, "Checkout failed, restoring cart");
        if let Err(restore) = ctx.carts.restore(cart).await {
            error!(user_id = %self.user_id, error = %restore, "Cart restore failed");
            return Err(OrderError::Inconsistent(format!(
                "checkout failed ({failure}) and the cart of {} could not be restored ({restore})",
                self.user_id
            )));
        }
        Err(failure)
    }

    /// # Fields Updated
    /// - `paymentStatus`: recorded as reported, never settled here
    async fn on_update(&mut self, update: OrderUpdate, _ctx: &OrderContext) -> Result<(), Self::Error> {
        if let Some(payment_status) = update.payment_status {
            info!(id = %self.id, ?payment_status, "Payment status recorded");
            self.payment_status = payment_status;
            self.updated_at = Utc::now();
        }
        Ok(())
    }

    /// # Actions
    /// - `UpdateStatus`: admin or the order's vendor, see [`status::check_update`]
    /// - `Cancel`: the ordering user, see [`status::check_self_cancel`]
    /// - `ConfirmDelivery`: the ordering user, see [`status::check_confirm_delivery`]
    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &OrderContext,
    ) -> Result<Order, Self::Error> {
        match action {
            OrderAction::UpdateStatus { status, by, reason } => {
                let actor = match by {
                    StatusAuthority::Admin => Role::Admin,
                    StatusAuthority::Vendor(vendor_id) if vendor_id == self.vendor_id => {
                        Role::Vendor
                    }
                    StatusAuthority::Vendor(vendor_id) => {
                        return Err(OrderError::Forbidden(format!(
                            "{} does not belong to {vendor_id}",
                            self.id
                        )));
                    }
                };
                if status::check_update(self.order_status, status)? == Step::Move {
                    self.apply(status, reason, actor);
                }
            }
            OrderAction::Cancel { by, reason } => {
                self.check_owner(by)?;
                if status::check_self_cancel(self.order_status)? == Step::Move {
                    self.apply(OrderStatus::Cancelled, reason, Role::User);
                }
            }
            OrderAction::ConfirmDelivery { by } => {
                self.check_owner(by)?;
                if status::check_confirm_delivery(self.order_status)? == Step::Move {
                    self.apply(OrderStatus::Delivered, None, Role::User);
                }
            }
        }
        Ok(self.clone())
    }
}

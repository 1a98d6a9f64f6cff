//! # Order Client
//!
//! Checkout and the order lifecycle. Authorization that needs other actors (resolving a
//! vendor user to their storefront) happens here; the order actor then checks the resolved
//! identity against the order itself.
use crate::clients::VendorClient;
use crate::identity::{Caller, Principal};
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, OrderUpdate, PaymentMethod, PaymentStatus, Role};
use crate::order_actor::{OrderAction, OrderError, StatusAuthority};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Delivery details supplied at checkout. Items always come from the caller's cart.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub delivery_address: String,
    pub contact_phone: String,
    pub payment_method: PaymentMethod,
    pub special_instructions: Option<String>,
}

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    vendors: VendorClient,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, vendors: VendorClient) -> Self {
        Self { inner, vendors }
    }

    /// Converts the caller's cart into an order. On success the cart is gone.
    ///
    /// # Errors
    /// - `ValidationError` for missing delivery details or an empty cart
    /// - `Internal` (`Inconsistent`) if checkout failed and the cart could not be restored
    #[instrument(skip(self, request))]
    pub async fn checkout(
        &self,
        caller: &Caller,
        request: CheckoutRequest,
    ) -> Result<Order, OrderError> {
        let user_id = caller.require()?.user_id;
        let params = OrderCreate {
            user_id,
            delivery_address: request.delivery_address,
            contact_phone: request.contact_phone,
            payment_method: request.payment_method,
            special_instructions: request.special_instructions,
        };
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(%id, %user_id, "Order placed");
        self.fetch(id).await
    }

    /// Sets an order's status as its vendor or as an admin.
    ///
    /// `status` is the wire string; anything outside the eight known values is a
    /// `ValidationError`.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        caller: &Caller,
        id: OrderId,
        status: &str,
        reason: Option<String>,
    ) -> Result<Order, OrderError> {
        let principal = caller.require()?;
        let status: OrderStatus = status.parse().map_err(OrderError::ValidationError)?;
        let by = self.authority(principal).await?;
        self.act(id, OrderAction::UpdateStatus { status, by, reason })
            .await
    }

    /// The ordering user cancelling their own order.
    #[instrument(skip(self))]
    pub async fn cancel(
        &self,
        caller: &Caller,
        id: OrderId,
        reason: Option<String>,
    ) -> Result<Order, OrderError> {
        let by = caller.require()?.user_id;
        self.act(id, OrderAction::Cancel { by, reason }).await
    }

    #[instrument(skip(self))]
    pub async fn confirm_delivery(&self, caller: &Caller, id: OrderId) -> Result<Order, OrderError> {
        let by = caller.require()?.user_id;
        self.act(id, OrderAction::ConfirmDelivery { by }).await
    }

    /// Records a payment outcome reported by the payment provider. Admin or the order's vendor.
    #[instrument(skip(self))]
    pub async fn record_payment(
        &self,
        caller: &Caller,
        id: OrderId,
        payment_status: PaymentStatus,
    ) -> Result<Order, OrderError> {
        let principal = caller.require()?;
        let order = self.fetch(id).await?;
        match self.authority(principal).await? {
            StatusAuthority::Admin => {}
            StatusAuthority::Vendor(vendor_id) if vendor_id == order.vendor_id => {}
            StatusAuthority::Vendor(_) => {
                return Err(OrderError::Forbidden(format!("{id} belongs to another vendor")));
            }
        }
        debug!("Sending request");
        let update = OrderUpdate {
            payment_status: Some(payment_status),
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// One order, visible to its owner, its vendor and admins.
    #[instrument(skip(self))]
    pub async fn get_order(&self, caller: &Caller, id: OrderId) -> Result<Order, OrderError> {
        let principal = caller.require()?;
        let order = self.fetch(id).await?;
        if order.user_id == principal.user_id || principal.is_admin() {
            return Ok(order);
        }
        let owns_vendor = self
            .vendors
            .find_by_owner(principal.user_id)
            .await?
            .is_some_and(|vendor| vendor.id == order.vendor_id);
        if owns_vendor {
            Ok(order)
        } else {
            Err(OrderError::Forbidden(format!(
                "{} may not view {id}",
                principal.user_id
            )))
        }
    }

    /// The caller's orders, newest first. Anonymous callers have none.
    #[instrument(skip(self))]
    pub async fn list_for_user(&self, caller: &Caller) -> Result<Vec<Order>, OrderError> {
        let Some(principal) = caller.principal() else {
            return Ok(Vec::new());
        };
        let user_id = principal.user_id;
        let orders = self.find(move |order: &Order| order.user_id == user_id).await?;
        Ok(newest_first(orders))
    }

    /// Orders placed with the caller's storefront, newest first.
    ///
    /// # Errors
    /// `Forbidden` when the caller does not own a storefront.
    #[instrument(skip(self))]
    pub async fn list_for_vendor(&self, caller: &Caller) -> Result<Vec<Order>, OrderError> {
        let Some(principal) = caller.principal() else {
            return Ok(Vec::new());
        };
        let vendor = self
            .vendors
            .find_by_owner(principal.user_id)
            .await?
            .ok_or_else(|| OrderError::Forbidden(format!("{} has no vendor profile", principal.user_id)))?;
        let vendor_id = vendor.id;
        let orders = self
            .find(move |order: &Order| order.vendor_id == vendor_id)
            .await?;
        Ok(newest_first(orders))
    }

    async fn authority(&self, principal: &Principal) -> Result<StatusAuthority, OrderError> {
        match principal.role {
            Role::Admin => Ok(StatusAuthority::Admin),
            Role::Vendor => self
                .vendors
                .find_by_owner(principal.user_id)
                .await?
                .map(|vendor| StatusAuthority::Vendor(vendor.id))
                .ok_or_else(|| {
                    OrderError::Forbidden(format!("{} has no vendor profile", principal.user_id))
                }),
            Role::User => Err(OrderError::Forbidden(
                "only vendors and admins can update order status".to_string(),
            )),
        }
    }

    async fn act(&self, id: OrderId, action: OrderAction) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    async fn fetch(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }
}

fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    orders
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

//! # Cart Client
//!
//! The Cart Manager. Resolves dishes and vendors, then turns each cart operation into exactly
//! one message to the cart actor.
//!
//! Anonymous callers can browse: `add_item` hands back a preview flagged `requiresLogin` and
//! `get_cart` returns the empty cart. Every other operation needs a principal.
use crate::cart_actor::{CartAction, CartError};
use crate::clients::{MenuClient, VendorClient};
use crate::identity::Caller;
use crate::model::{Cart, CartCreate, CartItem, CartView, MenuItemId, UserId, VendorId, MAX_NOTES_LEN};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use chrono::TimeDelta;
use tracing::{debug, info, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
    menu: MenuClient,
    vendors: VendorClient,
    ttl: TimeDelta,
}

impl CartClient {
    pub fn new(
        inner: ResourceClient<Cart>,
        menu: MenuClient,
        vendors: VendorClient,
        ttl: TimeDelta,
    ) -> Self {
        Self {
            inner,
            menu,
            vendors,
            ttl,
        }
    }

    /// Adds `quantity` of a dish to the caller's cart.
    ///
    /// A quantity of 0 counts as 1; see [`parse_quantity`](crate::model::parse_quantity) for
    /// raw input. A dish from another vendor replaces the cart.
    ///
    /// # Errors
    /// - `NotFound` if the dish or its vendor does not exist
    /// - `ValidationError` if the dish is unavailable or the notes are too long
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        caller: &Caller,
        menu_item_id: MenuItemId,
        quantity: u32,
        notes: Option<String>,
    ) -> Result<CartView, CartError> {
        let item = self.menu.find_menu_item(menu_item_id).await?;
        if !item.is_available {
            return Err(CartError::ValidationError(format!(
                "{} is not available",
                item.name
            )));
        }
        if notes
            .as_deref()
            .is_some_and(|text| text.chars().count() > MAX_NOTES_LEN)
        {
            return Err(CartError::ValidationError(format!(
                "notes must be at most {MAX_NOTES_LEN} characters"
            )));
        }
        let vendor = self.vendors.find_vendor(item.vendor_id).await?;
        let quantity = quantity.max(1);

        let Some(principal) = caller.principal() else {
            debug!("Anonymous add, returning preview");
            let line = CartItem {
                menu_item_id,
                quantity,
                unit_price: item.price,
                display_name: item.name,
                notes,
            };
            return CartView::preview(line, Some(vendor.summary())).ok_or_else(out_of_range);
        };

        let params = CartCreate {
            vendor_id: vendor.id,
            ttl: self.ttl,
        };
        let action = CartAction::AddLine {
            vendor_id: vendor.id,
            menu_item_id,
            quantity,
            unit_price: item.price,
            display_name: item.name,
            notes,
        };
        debug!("Sending request");
        let cart = self
            .inner
            .upsert(principal.user_id, params, action)
            .await
            .map_err(Self::map_error)?;
        CartView::of(&cart, Some(vendor.summary())).ok_or_else(out_of_range)
    }

    /// Replaces a line's quantity; 0 removes it. Removing the last line deletes the cart.
    #[instrument(skip(self))]
    pub async fn set_item_quantity(
        &self,
        caller: &Caller,
        menu_item_id: MenuItemId,
        quantity: u32,
        notes: Option<String>,
    ) -> Result<CartView, CartError> {
        let user_id = caller.require()?.user_id;
        let action = CartAction::SetQuantity {
            menu_item_id,
            quantity,
            notes,
        };
        self.mutate(user_id, action).await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        caller: &Caller,
        menu_item_id: MenuItemId,
    ) -> Result<CartView, CartError> {
        let user_id = caller.require()?.user_id;
        self.mutate(user_id, CartAction::RemoveLine { menu_item_id })
            .await
    }

    /// Deletes the caller's cart. Clearing an absent cart succeeds.
    #[instrument(skip(self))]
    pub async fn clear(&self, caller: &Caller) -> Result<(), CartError> {
        let user_id = caller.require()?.user_id;
        debug!("Sending request");
        let taken = self.take_cart(user_id).await?;
        info!(%user_id, cleared = taken.is_some(), "Cart cleared");
        Ok(())
    }

    /// The caller's cart with its vendor, or the empty cart. Never `NotFound`.
    #[instrument(skip(self))]
    pub async fn get_cart(&self, caller: &Caller) -> Result<CartView, CartError> {
        let Some(principal) = caller.principal() else {
            return Ok(CartView::empty());
        };
        match self.get(principal.user_id).await? {
            Some(cart) => self.view(&cart).await,
            None => Ok(CartView::empty()),
        }
    }

    /// Removes and returns a user's cart.
    #[instrument(skip(self))]
    pub async fn take_cart(&self, user_id: UserId) -> Result<Option<Cart>, CartError> {
        debug!("Sending request");
        self.inner.take(user_id).await.map_err(Self::map_error)
    }

    /// Puts a previously taken cart back.
    ///
    /// # Errors
    /// Fails if the user has started a new cart in the meantime.
    #[instrument(skip(self, cart), fields(user_id = %cart.user_id))]
    pub async fn restore(&self, cart: Cart) -> Result<(), CartError> {
        debug!("Sending request");
        self.inner
            .insert(cart.user_id, cart)
            .await
            .map_err(Self::map_error)
    }

    async fn mutate(&self, user_id: UserId, action: CartAction) -> Result<CartView, CartError> {
        debug!("Sending request");
        let cart = self
            .inner
            .perform_action(user_id, action)
            .await
            .map_err(|e| match e {
                FrameworkError::NotFound(_) => CartError::NotFound(format!("{user_id} has no cart")),
                other => Self::map_error(other),
            })?;
        self.view(&cart).await
    }

    async fn view(&self, cart: &Cart) -> Result<CartView, CartError> {
        if cart.items.is_empty() {
            return Ok(CartView::empty());
        }
        let vendor = self.vendor_summary(cart.vendor_id).await?;
        CartView::of(cart, vendor).ok_or_else(out_of_range)
    }

    async fn vendor_summary(
        &self,
        vendor_id: VendorId,
    ) -> Result<Option<crate::model::VendorSummary>, CartError> {
        Ok(self
            .vendors
            .get(vendor_id)
            .await?
            .map(|vendor| vendor.summary()))
    }
}

fn out_of_range() -> CartError {
    CartError::ValidationError("cart total is out of range".to_string())
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast::<CartError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => CartError::NotFound(id),
            Err(other) => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

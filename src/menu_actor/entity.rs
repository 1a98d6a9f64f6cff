//! [`ActorEntity`] implementation for [`MenuItem`].

use crate::menu_actor::MenuError;
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, Money, MAX_PRICE};
use actor_framework::ActorEntity;
use async_trait::async_trait;

fn check_name(name: &str) -> Result<(), MenuError> {
    if name.trim().is_empty() {
        return Err(MenuError::ValidationError("name must not be empty".into()));
    }
    Ok(())
}

fn check_price(price: Money) -> Result<(), MenuError> {
    if price < Money::ZERO {
        return Err(MenuError::ValidationError(
            "price must not be negative".into(),
        ));
    }
    if price > MAX_PRICE {
        return Err(MenuError::ValidationError(format!(
            "price must not exceed {MAX_PRICE}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = MenuItemUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = MenuError;

    /// New items start available.
    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, Self::Error> {
        check_name(&params.name)?;
        check_price(params.price)?;
        Ok(Self {
            id,
            vendor_id: params.vendor_id,
            name: params.name,
            price: params.price,
            is_available: true,
        })
    }

    /// # Fields Updated
    /// - `name`
    /// - `price`: existing cart lines keep the price they were added at
    /// - `isAvailable`
    async fn on_update(&mut self, update: MenuItemUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = &update.name {
            check_name(name)?;
        }
        if let Some(price) = update.price {
            check_price(price)?;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(available) = update.is_available {
            self.is_available = available;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

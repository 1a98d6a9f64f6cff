//! [`ActorEntity`] implementation for [`Cart`].

use super::actions::CartAction;
use crate::cart_actor::CartError;
use crate::model::{Cart, CartCreate, CartItem, MenuItemId, UserId, MAX_NOTES_LEN};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

fn check_notes(notes: Option<&str>) -> Result<(), CartError> {
    match notes {
        Some(text) if text.chars().count() > MAX_NOTES_LEN => Err(CartError::ValidationError(
            format!("notes must be at most {MAX_NOTES_LEN} characters"),
        )),
        _ => Ok(()),
    }
}

impl Cart {
    fn line_mut(&mut self, menu_item_id: MenuItemId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.menu_item_id == menu_item_id)
    }

    fn missing_line(&self, menu_item_id: MenuItemId) -> CartError {
        CartError::NotFound(format!("{menu_item_id} is not in the cart"))
    }
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = UserId;
    type Create = CartCreate;
    type Update = ();
    type Action = CartAction;
    type ActionResult = Cart;
    type Context = ();
    type Error = CartError;

    fn from_create_params(user_id: UserId, params: CartCreate) -> Result<Self, Self::Error> {
        let now = Utc::now();
        Ok(Self {
            user_id,
            vendor_id: params.vendor_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
            ttl: params.ttl,
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    /// # Actions
    /// - `AddLine`: merge or append; a foreign vendor resets the cart first
    /// - `SetQuantity`: replace quantity, 0 removes the line
    /// - `RemoveLine`: drop one line
    ///
    /// A failed action leaves the cart as it was, including one whose total would overflow.
    async fn handle_action(&mut self, action: CartAction, _ctx: &()) -> Result<Cart, Self::Error> {
        let previous = self.clone();
        match action {
            CartAction::AddLine {
                vendor_id,
                menu_item_id,
                quantity,
                unit_price,
                display_name,
                notes,
            } => {
                check_notes(notes.as_deref())?;
                let quantity = quantity.max(1);
                if vendor_id != self.vendor_id {
                    debug!(user_id = %self.user_id, from = %self.vendor_id, to = %vendor_id, "Cart switched vendor");
                    self.items.clear();
                    self.vendor_id = vendor_id;
                    self.created_at = Utc::now();
                }
                match self.line_mut(menu_item_id) {
                    Some(line) => {
                        line.quantity = line.quantity.saturating_add(quantity);
                        if notes.is_some() {
                            line.notes = notes;
                        }
                    }
                    None => self.items.push(CartItem {
                        menu_item_id,
                        quantity,
                        unit_price,
                        display_name,
                        notes,
                    }),
                }
            }
            CartAction::SetQuantity {
                menu_item_id,
                quantity,
                notes,
            } => {
                check_notes(notes.as_deref())?;
                if quantity == 0 {
                    let before = self.items.len();
                    self.items.retain(|item| item.menu_item_id != menu_item_id);
                    if self.items.len() == before {
                        return Err(self.missing_line(menu_item_id));
                    }
                } else {
                    let missing = self.missing_line(menu_item_id);
                    let line = self.line_mut(menu_item_id).ok_or(missing)?;
                    line.quantity = quantity;
                    if notes.is_some() {
                        line.notes = notes;
                    }
                }
            }
            CartAction::RemoveLine { menu_item_id } => {
                let before = self.items.len();
                self.items.retain(|item| item.menu_item_id != menu_item_id);
                if self.items.len() == before {
                    return Err(self.missing_line(menu_item_id));
                }
            }
        }
        if self.total_amount().is_none() {
            *self = previous;
            return Err(CartError::ValidationError(
                "cart total is out of range".to_string(),
            ));
        }
        self.updated_at = Utc::now();
        Ok(self.clone())
    }

    fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|at| Utc::now() >= at)
    }

    fn is_vacant(&self) -> bool {
        self.items.is_empty()
    }
}

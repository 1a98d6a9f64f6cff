use crate::model::money::line_total;
use crate::model::{MenuItemId, Money, UserId, VendorId, VendorSummary};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Longest accepted line-item note, in characters.
pub const MAX_NOTES_LEN: usize = 200;

/// A user's shopping cart.
///
/// Keyed by the owner's [`UserId`] and tied to exactly one vendor. The total is always derived
/// from the current lines, never stored.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait. A cart is
/// vacant once its last line is gone and expires `ttl` after its last mutation; the actor drops
/// it in both cases.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user_id: UserId,
    pub vendor_id: VendorId,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub ttl: TimeDelta,
}

impl Cart {
    /// Sum of the lines, or `None` if it overflows. The cart actor never stores such a cart.
    pub fn total_amount(&self) -> Option<Money> {
        self.items.iter().try_fold(Money::ZERO, |total, item| {
            total.checked_add(line_total(item.unit_price, item.quantity)?)
        })
    }

    /// `None` when the TTL reaches past the calendar chrono can represent: never expires.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at.checked_add_signed(self.ttl)
    }
}

/// One line of a cart. Price and name are captured when the line is added.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
    pub unit_price: Money,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload for opening a cart on first add.
#[derive(Debug, Clone)]
pub struct CartCreate {
    pub vendor_id: VendorId,
    pub ttl: TimeDelta,
}

/// What `get_cart` and the cart mutations hand back.
///
/// With no cart this is `{"items": [], "totalAmount": 0}`. Anonymous add-to-cart previews set
/// `requiresLogin`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total_amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<VendorSummary>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub requires_login: bool,
}

impl CartView {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_amount: Money::ZERO,
            vendor: None,
            requires_login: false,
        }
    }

    /// `None` if the cart total overflows.
    pub fn of(cart: &Cart, vendor: Option<VendorSummary>) -> Option<Self> {
        Some(Self {
            items: cart.items.clone(),
            total_amount: cart.total_amount()?,
            vendor,
            requires_login: false,
        })
    }

    pub fn preview(item: CartItem, vendor: Option<VendorSummary>) -> Option<Self> {
        Some(Self {
            total_amount: line_total(item.unit_price, item.quantity)?,
            items: vec![item],
            vendor,
            requires_login: true,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Parses a raw quantity field. Anything that is not a positive integer counts as 1.
pub fn parse_quantity(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(id: u32, price: Decimal, quantity: u32) -> CartItem {
        CartItem {
            menu_item_id: MenuItemId(id),
            quantity,
            unit_price: price,
            display_name: format!("dish {id}"),
            notes: None,
        }
    }

    #[test]
    fn total_is_sum_of_price_times_quantity() {
        let now = Utc::now();
        let cart = Cart {
            user_id: UserId(1),
            vendor_id: VendorId(1),
            items: vec![
                item(1, Decimal::new(1250, 2), 2),
                item(2, Decimal::new(399, 2), 3),
            ],
            created_at: now,
            updated_at: now,
            ttl: TimeDelta::days(7),
        };
        assert_eq!(cart.total_amount(), Some(Decimal::new(3697, 2)));
        assert_eq!(
            CartView::of(&cart, None).map(|view| view.total_amount),
            cart.total_amount()
        );
    }

    #[test]
    fn quantity_defaults_to_one() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity(" 2 "), 2);
        assert_eq!(parse_quantity("abc"), 1);
        assert_eq!(parse_quantity("0"), 1);
        assert_eq!(parse_quantity("-4"), 1);
        assert_eq!(parse_quantity(""), 1);
    }

    #[test]
    fn empty_view_shape() {
        let json = serde_json::to_value(CartView::empty()).unwrap();
        assert_eq!(json, serde_json::json!({ "items": [], "totalAmount": 0.0 }));
    }

    #[test]
    fn preview_requires_login() {
        let view = CartView::preview(item(4, Decimal::new(500, 2), 2), None).unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["requiresLogin"], true);
        assert_eq!(json["items"][0]["menuItemId"], 4);
        assert_eq!(view.total_amount, Decimal::new(1000, 2));
    }

    #[test]
    fn overflowing_total_is_none() {
        let now = Utc::now();
        let cart = Cart {
            user_id: UserId(1),
            vendor_id: VendorId(1),
            items: vec![item(1, Decimal::MAX, 1), item(2, Decimal::MAX, 1)],
            created_at: now,
            updated_at: now,
            ttl: TimeDelta::days(7),
        };
        assert_eq!(cart.total_amount(), None);
        assert!(CartView::of(&cart, None).is_none());
        assert!(CartView::preview(item(3, Decimal::MAX, 2), None).is_none());
    }

    #[test]
    fn unrepresentable_expiry_never_expires() {
        let now = Utc::now();
        let cart = Cart {
            user_id: UserId(1),
            vendor_id: VendorId(1),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
            ttl: TimeDelta::MAX,
        };
        assert_eq!(cart.expires_at(), None);
    }
}

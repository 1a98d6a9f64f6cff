//! Custom actions for the Cart actor. Each one answers with the cart as it stands afterwards.

use crate::model::{MenuItemId, Money, VendorId};

#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds `quantity` of a dish, merging with an existing line for the same dish.
    ///
    /// A dish from a vendor other than the cart's replaces every existing line.
    AddLine {
        vendor_id: VendorId,
        menu_item_id: MenuItemId,
        quantity: u32,
        unit_price: Money,
        display_name: String,
        notes: Option<String>,
    },
    /// Replaces a line's quantity; 0 removes the line.
    SetQuantity {
        menu_item_id: MenuItemId,
        quantity: u32,
        notes: Option<String>,
    },
    RemoveLine { menu_item_id: MenuItemId },
}

use crate::model::{MenuItemId, Money, VendorId};
use serde::{Deserialize, Serialize};

/// A dish on a vendor's menu. Prices here are live; orders copy them at checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub vendor_id: VendorId,
    pub name: String,
    pub price: Money,
    pub is_available: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub vendor_id: VendorId,
    pub name: String,
    pub price: Money,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub is_available: Option<bool>,
}

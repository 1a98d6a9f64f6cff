//! Custom actions for the Order actor. Each one answers with the order as it stands afterwards.

use crate::model::{OrderStatus, UserId, VendorId};

/// Who is setting an order's status directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAuthority {
    Admin,
    /// The vendor profile the acting user owns.
    Vendor(VendorId),
}

#[derive(Debug, Clone)]
pub enum OrderAction {
    UpdateStatus {
        status: OrderStatus,
        by: StatusAuthority,
        reason: Option<String>,
    },
    /// The ordering user cancelling.
    Cancel { by: UserId, reason: Option<String> },
    /// The ordering user confirming receipt.
    ConfirmDelivery { by: UserId },
}

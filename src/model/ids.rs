//! Type-safe identifiers.
//!
//! Every ID wraps the `u32` handed out by its actor and displays with a resource prefix
//! (`user_1`, `order_7`, ...). On the wire they serialize as the bare number.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

entity_id!(
    /// Identifies a user. Carts are keyed by their owner's `UserId`.
    UserId,
    "user"
);
entity_id!(VendorId, "vendor");
entity_id!(MenuItemId, "item");
entity_id!(OrderId, "order");
entity_id!(ReservationId, "reservation");

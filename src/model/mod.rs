//! Pure data structures managed by the actors, plus the DTOs that create and update them.
//!
//! Everything here serializes with camelCase field names; enum values use the lowercase
//! (or snake_case) strings callers already depend on.

pub mod cart;
pub mod ids;
pub mod menu;
pub mod money;
pub mod order;
pub mod reservation;
pub mod user;
pub mod vendor;

pub use cart::*;
pub use ids::*;
pub use menu::*;
pub use money::{round2, Money, MAX_PRICE};
pub use order::*;
pub use reservation::*;
pub use user::*;
pub use vendor::*;

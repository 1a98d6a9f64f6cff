//! Typed clients over each actor's [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Every public operation takes the [`Caller`](crate::identity::Caller) it runs for and returns
//! the actor's own error type.

pub mod cart_client;
pub mod menu_client;
pub mod order_client;
pub mod reservation_client;
pub mod user_client;
pub mod vendor_client;

pub use cart_client::*;
pub use menu_client::*;
pub use order_client::*;
pub use reservation_client::*;
pub use user_client::*;
pub use vendor_client::*;

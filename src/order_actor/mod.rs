//! # Order Actor
//!
//! Orders are created only by checkout and never deleted.
//!
//! ## Checkout
//!
//! `Order::on_create` runs the whole checkout as a saga:
//!
//! 1. Take the owner's cart out of the cart actor
//! 2. Price every line at the current menu price and add the vendor's delivery fee and tax
//! 3. On any failure, put the cart back
//!
//! The order is stored only if every step succeeds. A cart that cannot be put back surfaces as
//! [`OrderError::Inconsistent`].
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`status`] - pure transition rules
//! - [`actions`] - [`OrderAction`]
//! - [`error`] - [`OrderError`]

pub mod actions;
pub mod entity;
pub mod error;
pub mod status;

pub use actions::*;
pub use entity::OrderContext;
pub use error::*;

use crate::model::Order;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client. Run it with an [`OrderContext`].
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}

//! # Menu Actor
//!
//! Menu items with live prices and an availability flag. Carts copy the price when a line is
//! added; checkout re-reads it for the order snapshot.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`MenuItem`]
//! - [`error`] - [`MenuError`]

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::MenuItem;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Menu actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<MenuItem>, ResourceClient<MenuItem>) {
    ResourceActor::new(buffer_size)
}

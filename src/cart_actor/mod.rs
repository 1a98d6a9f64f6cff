//! # Cart Actor
//!
//! One cart per user, keyed by the owner's [`UserId`](crate::model::UserId). Every mutation is a
//! single actor message, so two concurrent adds of the same dish both land.
//!
//! ## Lifecycle
//!
//! - Opened by the first [`CartAction::AddLine`] through `upsert`
//! - Reset when a line from a different vendor arrives
//! - Dropped by the actor when its last line goes ([`is_vacant`](actor_framework::ActorEntity::is_vacant))
//! - Evicted lazily once `ttl` has passed since the last mutation
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Cart`]
//! - [`actions`] - [`CartAction`]
//! - [`error`] - [`CartError`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Cart;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(buffer_size)
}

//! # User Actor
//!
//! The identity directory: name, email and role for every account. Reservations read the
//! user's name from here when they are booked.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`User`]
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::User;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, ResourceClient<User>) {
    ResourceActor::new(buffer_size)
}

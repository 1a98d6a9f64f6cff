//! # Reservation Actor
//!
//! Table bookings. The actor never counts bookings itself: creating a reservation claims its
//! slot from the vendor actor, and moving to `rejected` or `cancelled` releases it.
//!
//! ## Status Rules
//!
//! | From \ By            | owning vendor                     | booking user      |
//! |----------------------|-----------------------------------|-------------------|
//! | `pending`            | `confirmed`, `rejected`, `completed` | `cancelled`    |
//! | `confirmed`          | `confirmed`, `rejected`, `completed` | `cancelled`    |
//! | `rejected`, `cancelled`, `completed` | none                 | none              |
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Reservation`]
//! - [`actions`] - [`ReservationAction`]
//! - [`error`] - [`ReservationError`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Reservation;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Reservation actor and its client.
///
/// Run it with a [`VendorClient`](crate::clients::VendorClient) as context.
pub fn new(buffer_size: usize) -> (ResourceActor<Reservation>, ResourceClient<Reservation>) {
    ResourceActor::new(buffer_size)
}

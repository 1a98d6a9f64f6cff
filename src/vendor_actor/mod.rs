//! # Vendor Actor
//!
//! Vendor profiles: ownership, delivery fee, weekly availability, and the live booking count
//! for every reservation slot.
//!
//! ## Slot Capacity
//!
//! Reservations never count their siblings. They ask this actor to claim a slot: the
//! availability check and the counter increment run inside one message, so
//! `maxOrdersPerSlot` is a hard ceiling even under concurrent bookings.
//!
//! ```rust,ignore
//! let booked = vendor_client.claim_slot(vendor_id, date, "12:00").await?;
//! vendor_client.release_slot(vendor_id, date, "12:00").await?;
//! ```
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`VendorProfile`]
//! - [`actions`] - [`VendorAction`] and [`VendorActionResult`]
//! - [`error`] - [`VendorError`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::VendorProfile;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Vendor actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<VendorProfile>, ResourceClient<VendorProfile>) {
    ResourceActor::new(buffer_size)
}

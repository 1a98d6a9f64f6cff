//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract every resource (cart, order, reservation, ...)
//! implements to be managed by the generic `ResourceActor`. It names the associated types for
//! IDs, payloads, actions, context and errors, and provides the lifecycle hooks the actor calls
//! while it owns the entity.
//!
//! # Provided Methods (Hooks)
//! Hooks with default implementations:
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::is_expired`]
//! - [`ActorEntity::is_vacant`]
//!
//! The defaults do nothing (`Ok(())` / `false`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are `async` so they can call other actors. The `Context` type is injected into every
/// hook when the actor starts (`run(context)`), not when it is constructed, which lets actors
/// depend on each other's clients without construction-order cycles.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `ClaimSlot`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per message: callers match on a single type, at the
    /// cost of every operation nominally being able to return every variant.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is built and before it is stored.
    /// An error here aborts the create; nothing is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    // --- Store Hooks (Sync) ---

    /// Passive time-to-live. An expired entity is evicted the next time the actor touches it
    /// and is treated as absent by that request.
    fn is_expired(&self) -> bool {
        false
    }

    /// Checked after every successful mutation. A vacant entity is removed from the store.
    fn is_vacant(&self) -> bool {
        false
    }
}

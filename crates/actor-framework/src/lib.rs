//! # Actor Framework
//!
//! Building blocks for type-safe, concurrent actor systems on Tokio. Each resource type gets one
//! [`ResourceActor`] that owns every instance of that resource in a private store and processes
//! requests one at a time; callers talk to it through a cloneable [`ResourceClient`].
//!
//! ## Why ROA + Actor Model?
//!
//! - **Resource-Oriented**: every actor speaks the same request vocabulary (create, get, update,
//!   delete, take, insert, upsert, query, action), so clients look alike across resources.
//! - **Actor Model**: state is never shared. Per-resource invariants such as "a slot never holds
//!   more bookings than its capacity" hold because a single task applies every mutation.
//!
//! When resources must coordinate (a reservation claiming vendor capacity, an order draining a
//! cart) they do it through **Action messages** sent from inside entity hooks, using clients
//! injected as the entity's `Context`.
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model)
//! - [Actors with Tokio](https://ryhl.io/blog/actors-with-tokio/)
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - domain state and lifecycle hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - message loop and store
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed requests
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Counter {
//!     id: u32,
//!     hits: u32,
//! }
//!
//! #[derive(Debug)] struct CounterCreate;
//! #[derive(Debug)] struct CounterReset;
//! #[derive(Debug)] enum CounterAction { Hit }
//! #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
//!
//! #[async_trait]
//! impl ActorEntity for Counter {
//!     type Id = u32;
//!     type Create = CounterCreate;
//!     type Update = CounterReset;
//!     type Action = CounterAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = CounterError;
//!
//!     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, hits: 0 })
//!     }
//!
//!     async fn on_update(&mut self, _: CounterReset, _: &()) -> Result<(), Self::Error> {
//!         self.hits = 0;
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u32, Self::Error> {
//!         self.hits += 1;
//!         Ok(self.hits)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Counter>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     // Keyed upsert: created on first use, then the action runs
//!     let hits = client.upsert(7, CounterCreate, CounterAction::Hit).await.unwrap();
//!     assert_eq!(hits, 1);
//!     let hits = client.upsert(7, CounterCreate, CounterAction::Hit).await.unwrap();
//!     assert_eq!(hits, 2);
//!
//!     let busy = client.query(|c: &Counter| c.hits > 1).await.unwrap();
//!     assert_eq!(busy.len(), 1);
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected when the loop starts, not at construction:
//!
//! ```rust,ignore
//! let (vendor_actor, vendor_client) = vendor_actor::new(buffer);
//! let (reservation_actor, reservation_client) = reservation_actor::new(buffer);
//!
//! tokio::spawn(vendor_actor.run(()));
//! // Reservations claim slot capacity through the vendor actor
//! tokio::spawn(reservation_actor.run(vendor_client.clone()));
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor (no locks)
//! - Different actors run in **parallel**
//! - A hook awaiting another actor holds up only its own actor; the dependency graph must stay
//!   acyclic or the two actors can deadlock waiting on each other
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient<T>` from scripted expectations so an actor
//! can be tested against mocked neighbours. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};

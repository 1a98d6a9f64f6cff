//! # System Lifecycle
//!
//! Starting, wiring and stopping the actors.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive them when they start
//! (`run(context)`):
//!
//! ```rust,ignore
//! impl ActorEntity for Reservation {
//!     type Context = VendorClient;
//! }
//!
//! impl ActorEntity for Order {
//!     type Context = OrderContext; // carts, menu, vendors, tax rate
//! }
//! ```
//!
//! Context clients are clones. The dependency graph is acyclic (orders and reservations point
//! at the catalog, never back), so each actor stops once its own channel closes and
//! [`MarketSystem::shutdown`] needs no explicit shutdown message.

pub mod market_system;
pub mod tracing;

pub use self::market_system::*;
pub use self::tracing::setup_tracing;

//! # Food Market
//!
//! The core of a food-ordering marketplace: carts, checkout, the order lifecycle and table
//! reservations against vendor schedules.
//!
//! Each entity type lives in its own [`ResourceActor`](actor_framework::ResourceActor) task, so
//! every mutation of a cart, order, reservation or vendor is applied one message at a time.
//!
//! ## Architecture Notes
//!
//! ### 1. Error Classification
//! Each actor has its own `thiserror` enum. Dependent actors wrap their dependencies' errors
//! with `#[from]`, and every enum implements [`Classify`](error::Classify), which reduces it to
//! one of the stable codes in [`ErrorKind`](error::ErrorKind).
//!
//! ### 2. Cart to Order in One Step
//! Checkout runs inside the order actor's create hook: it takes the cart, snapshots it at
//! current menu prices, and puts the cart back if anything fails. See [`order_actor`].
//!
//! ### 3. Slot Capacity
//! The vendor actor keeps a booking count per slot next to the schedule. Checking a slot with
//! [`availability::is_slot_available`] and taking a place in it happen in the same message, so
//! `maxOrdersPerSlot` is a hard ceiling. See [`vendor_actor`].
//!
//! ### 4. Observability
//! `tracing` everywhere; see [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! - [`model`]: data shapes and their wire names
//! - [`availability`]: the pure slot evaluator
//! - [`identity`]: callers, principals and trusted internal callers
//! - [`user_actor`], [`vendor_actor`], [`menu_actor`], [`cart_actor`], [`order_actor`],
//!   [`reservation_actor`]: the entities
//! - [`clients`]: the typed API the rest of an application calls
//! - [`lifecycle`]: [`MarketSystem`](lifecycle::MarketSystem) starts and stops everything
//! - [`config`]: [`MarketConfig`](config::MarketConfig), from flags, environment or `.env`
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run -- --tax-rate 0.08
//! ```

pub mod availability;
pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod reservation_actor;
pub mod user_actor;
pub mod vendor_actor;

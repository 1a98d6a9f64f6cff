//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`.
//! Actors log with an `entity_type` field instead of module paths, so targets are hidden.
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle and one line per mutation
//! RUST_LOG=debug cargo run    # adds request payloads and slot counters
//! ```
//!
//! A checkout at `info` reads roughly:
//!
//! ```text
//! INFO checkout: Taken entity_type="Cart" id=user_1 size=0
//! INFO checkout: Checkout complete id=order_1 user_id=user_1 vendor_id=vendor_1 lines=2 final_amount=31.30
//! INFO checkout: Created entity_type="Order" id=order_1 size=1
//! INFO checkout: Order placed id=order_1 user_id=user_1
//! ```

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

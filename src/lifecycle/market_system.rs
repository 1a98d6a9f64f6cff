use crate::clients::{
    CartClient, MenuClient, OrderClient, ReservationClient, UserClient, VendorClient,
};
use crate::config::MarketConfig;
use crate::identity::{GateError, InternalGate, TrustedCaller};
use crate::order_actor::OrderContext;
use tracing::{error, info};

/// The running marketplace: one actor per entity type, wired together.
///
/// # Architecture
///
/// - **User Actor**: identity directory
/// - **Vendor Actor**: storefronts, schedules and the reservation slot ledger
/// - **Menu Actor**: dishes and live prices
/// - **Cart Actor**: one cart per user
/// - **Order Actor**: checkout saga and the status machine; depends on carts, menu and vendors
/// - **Reservation Actor**: bookings; claims and releases slots through the vendor actor
///
/// Dependencies only point from orders and reservations towards the catalog, so dropping the
/// clients held here shuts everything down.
///
/// # Example
///
/// ```ignore
/// let system = MarketSystem::new(&MarketConfig::default());
/// let view = system.carts.add_item(&caller, dish_id, 2, None).await?;
/// let order = system.orders.checkout(&caller, request).await?;
/// system.shutdown().await?;
/// ```
pub struct MarketSystem {
    pub users: UserClient,
    pub vendors: VendorClient,
    pub menu: MenuClient,
    pub carts: CartClient,
    pub orders: OrderClient,
    pub reservations: ReservationClient,

    gate: InternalGate,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketSystem {
    /// Spawns every actor with its context. Must be called inside a Tokio runtime.
    pub fn new(config: &MarketConfig) -> Self {
        let buffer = config.channel_buffer;

        // 1. Create actors (no dependencies)
        let (user_actor, user_inner) = crate::user_actor::new(buffer);
        let (vendor_actor, vendor_inner) = crate::vendor_actor::new(buffer);
        let (menu_actor, menu_inner) = crate::menu_actor::new(buffer);
        let (cart_actor, cart_inner) = crate::cart_actor::new(buffer);
        let (order_actor, order_inner) = crate::order_actor::new(buffer);
        let (reservation_actor, reservation_inner) = crate::reservation_actor::new(buffer);

        let users = UserClient::new(user_inner);
        let vendors = VendorClient::new(vendor_inner);
        let menu = MenuClient::new(menu_inner, vendors.clone());
        let carts = CartClient::new(cart_inner, menu.clone(), vendors.clone(), config.cart_ttl());
        let orders = OrderClient::new(order_inner, vendors.clone());
        let reservations = ReservationClient::new(reservation_inner, vendors.clone(), users.clone());

        // 2. Start actors with injected context
        let order_context = OrderContext {
            carts: carts.clone(),
            menu: menu.clone(),
            vendors: vendors.clone(),
            tax_rate: config.tax_rate,
        };
        let handles = vec![
            tokio::spawn(user_actor.run(())),
            tokio::spawn(vendor_actor.run(())),
            tokio::spawn(menu_actor.run(())),
            tokio::spawn(cart_actor.run(())),
            tokio::spawn(order_actor.run(order_context)),
            tokio::spawn(reservation_actor.run(vendors.clone())),
        ];
        info!(
            buffer,
            cart_ttl_days = config.cart_ttl_days,
            tax_rate = %config.tax_rate,
            "Market system started"
        );

        Self {
            users,
            vendors,
            menu,
            carts,
            orders,
            reservations,
            gate: InternalGate::new(config.internal_secret.clone()),
            handles,
        }
    }

    /// Exchanges the internal-caller secret for the right to act on behalf of users.
    pub fn trusted_caller(&self, secret: &str) -> Result<TrustedCaller, GateError> {
        self.gate.authorize(secret)
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Drops every client, which closes the actors' channels, then waits for each actor task.
    ///
    /// # Errors
    /// Returns an error if any actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.reservations);
        drop(self.orders);
        drop(self.carts);
        drop(self.menu);
        drop(self.vendors);
        drop(self.users);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {e:?}"));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

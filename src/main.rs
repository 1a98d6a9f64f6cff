//! Walks one customer and one vendor through the marketplace: menu setup, a cart, checkout,
//! the order lifecycle and a table booking.

use food_market::clients::{BookingRequest, CheckoutRequest};
use food_market::config::MarketConfig;
use food_market::error::Classify;
use food_market::identity::Caller;
use food_market::lifecycle::{setup_tracing, MarketSystem};
use food_market::model::{
    parse_quantity, DayAvailability, MenuItemCreate, Money, PaymentMethod, Role, UserCreate,
    VendorCreate, Weekday,
};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = MarketConfig::load().map_err(|e| e.to_string())?;
    setup_tracing();

    info!("Starting food market demo");
    let system = MarketSystem::new(&config);

    let span = tracing::info_span!("setup");
    let (customer, owner, dish_ids, vendor_id) = async {
        let customer_id = system
            .users
            .register(UserCreate {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                role: Role::User,
            })
            .await
            .map_err(|e| e.to_string())?;
        let owner_id = system
            .users
            .register(UserCreate {
                name: "Bruno".to_string(),
                email: "bruno@example.com".to_string(),
                role: Role::Vendor,
            })
            .await
            .map_err(|e| e.to_string())?;
        let owner = Caller::vendor(owner_id);

        let week = Weekday::ALL
            .into_iter()
            .map(|day| match day {
                Weekday::Sunday => DayAvailability::closed(day),
                _ => DayAvailability::open(day, "09:00", "22:00", 3),
            })
            .collect();
        let vendor_id = system
            .vendors
            .register(
                &owner,
                VendorCreate {
                    owner_id,
                    business_name: "Bruno's Trattoria".to_string(),
                    delivery_fee: Money::new(299, 2),
                    availability: week,
                },
            )
            .await
            .map_err(|e| e.to_string())?;

        let mut dish_ids = Vec::new();
        for (name, cents) in [("Margherita", 1150), ("Tiramisu", 650)] {
            let id = system
                .menu
                .create_item(
                    &owner,
                    MenuItemCreate {
                        vendor_id,
                        name: name.to_string(),
                        price: Money::new(cents, 2),
                    },
                )
                .await
                .map_err(|e| e.to_string())?;
            dish_ids.push(id);
        }
        info!(%vendor_id, dishes = dish_ids.len(), "Vendor ready");
        Ok::<_, String>((Caller::user(customer_id), owner, dish_ids, vendor_id))
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("shopping");
    async {
        for (dish, raw_quantity) in dish_ids.iter().zip(["2", "not-a-number"]) {
            let view = system
                .carts
                .add_item(&customer, *dish, parse_quantity(raw_quantity), None)
                .await
                .map_err(|e| e.to_string())?;
            info!(lines = view.items.len(), total = %view.total_amount, "Cart updated");
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("checkout");
    let order = async {
        system
            .orders
            .checkout(
                &customer,
                CheckoutRequest {
                    delivery_address: "12 Via Roma".to_string(),
                    contact_phone: "555-0134".to_string(),
                    payment_method: PaymentMethod::Card,
                    special_instructions: None,
                },
            )
            .await
    }
    .instrument(span)
    .await;

    match order {
        Ok(order) => {
            info!(order_id = %order.id, final_amount = %order.final_amount, "Order placed");
            for status in ["accepted", "preparing", "out_for_delivery"] {
                if let Err(e) = system
                    .orders
                    .update_status(&owner, order.id, status, None)
                    .await
                {
                    error!(code = %e.kind(), error = %e, "Status update failed");
                }
            }
            match system.orders.confirm_delivery(&customer, order.id).await {
                Ok(order) => info!(order_id = %order.id, status = %order.order_status, "Delivered"),
                Err(e) => error!(code = %e.kind(), error = %e, "Confirm delivery failed"),
            }
        }
        Err(e) => error!(code = %e.kind(), error = %e, "Checkout failed"),
    }

    let span = tracing::info_span!("reservation");
    async {
        let booking = BookingRequest {
            vendor_id,
            date: "2025-03-10".to_string(),
            time: "19:30".to_string(),
            guest_count: 4,
            note: Some("Window table if possible".to_string()),
        };
        match system.reservations.create(&customer, booking).await {
            Ok(reservation) => {
                info!(reservation_id = %reservation.id, status = %reservation.status, "Table booked");
                if let Err(e) = system
                    .reservations
                    .update_status(&owner, reservation.id, "confirmed")
                    .await
                {
                    error!(code = %e.kind(), error = %e, "Confirmation failed");
                }
            }
            Err(e) => error!(code = %e.kind(), error = %e, "Booking failed"),
        }
    }
    .instrument(span)
    .await;

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}

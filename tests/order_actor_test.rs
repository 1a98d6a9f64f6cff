use actor_framework::mock::MockClient;
use actor_framework::{ActorClient, FrameworkError};
use chrono::{TimeDelta, Utc};
use food_market::clients::{CartClient, CheckoutRequest, MenuClient, OrderClient, VendorClient};
use food_market::error::{Classify, ErrorKind};
use food_market::identity::Caller;
use food_market::model::{
    Cart, CartItem, MenuItem, MenuItemId, Money, OrderStatus, PaymentMethod, UserId, VendorId,
    VendorProfile,
};
use food_market::order_actor::{OrderContext, OrderError};
use std::collections::HashMap;

const CUSTOMER: UserId = UserId(1);
const VENDOR_OWNER: UserId = UserId(50);

fn vendor() -> VendorProfile {
    VendorProfile {
        id: VendorId(1),
        owner_id: VENDOR_OWNER,
        business_name: "Green Bowl".into(),
        delivery_fee: Money::new(250, 2),
        is_active: true,
        availability: Vec::new(),
        bookings: HashMap::new(),
    }
}

fn dish(id: u32, cents: i64) -> MenuItem {
    MenuItem {
        id: MenuItemId(id),
        vendor_id: VendorId(1),
        name: format!("bowl {id}"),
        price: Money::new(cents, 2),
        is_available: true,
    }
}

/// Two lines captured at old prices: 2 x 9.00 and 1 x 5.50.
fn cart() -> Cart {
    let line = |id: u32, quantity: u32, cents: i64| CartItem {
        menu_item_id: MenuItemId(id),
        quantity,
        unit_price: Money::new(cents, 2),
        display_name: format!("bowl {id}"),
        notes: None,
    };
    let now = Utc::now();
    Cart {
        user_id: CUSTOMER,
        vendor_id: VendorId(1),
        items: vec![line(1, 2, 900), line(2, 1, 550)],
        created_at: now,
        updated_at: now,
        ttl: TimeDelta::days(7),
    }
}

fn request() -> CheckoutRequest {
    CheckoutRequest {
        delivery_address: "4 Elm Road".into(),
        contact_phone: "555-0199".into(),
        payment_method: PaymentMethod::Online,
        special_instructions: Some("Ring twice".into()),
    }
}

/// Real Order actor; carts, menu and vendors are mocks.
struct Harness {
    carts: MockClient<Cart>,
    menu: MockClient<MenuItem>,
    vendors: MockClient<VendorProfile>,
    orders: OrderClient,
    handle: tokio::task::JoinHandle<()>,
}

impl Harness {
    fn start(tax_rate: Money) -> Self {
        let carts = MockClient::<Cart>::new();
        let menu = MockClient::<MenuItem>::new();
        let vendors = MockClient::<VendorProfile>::new();

        let vendor_client = VendorClient::new(vendors.client());
        let menu_client = MenuClient::new(menu.client(), vendor_client.clone());
        let cart_client = CartClient::new(
            carts.client(),
            menu_client.clone(),
            vendor_client.clone(),
            TimeDelta::days(7),
        );

        let (order_actor, order_inner) = food_market::order_actor::new(16);
        let handle = tokio::spawn(order_actor.run(OrderContext {
            carts: cart_client,
            menu: menu_client,
            vendors: vendor_client.clone(),
            tax_rate,
        }));

        Self {
            carts,
            menu,
            vendors,
            orders: OrderClient::new(order_inner, vendor_client),
            handle,
        }
    }

    async fn stop(self) {
        drop(self.orders);
        self.handle.await.unwrap();
    }
}

#[tokio::test]
async fn checkout_snapshots_current_prices() {
    let mut h = Harness::start(Money::new(8, 2));
    h.carts.expect_take(CUSTOMER).return_ok(Some(cart()));
    // Prices moved since the lines were added
    h.menu.expect_get(MenuItemId(1)).return_ok(Some(dish(1, 1000)));
    h.menu.expect_get(MenuItemId(2)).return_ok(Some(dish(2, 550)));
    h.vendors.expect_get(VendorId(1)).return_ok(Some(vendor()));

    let order = h
        .orders
        .checkout(&Caller::user(CUSTOMER), request())
        .await
        .expect("checkout failed");

    assert_eq!(order.vendor_id, VendorId(1));
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].price, Money::new(1000, 2));
    assert_eq!(order.items[0].total_item_price, Money::new(2000, 2));
    assert_eq!(order.total_amount, Money::new(2550, 2));
    assert_eq!(order.delivery_fee, Money::new(250, 2));
    // 25.50 * 0.08 = 2.04
    assert_eq!(order.tax_amount, Money::new(204, 2));
    assert_eq!(order.discount_amount, Money::ZERO);
    assert_eq!(order.final_amount, Money::new(3004, 2));
    assert_eq!(order.order_status, OrderStatus::Pending);

    h.carts.verify();
    h.menu.verify();
    h.vendors.verify();
    h.stop().await;
}

#[tokio::test]
async fn failed_checkout_restores_the_cart() {
    let mut h = Harness::start(Money::ZERO);
    h.carts.expect_take(CUSTOMER).return_ok(Some(cart()));
    h.menu.expect_get(MenuItemId(1)).return_ok(Some(dish(1, 900)));
    h.menu.expect_get(MenuItemId(2)).return_ok(None);
    h.carts.expect_insert(CUSTOMER).return_ok(());

    let err = h
        .orders
        .checkout(&Caller::user(CUSTOMER), request())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // Nothing was stored
    let stored = h.orders.find(|_| true).await.unwrap();
    assert!(stored.is_empty());
    h.carts.verify();
    h.stop().await;
}

#[tokio::test]
async fn unrestorable_cart_is_reported() {
    let mut h = Harness::start(Money::ZERO);
    h.carts.expect_take(CUSTOMER).return_ok(Some(cart()));
    h.menu.expect_get(MenuItemId(1)).return_ok(Some(dish(1, 900)));
    h.menu.expect_get(MenuItemId(2)).return_ok(Some(dish(2, 550)));
    h.vendors.expect_get(VendorId(1)).return_ok(None);
    h.carts
        .expect_insert(CUSTOMER)
        .return_err(FrameworkError::AlreadyExists("user_1".into()));

    let err = h
        .orders
        .checkout(&Caller::user(CUSTOMER), request())
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Inconsistent(_)), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::Internal);
    h.carts.verify();
    h.stop().await;
}

#[tokio::test]
async fn empty_cart_creates_no_order() {
    let mut h = Harness::start(Money::ZERO);
    h.carts.expect_take(CUSTOMER).return_ok(None);

    let err = h
        .orders
        .checkout(&Caller::user(CUSTOMER), request())
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::ValidationError("empty cart".into()));
    assert!(h.orders.find(|_| true).await.unwrap().is_empty());
    h.stop().await;
}

#[tokio::test]
async fn missing_delivery_details_never_touch_the_cart() {
    let h = Harness::start(Money::ZERO);
    let mut bad = request();
    bad.contact_phone = " ".into();

    let err = h
        .orders
        .checkout(&Caller::user(CUSTOMER), bad)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationError);
    h.carts.verify();
    h.stop().await;
}

#[tokio::test]
async fn lifecycle_through_the_real_actor() {
    let mut h = Harness::start(Money::ZERO);
    h.carts.expect_take(CUSTOMER).return_ok(Some(cart()));
    h.menu.expect_get(MenuItemId(1)).return_ok(Some(dish(1, 900)));
    h.menu.expect_get(MenuItemId(2)).return_ok(Some(dish(2, 550)));
    h.vendors.expect_get(VendorId(1)).return_ok(Some(vendor()));
    let order = h
        .orders
        .checkout(&Caller::user(CUSTOMER), request())
        .await
        .unwrap();

    let owner = Caller::vendor(VENDOR_OWNER);
    let admin = Caller::admin(UserId(99));

    // Vendor moves it along; each call resolves the storefront first
    for status in ["accepted", "preparing", "ontheway"] {
        h.vendors.expect_query().return_ok(vec![vendor()]);
        let updated = h
            .orders
            .update_status(&owner, order.id, status, None)
            .await
            .unwrap();
        assert_eq!(updated.order_status.as_str(), status);
    }

    // Another customer cannot cancel; the owner cannot cancel once it left the kitchen
    let err = h
        .orders
        .cancel(&Caller::user(UserId(2)), order.id, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    let err = h
        .orders
        .cancel(&Caller::user(CUSTOMER), order.id, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let delivered = h
        .orders
        .confirm_delivery(&Caller::user(CUSTOMER), order.id)
        .await
        .unwrap();
    assert_eq!(delivered.order_status, OrderStatus::Delivered);
    assert!(delivered.delivered_at.is_some());

    let completed = h
        .orders
        .update_status(&admin, order.id, "completed", None)
        .await
        .unwrap();
    assert!(completed.completed_at.is_some());

    // Completed is final
    let err = h
        .orders
        .update_status(&admin, order.id, "cancelled", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    h.vendors.verify();
    h.stop().await;
}

#[tokio::test]
async fn overflowing_line_restores_cart_and_keeps_actor_alive() {
    let mut h = Harness::start(Money::ZERO);
    h.carts.expect_take(CUSTOMER).return_ok(Some(cart()));
    h.menu.expect_get(MenuItemId(1)).return_ok(Some(MenuItem {
        price: Money::MAX,
        ..dish(1, 0)
    }));
    h.carts.expect_insert(CUSTOMER).return_ok(());

    let err = h
        .orders
        .checkout(&Caller::user(CUSTOMER), request())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationError, "got {err:?}");

    // The actor still answers
    let mine = h.orders.list_for_user(&Caller::user(CUSTOMER)).await.unwrap();
    assert!(mine.is_empty());
    h.carts.verify();
    h.menu.verify();
    h.stop().await;
}

#[tokio::test]
async fn overflowing_final_amount_restores_cart() {
    let mut h = Harness::start(Money::new(8, 2));
    h.carts.expect_take(CUSTOMER).return_ok(Some(cart()));
    h.menu.expect_get(MenuItemId(1)).return_ok(Some(dish(1, 900)));
    h.menu.expect_get(MenuItemId(2)).return_ok(Some(dish(2, 550)));
    h.vendors.expect_get(VendorId(1)).return_ok(Some(VendorProfile {
        delivery_fee: Money::MAX,
        ..vendor()
    }));
    h.carts.expect_insert(CUSTOMER).return_ok(());

    let err = h
        .orders
        .checkout(&Caller::user(CUSTOMER), request())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationError, "got {err:?}");
    assert!(h.orders.find(|_| true).await.unwrap().is_empty());

    h.carts.verify();
    h.menu.verify();
    h.vendors.verify();
    h.stop().await;
}

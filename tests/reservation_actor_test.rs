use actor_framework::mock::MockClient;
use actor_framework::FrameworkError;
use food_market::availability::SlotRejection;
use food_market::clients::{BookingRequest, ReservationClient, UserClient, VendorClient};
use food_market::error::{Classify, ErrorKind};
use food_market::identity::Caller;
use food_market::model::{
    Money, Reservation, ReservationStatus, Role, User, UserId, VendorId, VendorProfile,
};
use food_market::vendor_actor::{VendorActionResult, VendorError};
use std::collections::HashMap;

const GUEST: UserId = UserId(1);
const OWNER: UserId = UserId(40);

fn vendor() -> VendorProfile {
    VendorProfile {
        id: VendorId(1),
        owner_id: OWNER,
        business_name: "Trattoria".into(),
        delivery_fee: Money::ZERO,
        is_active: true,
        availability: Vec::new(),
        bookings: HashMap::new(),
    }
}

fn guest() -> User {
    User {
        id: GUEST,
        name: "Gina".into(),
        email: "gina@example.com".into(),
        role: Role::User,
    }
}

fn booking() -> BookingRequest {
    BookingRequest {
        vendor_id: VendorId(1),
        date: "2025-03-10".into(),
        time: "19:30".into(),
        guest_count: 4,
        note: Some("window table".into()),
    }
}

/// Real Reservation actor; vendors and users are mocks.
struct Harness {
    vendors: MockClient<VendorProfile>,
    users: MockClient<User>,
    reservations: ReservationClient,
    handle: tokio::task::JoinHandle<()>,
}

impl Harness {
    fn start() -> Self {
        let vendors = MockClient::<VendorProfile>::new();
        let users = MockClient::<User>::new();
        let vendor_client = VendorClient::new(vendors.client());

        let (actor, inner) = food_market::reservation_actor::new(16);
        let handle = tokio::spawn(actor.run(vendor_client.clone()));

        Self {
            reservations: ReservationClient::new(
                inner,
                vendor_client,
                UserClient::new(users.client()),
            ),
            vendors,
            users,
            handle,
        }
    }

    /// Books the standard request with the slot claim succeeding.
    async fn book(&mut self) -> Reservation {
        self.vendors.expect_get(VendorId(1)).return_ok(Some(vendor()));
        self.users.expect_get(GUEST).return_ok(Some(guest()));
        self.vendors
            .expect_action(VendorId(1))
            .return_ok(VendorActionResult::ClaimSlot(1));
        self.reservations
            .create(&Caller::user(GUEST), booking())
            .await
            .expect("booking failed")
    }

    /// The owner lookup behind every vendor status change.
    fn expect_owner_lookup(&mut self) {
        self.vendors.expect_query().return_ok(vec![vendor()]);
    }

    async fn stop(self) {
        drop(self.reservations);
        self.handle.await.unwrap();
    }
}

#[tokio::test]
async fn booking_claims_the_slot() {
    let mut h = Harness::start();
    let reservation = h.book().await;

    assert_eq!(reservation.status, ReservationStatus::Pending);
    assert_eq!(reservation.vendor_name, "Trattoria");
    assert_eq!(reservation.user_name, "Gina");
    assert_eq!(reservation.time, "19:30");
    assert_eq!(reservation.guest_count, 4);
    assert_eq!(reservation.note.as_deref(), Some("window table"));

    h.vendors.verify();
    h.users.verify();
    h.stop().await;
}

#[tokio::test]
async fn refused_claim_stores_nothing() {
    let mut h = Harness::start();
    h.vendors.expect_get(VendorId(1)).return_ok(Some(vendor()));
    h.users.expect_get(GUEST).return_ok(Some(guest()));
    h.vendors
        .expect_action(VendorId(1))
        .return_err(FrameworkError::EntityError(Box::new(VendorError::Slot(
            SlotRejection::Full { booked: 3, max: 3 },
        ))));

    let err = h
        .reservations
        .create(&Caller::user(GUEST), booking())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    assert!(h
        .reservations
        .list_for_user(&Caller::user(GUEST))
        .await
        .unwrap()
        .is_empty());

    h.vendors.verify();
    h.stop().await;
}

#[tokio::test]
async fn vendor_rejection_releases_the_slot() {
    let mut h = Harness::start();
    let reservation = h.book().await;

    h.expect_owner_lookup();
    h.vendors
        .expect_action(VendorId(1))
        .return_ok(VendorActionResult::ReleaseSlot(0));
    let rejected = h
        .reservations
        .update_status(&Caller::vendor(OWNER), reservation.id, "rejected")
        .await
        .unwrap();
    assert_eq!(rejected.status, ReservationStatus::Rejected);

    // Terminal now; no further release is attempted
    h.expect_owner_lookup();
    let err = h
        .reservations
        .update_status(&Caller::vendor(OWNER), reservation.id, "confirmed")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    h.vendors.verify();
    h.stop().await;
}

#[tokio::test]
async fn confirming_and_completing_keep_the_slot() {
    let mut h = Harness::start();
    let reservation = h.book().await;
    let owner = Caller::vendor(OWNER);

    h.expect_owner_lookup();
    let confirmed = h
        .reservations
        .update_status(&owner, reservation.id, "confirmed")
        .await
        .unwrap();
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);

    // Same status again is accepted without change
    h.expect_owner_lookup();
    let again = h
        .reservations
        .update_status(&owner, reservation.id, "confirmed")
        .await
        .unwrap();
    assert_eq!(again.updated_at, confirmed.updated_at);

    h.expect_owner_lookup();
    let completed = h
        .reservations
        .update_status(&owner, reservation.id, "completed")
        .await
        .unwrap();
    assert_eq!(completed.status, ReservationStatus::Completed);

    // A completed booking can no longer be cancelled
    let err = h
        .reservations
        .cancel(&Caller::user(GUEST), reservation.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    h.vendors.verify();
    h.stop().await;
}

#[tokio::test]
async fn guest_cancel_releases_once() {
    let mut h = Harness::start();
    let reservation = h.book().await;

    h.vendors
        .expect_action(VendorId(1))
        .return_ok(VendorActionResult::ReleaseSlot(0));
    let cancelled = h
        .reservations
        .cancel(&Caller::user(GUEST), reservation.id)
        .await
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);

    let err = h
        .reservations
        .cancel(&Caller::user(GUEST), reservation.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    h.vendors.verify();
    h.stop().await;
}

#[tokio::test]
async fn failed_release_leaves_status_unchanged() {
    let mut h = Harness::start();
    let reservation = h.book().await;

    h.vendors
        .expect_action(VendorId(1))
        .return_err(FrameworkError::ActorClosed);
    let err = h
        .reservations
        .cancel(&Caller::user(GUEST), reservation.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);

    let stored = h
        .reservations
        .get_reservation(&Caller::user(GUEST), reservation.id)
        .await
        .unwrap();
    assert_eq!(stored.status, ReservationStatus::Pending);

    h.vendors.verify();
    h.stop().await;
}

#[tokio::test]
async fn only_the_booking_user_cancels() {
    let mut h = Harness::start();
    let reservation = h.book().await;

    let err = h
        .reservations
        .cancel(&Caller::user(UserId(2)), reservation.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    // The booking is visible to its vendor but not to strangers
    h.expect_owner_lookup();
    h.reservations
        .get_reservation(&Caller::vendor(OWNER), reservation.id)
        .await
        .unwrap();
    h.vendors.expect_query().return_ok(Vec::new());
    let err = h
        .reservations
        .get_reservation(&Caller::user(UserId(2)), reservation.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    h.vendors.verify();
    h.stop().await;
}

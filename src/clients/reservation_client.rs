//! # Reservation Client
//!
//! The Reservation Allocator's front door. Parses and checks the request, resolves the names
//! the reservation keeps, and leaves the slot claim to `Reservation::on_create`.
use crate::availability::{normalize_clock, parse_date};
use crate::clients::{UserClient, VendorClient};
use crate::identity::Caller;
use crate::model::{
    Reservation, ReservationCreate, ReservationId, ReservationStatus, VendorId, MAX_GUESTS,
    MIN_GUESTS,
};
use crate::reservation_actor::{ReservationAction, ReservationError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// A booking request as callers send it: date and time still as text.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub vendor_id: VendorId,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub guest_count: u32,
    pub note: Option<String>,
}

/// Client for interacting with the Reservation actor.
#[derive(Clone)]
pub struct ReservationClient {
    inner: ResourceClient<Reservation>,
    vendors: VendorClient,
    users: UserClient,
}

impl ReservationClient {
    pub fn new(inner: ResourceClient<Reservation>, vendors: VendorClient, users: UserClient) -> Self {
        Self {
            inner,
            vendors,
            users,
        }
    }

    /// Books a table.
    ///
    /// # Errors
    /// - `ValidationError` for a bad guest count, date or time, or a slot outside the schedule
    /// - `NotFound` if the vendor or the caller's user record does not exist
    /// - `CapacityExceeded` if the slot is full
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        caller: &Caller,
        request: BookingRequest,
    ) -> Result<Reservation, ReservationError> {
        let user_id = caller.require()?.user_id;
        if !(MIN_GUESTS..=MAX_GUESTS).contains(&request.guest_count) {
            return Err(ReservationError::ValidationError(format!(
                "guestCount must be between {MIN_GUESTS} and {MAX_GUESTS}"
            )));
        }
        let date = parse_date(&request.date).ok_or_else(|| {
            ReservationError::ValidationError(format!(
                "invalid date '{}', expected YYYY-MM-DD",
                request.date
            ))
        })?;
        let time = normalize_clock(&request.time).ok_or_else(|| {
            ReservationError::ValidationError(format!(
                "invalid time '{}', expected HH:MM",
                request.time
            ))
        })?;

        let vendor = self.vendors.find_vendor(request.vendor_id).await?;
        let user = self.users.find_user(user_id).await?;
        let params = ReservationCreate {
            user_id,
            user_name: user.name,
            vendor_id: vendor.id,
            vendor_name: vendor.business_name,
            date,
            time,
            guest_count: request.guest_count,
            note: request.note,
        };
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(%id, %user_id, vendor_id = %vendor.id, "Reservation booked");
        self.fetch(id).await
    }

    /// A vendor confirming, rejecting or completing a booking at their storefront.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        caller: &Caller,
        id: ReservationId,
        status: &str,
    ) -> Result<Reservation, ReservationError> {
        let principal = caller.require()?;
        let status: ReservationStatus = status.parse().map_err(ReservationError::ValidationError)?;
        let vendor = self
            .vendors
            .find_by_owner(principal.user_id)
            .await?
            .ok_or_else(|| {
                ReservationError::Forbidden(format!(
                    "{} has no vendor profile",
                    principal.user_id
                ))
            })?;
        let action = ReservationAction::UpdateStatus {
            status,
            vendor_id: vendor.id,
        };
        self.act(id, action).await
    }

    /// The booking user cancelling. Frees the slot.
    #[instrument(skip(self))]
    pub async fn cancel(
        &self,
        caller: &Caller,
        id: ReservationId,
    ) -> Result<Reservation, ReservationError> {
        let by = caller.require()?.user_id;
        self.act(id, ReservationAction::Cancel { by }).await
    }

    /// One reservation, visible to its booker, its vendor and admins.
    #[instrument(skip(self))]
    pub async fn get_reservation(
        &self,
        caller: &Caller,
        id: ReservationId,
    ) -> Result<Reservation, ReservationError> {
        let principal = caller.require()?;
        let reservation = self.fetch(id).await?;
        if reservation.user_id == principal.user_id || principal.is_admin() {
            return Ok(reservation);
        }
        let owns_vendor = self
            .vendors
            .find_by_owner(principal.user_id)
            .await?
            .is_some_and(|vendor| vendor.id == reservation.vendor_id);
        if owns_vendor {
            Ok(reservation)
        } else {
            Err(ReservationError::Forbidden(format!(
                "{} may not view {id}",
                principal.user_id
            )))
        }
    }

    /// The caller's bookings, soonest first. Anonymous callers have none.
    #[instrument(skip(self))]
    pub async fn list_for_user(&self, caller: &Caller) -> Result<Vec<Reservation>, ReservationError> {
        let Some(principal) = caller.principal() else {
            return Ok(Vec::new());
        };
        let user_id = principal.user_id;
        let found = self
            .find(move |reservation: &Reservation| reservation.user_id == user_id)
            .await?;
        Ok(by_slot(found))
    }

    /// Bookings at the caller's storefront, soonest first.
    #[instrument(skip(self))]
    pub async fn list_for_vendor(
        &self,
        caller: &Caller,
    ) -> Result<Vec<Reservation>, ReservationError> {
        let Some(principal) = caller.principal() else {
            return Ok(Vec::new());
        };
        let vendor = self
            .vendors
            .find_by_owner(principal.user_id)
            .await?
            .ok_or_else(|| {
                ReservationError::Forbidden(format!(
                    "{} has no vendor profile",
                    principal.user_id
                ))
            })?;
        let vendor_id = vendor.id;
        let found = self
            .find(move |reservation: &Reservation| reservation.vendor_id == vendor_id)
            .await?;
        Ok(by_slot(found))
    }

    async fn act(
        &self,
        id: ReservationId,
        action: ReservationAction,
    ) -> Result<Reservation, ReservationError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    async fn fetch(&self, id: ReservationId) -> Result<Reservation, ReservationError> {
        self.get(id)
            .await?
            .ok_or_else(|| ReservationError::NotFound(id.to_string()))
    }
}

fn by_slot(mut reservations: Vec<Reservation>) -> Vec<Reservation> {
    reservations.sort_by(|a, b| {
        (a.date, &a.time, a.id).cmp(&(b.date, &b.time, b.id))
    });
    reservations
}

#[async_trait]
impl ActorClient<Reservation> for ReservationClient {
    type Error = ReservationError;

    fn inner(&self) -> &ResourceClient<Reservation> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast::<ReservationError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => ReservationError::NotFound(id),
            Err(other) => ReservationError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Classify, ErrorKind};
    use crate::model::{User, UserId, VendorProfile};
    use actor_framework::mock::MockClient;

    struct Fixture {
        reservations: MockClient<Reservation>,
        vendors: MockClient<VendorProfile>,
        users: MockClient<User>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                reservations: MockClient::new(),
                vendors: MockClient::new(),
                users: MockClient::new(),
            }
        }

        fn client(&self) -> ReservationClient {
            ReservationClient::new(
                self.reservations.client(),
                VendorClient::new(self.vendors.client()),
                UserClient::new(self.users.client()),
            )
        }
    }

    fn booking(date: &str, time: &str, guests: u32) -> BookingRequest {
        BookingRequest {
            vendor_id: VendorId(1),
            date: date.into(),
            time: time.into(),
            guest_count: guests,
            note: None,
        }
    }

    #[tokio::test]
    async fn malformed_input_never_reaches_the_actors() {
        let f = Fixture::new();
        let client = f.client();
        let caller = Caller::user(UserId(1));

        for request in [
            booking("2025-03-10", "12:00", 0),
            booking("2025-03-10", "12:00", 21),
            booking("10/03/2025", "12:00", 2),
            booking("2025-03-10", "noon", 2),
        ] {
            let err = client.create(&caller, request).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValidationError);
        }
        f.vendors.verify();
        f.reservations.verify();
    }

    #[tokio::test]
    async fn unknown_vendor_is_not_found() {
        let mut f = Fixture::new();
        f.vendors.expect_get(VendorId(1)).return_ok(None);

        let err = f
            .client()
            .create(&Caller::user(UserId(1)), booking("2025-03-10", "12:00", 2))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn status_string_is_checked_first() {
        let f = Fixture::new();
        let err = f
            .client()
            .update_status(&Caller::vendor(UserId(2)), ReservationId(1), "done")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
    }

    #[tokio::test]
    async fn users_without_storefront_cannot_set_status() {
        let mut f = Fixture::new();
        f.vendors.expect_query().return_ok(Vec::new());
        let err = f
            .client()
            .update_status(&Caller::user(UserId(2)), ReservationId(1), "confirmed")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn anonymous_lists_are_empty() {
        let f = Fixture::new();
        let client = f.client();
        assert!(client.list_for_user(&Caller::Anonymous).await.unwrap().is_empty());
        assert!(client.list_for_vendor(&Caller::Anonymous).await.unwrap().is_empty());
        let err = client
            .cancel(&Caller::Anonymous, ReservationId(1))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    }
}

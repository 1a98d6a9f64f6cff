//! [`ActorEntity`] implementation for [`Reservation`].

use super::actions::ReservationAction;
use crate::clients::VendorClient;
use crate::model::{
    Reservation, ReservationCreate, ReservationId, ReservationStatus, MAX_GUESTS, MAX_NOTE_LEN,
    MIN_GUESTS,
};
use crate::reservation_actor::ReservationError;
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

/// The statuses a vendor may set.
const VENDOR_SETTABLE: [ReservationStatus; 3] = [
    ReservationStatus::Confirmed,
    ReservationStatus::Rejected,
    ReservationStatus::Completed,
];

fn is_terminal(status: ReservationStatus) -> bool {
    matches!(
        status,
        ReservationStatus::Rejected | ReservationStatus::Cancelled | ReservationStatus::Completed
    )
}

impl Reservation {
    /// Moves to `next`, giving the slot back first if `next` no longer holds it.
    async fn transition(
        &mut self,
        next: ReservationStatus,
        vendors: &VendorClient,
    ) -> Result<(), ReservationError> {
        if self.status.holds_slot() && !next.holds_slot() {
            vendors
                .release_slot(self.vendor_id, self.date, &self.time)
                .await?;
        }
        info!(id = %self.id, from = %self.status, to = %next, "Reservation status changed");
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Reservation {
    type Id = ReservationId;
    type Create = ReservationCreate;
    type Update = ();
    type Action = ReservationAction;
    type ActionResult = Reservation;
    type Context = VendorClient;
    type Error = ReservationError;

    fn from_create_params(id: ReservationId, params: ReservationCreate) -> Result<Self, Self::Error> {
        if !(MIN_GUESTS..=MAX_GUESTS).contains(&params.guest_count) {
            return Err(ReservationError::ValidationError(format!(
                "guestCount must be between {MIN_GUESTS} and {MAX_GUESTS}"
            )));
        }
        if params
            .note
            .as_deref()
            .is_some_and(|note| note.chars().count() > MAX_NOTE_LEN)
        {
            return Err(ReservationError::ValidationError(format!(
                "note must be at most {MAX_NOTE_LEN} characters"
            )));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            user_id: params.user_id,
            vendor_id: params.vendor_id,
            vendor_name: params.vendor_name,
            user_name: params.user_name,
            date: params.date,
            time: params.time,
            guest_count: params.guest_count,
            note: params.note,
            status: ReservationStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Claims the slot. A rejected claim aborts the booking, so nothing is stored.
    async fn on_create(&mut self, vendors: &VendorClient) -> Result<(), Self::Error> {
        let booked = vendors
            .claim_slot(self.vendor_id, self.date, &self.time)
            .await?;
        debug!(id = %self.id, vendor_id = %self.vendor_id, booked, "Slot claimed for reservation");
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &VendorClient) -> Result<(), Self::Error> {
        Ok(())
    }

    /// # Actions
    /// - `UpdateStatus`: owning vendor only, to `confirmed`, `rejected` or `completed`
    /// - `Cancel`: booking user only, from `pending` or `confirmed`
    async fn handle_action(
        &mut self,
        action: ReservationAction,
        vendors: &VendorClient,
    ) -> Result<Reservation, Self::Error> {
        match action {
            ReservationAction::UpdateStatus { status, vendor_id } => {
                if vendor_id != self.vendor_id {
                    return Err(ReservationError::Forbidden(format!(
                        "{} does not belong to {vendor_id}",
                        self.id
                    )));
                }
                if !VENDOR_SETTABLE.contains(&status) {
                    return Err(ReservationError::ValidationError(format!(
                        "vendors cannot set status '{status}'"
                    )));
                }
                if is_terminal(self.status) {
                    return Err(ReservationError::Conflict(format!(
                        "reservation is already {}",
                        self.status
                    )));
                }
                if status != self.status {
                    self.transition(status, vendors).await?;
                }
            }
            ReservationAction::Cancel { by } => {
                if by != self.user_id {
                    return Err(ReservationError::Forbidden(format!(
                        "{} was not booked by {by}",
                        self.id
                    )));
                }
                if !matches!(
                    self.status,
                    ReservationStatus::Pending | ReservationStatus::Confirmed
                ) {
                    return Err(ReservationError::Conflict(format!(
                        "cannot cancel a {} reservation",
                        self.status
                    )));
                }
                self.transition(ReservationStatus::Cancelled, vendors).await?;
            }
        }
        Ok(self.clone())
    }
}

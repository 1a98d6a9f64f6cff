//! Custom actions for the Reservation actor. Each one answers with the updated reservation.

use crate::model::{ReservationStatus, UserId, VendorId};

#[derive(Debug, Clone)]
pub enum ReservationAction {
    /// A vendor deciding on a booking. `vendor_id` is the acting vendor's profile.
    UpdateStatus {
        status: ReservationStatus,
        vendor_id: VendorId,
    },
    /// The booking user withdrawing.
    Cancel { by: UserId },
}

//! Custom actions for the Vendor actor.

use crate::model::DayAvailability;
use chrono::NaiveDate;

/// Operations on a vendor beyond plain profile edits.
#[derive(Debug, Clone)]
pub enum VendorAction {
    /// Replaces the whole weekly schedule. Existing bookings are kept.
    SetAvailability(Vec<DayAvailability>),
    /// Checks the slot against the schedule and takes one place in it.
    ///
    /// # Errors
    /// Fails with a [`SlotRejection`](crate::availability::SlotRejection) when the day is
    /// missing or closed, the time is malformed or outside hours, or the slot is full.
    ClaimSlot { date: NaiveDate, time: String },
    /// Gives one place back. Releasing an empty slot is a no-op.
    ReleaseSlot { date: NaiveDate, time: String },
}

/// Results from VendorActions - variants match 1:1 with VendorAction
#[derive(Debug, Clone, PartialEq)]
pub enum VendorActionResult {
    SetAvailability(()),
    /// Bookings held by the slot after the claim.
    ClaimSlot(u32),
    /// Bookings held by the slot after the release.
    ReleaseSlot(u32),
}

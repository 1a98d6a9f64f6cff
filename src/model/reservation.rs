use crate::model::{ReservationId, UserId, VendorId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const MIN_GUESTS: u32 = 1;
pub const MAX_GUESTS: u32 = 20;
pub const MAX_NOTE_LEN: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Rejected => "rejected",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }

    /// Whether a reservation in this state holds a place in its slot.
    pub const fn holds_slot(self) -> bool {
        !matches!(self, ReservationStatus::Rejected | ReservationStatus::Cancelled)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "rejected" => Ok(ReservationStatus::Rejected),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            "completed" => Ok(ReservationStatus::Completed),
            other => Err(format!("invalid reservation status '{other}'")),
        }
    }
}

/// A table booking at a vendor.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait. Creating
/// one claims its slot from the vendor actor; leaving the slot-holding states gives it back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub user_name: String,
    pub date: NaiveDate,
    pub time: String,
    pub guest_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for booking. `time` is already normalized to `HH:MM`.
#[derive(Debug, Clone)]
pub struct ReservationCreate {
    pub user_id: UserId,
    pub user_name: String,
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub date: NaiveDate,
    pub time: String,
    pub guest_count: u32,
    pub note: Option<String>,
}

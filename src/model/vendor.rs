use crate::model::{Money, UserId, VendorId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Day of the week, serialized as the lowercase English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opening window and slot capacity for one weekday. Times are `HH:MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub day: Weekday,
    pub is_open: bool,
    pub open_time: String,
    pub close_time: String,
    pub max_orders_per_slot: u32,
    pub slot_duration_minutes: u32,
}

impl DayAvailability {
    /// An open day with the given window and per-slot ceiling, in 30 minute slots.
    pub fn open(day: Weekday, open_time: &str, close_time: &str, max_orders_per_slot: u32) -> Self {
        Self {
            day,
            is_open: true,
            open_time: open_time.to_string(),
            close_time: close_time.to_string(),
            max_orders_per_slot,
            slot_duration_minutes: 30,
        }
    }

    pub fn closed(day: Weekday) -> Self {
        Self {
            day,
            is_open: false,
            open_time: "00:00".to_string(),
            close_time: "00:00".to_string(),
            max_orders_per_slot: 1,
            slot_duration_minutes: 30,
        }
    }
}

/// A concrete bookable slot: calendar day plus normalized `HH:MM` start.
pub type Slot = (NaiveDate, String);

/// A vendor's storefront: ownership, fees and weekly reservation schedule.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait.
/// Alongside the schedule it keeps the live booking count per slot, so that checking a slot and
/// claiming it happen in one actor message.
///
/// See [`impl ActorEntity for VendorProfile`](#impl-ActorEntity-for-VendorProfile) for details on:
/// - Creation parameters ([`VendorCreate`])
/// - Update parameters ([`VendorUpdate`])
/// - Custom actions ([`VendorAction`](crate::vendor_actor::VendorAction))
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorProfile {
    pub id: VendorId,
    pub owner_id: UserId,
    pub business_name: String,
    pub delivery_fee: Money,
    pub is_active: bool,
    pub availability: Vec<DayAvailability>,
    #[serde(skip)]
    pub bookings: HashMap<Slot, u32>,
}

impl VendorProfile {
    pub fn summary(&self) -> VendorSummary {
        VendorSummary {
            id: self.id,
            business_name: self.business_name.clone(),
        }
    }

    pub fn booked(&self, slot: &Slot) -> u32 {
        self.bookings.get(slot).copied().unwrap_or(0)
    }
}

/// The part of a vendor shown next to a cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSummary {
    pub id: VendorId,
    pub business_name: String,
}

/// Payload for registering a vendor. An empty `availability` means no reservations until a
/// schedule is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorCreate {
    pub owner_id: UserId,
    pub business_name: String,
    pub delivery_fee: Money,
    #[serde(default)]
    pub availability: Vec<DayAvailability>,
}

/// Payload for editing a vendor profile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorUpdate {
    pub business_name: Option<String>,
    pub delivery_fee: Option<Money>,
    pub is_active: Option<bool>,
}

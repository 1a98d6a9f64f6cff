//! # Availability Evaluator
//!
//! Decides whether a reservation slot is bookable from a vendor's weekly schedule and the number
//! of bookings the slot already holds. Nothing here touches actor state; the vendor actor runs
//! the check and the counter increment in the same message.

use crate::error::{Classify, ErrorKind};
use crate::model::{DayAvailability, Weekday};
use chrono::{Datelike, NaiveDate, NaiveTime};
use thiserror::Error;

/// Why a slot cannot be booked.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SlotRejection {
    #[error("Vendor has no availability on {0}")]
    NoSchedule(Weekday),

    #[error("Vendor is closed on {0}")]
    Closed(Weekday),

    #[error("Invalid time '{0}', expected HH:MM")]
    MalformedTime(String),

    #[error("Time {time} is outside opening hours {open}-{close}")]
    OutsideHours {
        time: String,
        open: String,
        close: String,
    },

    #[error("Slot is fully booked ({booked} of {max})")]
    Full { booked: u32, max: u32 },
}

impl Classify for SlotRejection {
    fn kind(&self) -> ErrorKind {
        match self {
            SlotRejection::Full { .. } => ErrorKind::CapacityExceeded,
            _ => ErrorKind::ValidationError,
        }
    }
}

/// Parses `HH:MM` (24 hour clock).
pub fn parse_clock(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time.trim(), "%H:%M").ok()
}

/// Canonical `HH:MM` spelling, used as the slot key.
pub fn normalize_clock(time: &str) -> Option<String> {
    parse_clock(time).map(|t| t.format("%H:%M").to_string())
}

/// Parses a `YYYY-MM-DD` calendar day.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// Checks one slot against the vendor's schedule.
///
/// Opening and closing times are inclusive. `existing` counts only bookings that still hold the
/// slot (neither rejected nor cancelled).
pub fn is_slot_available(
    availability: &[DayAvailability],
    date: NaiveDate,
    time: &str,
    existing: u32,
) -> Result<(), SlotRejection> {
    let weekday = Weekday::from(date.weekday());
    let day = availability
        .iter()
        .find(|d| d.day == weekday)
        .ok_or(SlotRejection::NoSchedule(weekday))?;

    if !day.is_open {
        return Err(SlotRejection::Closed(weekday));
    }

    let at = parse_clock(time).ok_or_else(|| SlotRejection::MalformedTime(time.to_string()))?;
    let outside = || SlotRejection::OutsideHours {
        time: time.to_string(),
        open: day.open_time.clone(),
        close: day.close_time.clone(),
    };
    // A stored window that does not parse admits nothing.
    let open = parse_clock(&day.open_time).ok_or_else(outside)?;
    let close = parse_clock(&day.close_time).ok_or_else(outside)?;
    if at < open || at > close {
        return Err(outside());
    }

    if existing >= day.max_orders_per_slot {
        return Err(SlotRejection::Full {
            booked: existing,
            max: day.max_orders_per_slot,
        });
    }
    Ok(())
}

/// Validates a full weekly schedule before it replaces the current one.
///
/// Requires exactly one entry per weekday, parseable `HH:MM` times with open <= close, at least
/// one booking per slot, and a positive slot length.
pub fn validate_schedule(availability: &[DayAvailability]) -> Result<(), String> {
    for weekday in Weekday::ALL {
        let count = availability.iter().filter(|d| d.day == weekday).count();
        if count != 1 {
            return Err(format!(
                "availability must contain exactly one entry for {weekday}, found {count}"
            ));
        }
    }
    for day in availability {
        let open = parse_clock(&day.open_time)
            .ok_or_else(|| format!("{}: invalid openTime '{}'", day.day, day.open_time))?;
        let close = parse_clock(&day.close_time)
            .ok_or_else(|| format!("{}: invalid closeTime '{}'", day.day, day.close_time))?;
        if open > close {
            return Err(format!("{}: openTime must not be after closeTime", day.day));
        }
        if day.max_orders_per_slot < 1 {
            return Err(format!("{}: maxOrdersPerSlot must be at least 1", day.day));
        }
        if day.slot_duration_minutes == 0 {
            return Err(format!("{}: slotDurationMinutes must be positive", day.day));
        }
    }
    Ok(())
}

//! [`ActorEntity`] implementation for [`VendorProfile`].
//!
//! Includes the slot ledger behind reservation capacity.

use super::actions::{VendorAction, VendorActionResult};
use crate::availability::{is_slot_available, normalize_clock, validate_schedule, SlotRejection};
use crate::model::{Money, Slot, VendorCreate, VendorId, VendorProfile, VendorUpdate, MAX_PRICE};
use crate::vendor_actor::VendorError;
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

fn check_business_name(name: &str) -> Result<(), VendorError> {
    if name.trim().is_empty() {
        return Err(VendorError::ValidationError(
            "businessName must not be empty".into(),
        ));
    }
    Ok(())
}

fn check_fee(fee: Money) -> Result<(), VendorError> {
    if fee < Money::ZERO {
        return Err(VendorError::ValidationError(
            "deliveryFee must not be negative".into(),
        ));
    }
    if fee > MAX_PRICE {
        return Err(VendorError::ValidationError(format!(
            "deliveryFee must not exceed {MAX_PRICE}"
        )));
    }
    Ok(())
}

fn slot(date: NaiveDate, time: &str) -> Result<Slot, VendorError> {
    let time = normalize_clock(time).ok_or_else(|| SlotRejection::MalformedTime(time.into()))?;
    Ok((date, time))
}

#[async_trait]
impl ActorEntity for VendorProfile {
    type Id = VendorId;
    type Create = VendorCreate;
    type Update = VendorUpdate;
    type Action = VendorAction;
    type ActionResult = VendorActionResult;
    type Context = ();
    type Error = VendorError;

    fn from_create_params(id: VendorId, params: VendorCreate) -> Result<Self, Self::Error> {
        check_business_name(&params.business_name)?;
        check_fee(params.delivery_fee)?;
        if !params.availability.is_empty() {
            validate_schedule(&params.availability).map_err(VendorError::ValidationError)?;
        }
        Ok(Self {
            id,
            owner_id: params.owner_id,
            business_name: params.business_name,
            delivery_fee: params.delivery_fee,
            is_active: true,
            availability: params.availability,
            bookings: HashMap::new(),
        })
    }

    /// # Fields Updated
    /// - `businessName`
    /// - `deliveryFee`: applies to orders placed afterwards
    /// - `isActive`
    async fn on_update(&mut self, update: VendorUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = &update.business_name {
            check_business_name(name)?;
        }
        if let Some(fee) = update.delivery_fee {
            check_fee(fee)?;
        }
        if let Some(name) = update.business_name {
            self.business_name = name;
        }
        if let Some(fee) = update.delivery_fee {
            self.delivery_fee = fee;
        }
        if let Some(active) = update.is_active {
            self.is_active = active;
        }
        Ok(())
    }

    /// # Actions
    /// - `SetAvailability`: validates and replaces the weekly schedule
    /// - `ClaimSlot`: evaluates the slot against the schedule and current count, then increments
    /// - `ReleaseSlot`: decrements, never below zero
    async fn handle_action(
        &mut self,
        action: VendorAction,
        _ctx: &(),
    ) -> Result<VendorActionResult, Self::Error> {
        match action {
            VendorAction::SetAvailability(availability) => {
                validate_schedule(&availability).map_err(VendorError::ValidationError)?;
                self.availability = availability;
                Ok(VendorActionResult::SetAvailability(()))
            }
            VendorAction::ClaimSlot { date, time } => {
                if !self.is_active {
                    return Err(VendorError::ValidationError(format!(
                        "{} is not accepting reservations",
                        self.business_name
                    )));
                }
                let key = slot(date, &time)?;
                let booked = self.booked(&key);
                is_slot_available(&self.availability, date, &key.1, booked)?;
                let booked = booked + 1;
                debug!(vendor_id = %self.id, %date, time = %key.1, booked, "Slot claimed");
                self.bookings.insert(key, booked);
                Ok(VendorActionResult::ClaimSlot(booked))
            }
            VendorAction::ReleaseSlot { date, time } => {
                let key = slot(date, &time)?;
                let booked = self.booked(&key).saturating_sub(1);
                debug!(vendor_id = %self.id, %date, time = %key.1, booked, "Slot released");
                if booked == 0 {
                    self.bookings.remove(&key);
                } else {
                    self.bookings.insert(key, booked);
                }
                Ok(VendorActionResult::ReleaseSlot(booked))
            }
        }
    }
}

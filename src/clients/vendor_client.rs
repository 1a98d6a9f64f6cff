//! # Vendor Client
//!
//! Vendor registration and profile edits, the owner lookup every vendor-side permission check
//! goes through, and the slot ledger used by reservations.
use crate::identity::{Caller, Principal};
use crate::model::{DayAvailability, UserId, VendorCreate, VendorId, VendorProfile, VendorUpdate};
use crate::vendor_actor::{VendorAction, VendorActionResult, VendorError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, instrument};

/// Client for interacting with the Vendor actor.
#[derive(Clone)]
pub struct VendorClient {
    inner: ResourceClient<VendorProfile>,
}

impl VendorClient {
    pub fn new(inner: ResourceClient<VendorProfile>) -> Self {
        Self { inner }
    }

    /// Registers a storefront. Callers may only register for themselves unless they are admins.
    #[instrument(skip(self, params), fields(owner_id = %params.owner_id))]
    pub async fn register(
        &self,
        caller: &Caller,
        params: VendorCreate,
    ) -> Result<VendorId, VendorError> {
        let principal = caller.require()?;
        if principal.user_id != params.owner_id && !principal.is_admin() {
            return Err(VendorError::Forbidden(
                "vendors can only be registered by their owner".into(),
            ));
        }
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_vendor(&self, id: VendorId) -> Result<VendorProfile, VendorError> {
        debug!("Sending request");
        self.inner
            .get(id)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| VendorError::NotFound(id.to_string()))
    }

    /// The profile owned by `owner_id`, if that user runs a storefront.
    #[instrument(skip(self))]
    pub async fn find_by_owner(
        &self,
        owner_id: UserId,
    ) -> Result<Option<VendorProfile>, VendorError> {
        let mut owned = self
            .find(move |vendor: &VendorProfile| vendor.owner_id == owner_id)
            .await?;
        owned.sort_by_key(|vendor| vendor.id);
        Ok(owned.into_iter().next())
    }

    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        caller: &Caller,
        id: VendorId,
        update: VendorUpdate,
    ) -> Result<VendorProfile, VendorError> {
        self.authorize_owner(caller.require()?, id).await?;
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Replaces the weekly schedule. Bookings already made stay counted.
    #[instrument(skip(self, availability))]
    pub async fn set_availability(
        &self,
        caller: &Caller,
        id: VendorId,
        availability: Vec<DayAvailability>,
    ) -> Result<(), VendorError> {
        self.authorize_owner(caller.require()?, id).await?;
        debug!(days = availability.len(), "Sending request");
        match self
            .inner
            .perform_action(id, VendorAction::SetAvailability(availability))
            .await
        {
            Ok(VendorActionResult::SetAvailability(())) => Ok(()),
            Ok(_) => unreachable!("SetAvailability action must return SetAvailability result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Takes one place in a slot, returning the slot's new booking count.
    ///
    /// # Errors
    /// [`VendorError::Slot`] when the schedule or the ceiling rules the slot out.
    #[instrument(skip(self))]
    pub async fn claim_slot(
        &self,
        id: VendorId,
        date: NaiveDate,
        time: &str,
    ) -> Result<u32, VendorError> {
        debug!("Claiming slot");
        let action = VendorAction::ClaimSlot {
            date,
            time: time.to_string(),
        };
        match self.inner.perform_action(id, action).await {
            Ok(VendorActionResult::ClaimSlot(booked)) => Ok(booked),
            Ok(_) => unreachable!("ClaimSlot action must return ClaimSlot result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn release_slot(
        &self,
        id: VendorId,
        date: NaiveDate,
        time: &str,
    ) -> Result<u32, VendorError> {
        debug!("Releasing slot");
        let action = VendorAction::ReleaseSlot {
            date,
            time: time.to_string(),
        };
        match self.inner.perform_action(id, action).await {
            Ok(VendorActionResult::ReleaseSlot(booked)) => Ok(booked),
            Ok(_) => unreachable!("ReleaseSlot action must return ReleaseSlot result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    async fn authorize_owner(
        &self,
        principal: &Principal,
        id: VendorId,
    ) -> Result<VendorProfile, VendorError> {
        let vendor = self.find_vendor(id).await?;
        if vendor.owner_id != principal.user_id && !principal.is_admin() {
            return Err(VendorError::Forbidden(format!(
                "{} does not own {id}",
                principal.user_id
            )));
        }
        Ok(vendor)
    }
}

#[async_trait]
impl ActorClient<VendorProfile> for VendorClient {
    type Error = VendorError;

    fn inner(&self) -> &ResourceClient<VendorProfile> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast::<VendorError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => VendorError::NotFound(id),
            Err(other) => VendorError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::SlotRejection;
    use crate::error::{Classify, ErrorKind};
    use crate::model::Money;
    use actor_framework::mock::{create_mock_client, expect_action, MockClient};
    use std::collections::HashMap;

    fn profile(id: u32, owner: u32) -> VendorProfile {
        VendorProfile {
            id: VendorId(id),
            owner_id: UserId(owner),
            business_name: format!("vendor {id}"),
            delivery_fee: Money::new(300, 2),
            is_active: true,
            availability: Vec::new(),
            bookings: HashMap::new(),
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[tokio::test]
    async fn claim_slot_sends_the_slot() {
        let (client, mut receiver) = create_mock_client::<VendorProfile>(10);
        let vendors = VendorClient::new(client);

        let task = tokio::spawn(async move { vendors.claim_slot(VendorId(2), monday(), "12:00").await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, VendorId(2));
        match action {
            VendorAction::ClaimSlot { date, time } => {
                assert_eq!(date, monday());
                assert_eq!(time, "12:00");
            }
            other => panic!("Expected ClaimSlot, got {other:?}"),
        }
        responder.send(Ok(VendorActionResult::ClaimSlot(2))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 2);
    }

    #[tokio::test]
    async fn full_slot_keeps_its_classification() {
        let mut mock = MockClient::<VendorProfile>::new();
        mock.expect_action(VendorId(2))
            .return_err(FrameworkError::EntityError(Box::new(VendorError::Slot(
                SlotRejection::Full { booked: 3, max: 3 },
            ))));
        let vendors = VendorClient::new(mock.client());

        let err = vendors.claim_slot(VendorId(2), monday(), "12:00").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    }

    #[tokio::test]
    async fn find_by_owner_picks_the_matching_profile() {
        let mut mock = MockClient::<VendorProfile>::new();
        mock.expect_query().return_ok(vec![profile(7, 4), profile(3, 4)]);
        let vendors = VendorClient::new(mock.client());

        let found = vendors.find_by_owner(UserId(4)).await.unwrap();
        assert_eq!(found.map(|v| v.id), Some(VendorId(3)));
    }

    #[tokio::test]
    async fn only_the_owner_edits_a_profile() {
        let mut mock = MockClient::<VendorProfile>::new();
        mock.expect_get(VendorId(1)).return_ok(Some(profile(1, 10)));
        let vendors = VendorClient::new(mock.client());

        let err = vendors
            .set_availability(&Caller::vendor(UserId(11)), VendorId(1), Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, VendorError::Forbidden(_)));
        mock.verify();
    }

    #[tokio::test]
    async fn anonymous_cannot_register() {
        let mock = MockClient::<VendorProfile>::new();
        let vendors = VendorClient::new(mock.client());
        let params = VendorCreate {
            owner_id: UserId(1),
            business_name: "Taqueria".into(),
            delivery_fee: Money::ZERO,
            availability: Vec::new(),
        };
        let err = vendors.register(&Caller::Anonymous, params).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    }
}

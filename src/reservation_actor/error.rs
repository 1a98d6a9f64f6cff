//! Error types for the Reservation actor.

use crate::error::{Classify, ErrorKind};
use crate::identity::Unauthenticated;
use crate::user_actor::UserError;
use crate::vendor_actor::VendorError;
use thiserror::Error;

/// Errors that can occur during reservation operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReservationError {
    #[error("Reservation not found: {0}")]
    NotFound(String),

    #[error("Reservation validation error: {0}")]
    ValidationError(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The reservation's current status does not allow the change.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Unauthenticated(#[from] Unauthenticated),

    /// Vendor lookup or slot claim failed; a full slot lands here.
    #[error(transparent)]
    Vendor(#[from] VendorError),

    #[error(transparent)]
    User(#[from] UserError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ReservationError {
    fn from(msg: String) -> Self {
        ReservationError::ActorCommunicationError(msg)
    }
}

impl Classify for ReservationError {
    fn kind(&self) -> ErrorKind {
        match self {
            ReservationError::NotFound(_) => ErrorKind::NotFound,
            ReservationError::ValidationError(_) => ErrorKind::ValidationError,
            ReservationError::Forbidden(_) => ErrorKind::Forbidden,
            ReservationError::Conflict(_) => ErrorKind::Conflict,
            ReservationError::Unauthenticated(e) => e.kind(),
            ReservationError::Vendor(e) => e.kind(),
            ReservationError::User(e) => e.kind(),
            ReservationError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }
}

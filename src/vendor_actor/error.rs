//! Error types for the Vendor actor.

use crate::availability::SlotRejection;
use crate::error::{Classify, ErrorKind};
use crate::identity::Unauthenticated;
use thiserror::Error;

/// Errors that can occur during vendor operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VendorError {
    /// The requested vendor was not found.
    #[error("Vendor not found: {0}")]
    NotFound(String),

    /// The vendor data provided is invalid.
    #[error("Vendor validation error: {0}")]
    ValidationError(String),

    /// The caller does not own this vendor.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Unauthenticated(#[from] Unauthenticated),

    /// A reservation slot could not be claimed.
    #[error(transparent)]
    Slot(#[from] SlotRejection),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for VendorError {
    fn from(msg: String) -> Self {
        VendorError::ActorCommunicationError(msg)
    }
}

impl Classify for VendorError {
    fn kind(&self) -> ErrorKind {
        match self {
            VendorError::NotFound(_) => ErrorKind::NotFound,
            VendorError::ValidationError(_) => ErrorKind::ValidationError,
            VendorError::Forbidden(_) => ErrorKind::Forbidden,
            VendorError::Unauthenticated(e) => e.kind(),
            VendorError::Slot(rejection) => rejection.kind(),
            VendorError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }
}

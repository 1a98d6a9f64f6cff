//! Error types for the Menu actor.

use crate::error::{Classify, ErrorKind};
use crate::identity::Unauthenticated;
use crate::vendor_actor::VendorError;
use thiserror::Error;

/// Errors that can occur during menu operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    /// The requested menu item was not found.
    #[error("Menu item not found: {0}")]
    NotFound(String),

    /// The menu item data provided is invalid.
    #[error("Menu item validation error: {0}")]
    ValidationError(String),

    /// The caller does not own the vendor this item belongs to.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Unauthenticated(#[from] Unauthenticated),

    /// Resolving the owning vendor failed.
    #[error(transparent)]
    Vendor(#[from] VendorError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for MenuError {
    fn from(msg: String) -> Self {
        MenuError::ActorCommunicationError(msg)
    }
}

impl Classify for MenuError {
    fn kind(&self) -> ErrorKind {
        match self {
            MenuError::NotFound(_) => ErrorKind::NotFound,
            MenuError::ValidationError(_) => ErrorKind::ValidationError,
            MenuError::Forbidden(_) => ErrorKind::Forbidden,
            MenuError::Unauthenticated(e) => e.kind(),
            MenuError::Vendor(e) => e.kind(),
            MenuError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }
}

//! Error types for the Cart actor.

use crate::error::{Classify, ErrorKind};
use crate::identity::Unauthenticated;
use crate::menu_actor::MenuError;
use crate::vendor_actor::VendorError;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// No cart, or no line for the given dish.
    #[error("Cart not found: {0}")]
    NotFound(String),

    #[error("Cart validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Unauthenticated(#[from] Unauthenticated),

    /// Looking up the dish failed.
    #[error(transparent)]
    Menu(#[from] MenuError),

    /// Looking up the dish's vendor failed.
    #[error(transparent)]
    Vendor(#[from] VendorError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}

impl Classify for CartError {
    fn kind(&self) -> ErrorKind {
        match self {
            CartError::NotFound(_) => ErrorKind::NotFound,
            CartError::ValidationError(_) => ErrorKind::ValidationError,
            CartError::Unauthenticated(e) => e.kind(),
            CartError::Menu(e) => e.kind(),
            CartError::Vendor(e) => e.kind(),
            CartError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }
}

//! Error types for the Order actor.

use crate::cart_actor::CartError;
use crate::error::{Classify, ErrorKind};
use crate::identity::Unauthenticated;
use crate::menu_actor::MenuError;
use crate::vendor_actor::VendorError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order data provided is invalid, or the cart cannot be checked out.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The order's current status does not allow the change.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Unauthenticated(#[from] Unauthenticated),

    #[error(transparent)]
    Cart(#[from] CartError),

    /// A cart line no longer resolves to a dish.
    #[error(transparent)]
    Menu(#[from] MenuError),

    #[error(transparent)]
    Vendor(#[from] VendorError),

    /// Checkout failed and the cart could not be put back.
    #[error("Checkout left an inconsistent state: {0}")]
    Inconsistent(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl Classify for OrderError {
    fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NotFound(_) => ErrorKind::NotFound,
            OrderError::ValidationError(_) => ErrorKind::ValidationError,
            OrderError::Forbidden(_) => ErrorKind::Forbidden,
            OrderError::Conflict(_) => ErrorKind::Conflict,
            OrderError::Unauthenticated(e) => e.kind(),
            OrderError::Cart(e) => e.kind(),
            OrderError::Menu(e) => e.kind(),
            OrderError::Vendor(e) => e.kind(),
            OrderError::Inconsistent(_) | OrderError::ActorCommunicationError(_) => {
                ErrorKind::Internal
            }
        }
    }
}

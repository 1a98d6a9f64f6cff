//! # Caller Identity
//!
//! Authentication happens outside this crate. Every operation receives a [`Caller`]: either
//! anonymous or a [`Principal`] the auth layer vouches for.
//!
//! The crate trusts whatever [`Caller`] it is handed. Only the auth boundary (the session or
//! token layer in front of the clients) may build one from a verified identity; request data
//! such as a user ID field in a payload must never be turned into a `Caller` directly.
//!
//! Internal services that must act for a user without a session present the configured
//! internal secret to an [`InternalGate`] and get back a [`TrustedCaller`]. That is the only
//! path inside the crate that turns a bare user ID into a principal.

use crate::error::{Classify, ErrorKind};
use crate::model::{Role, UserId};
use thiserror::Error;

/// An authenticated user and the role the auth layer asserted for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    Authenticated(Principal),
}

/// Constructors for the auth boundary. They assert the role without checking it.
impl Caller {
    pub fn user(user_id: UserId) -> Self {
        Caller::Authenticated(Principal::new(user_id, Role::User))
    }

    pub fn vendor(user_id: UserId) -> Self {
        Caller::Authenticated(Principal::new(user_id, Role::Vendor))
    }

    pub fn admin(user_id: UserId) -> Self {
        Caller::Authenticated(Principal::new(user_id, Role::Admin))
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Caller::Anonymous => None,
            Caller::Authenticated(principal) => Some(principal),
        }
    }

    /// The principal, or [`Unauthenticated`] for anonymous callers.
    pub fn require(&self) -> Result<&Principal, Unauthenticated> {
        self.principal().ok_or(Unauthenticated)
    }
}

impl From<Principal> for Caller {
    fn from(principal: Principal) -> Self {
        Caller::Authenticated(principal)
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Authentication required")]
pub struct Unauthenticated;

impl Classify for Unauthenticated {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Unauthenticated
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("Trusted internal callers are disabled")]
    Disabled,

    #[error("Internal caller secret rejected")]
    Rejected,
}

impl Classify for GateError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Forbidden
    }
}

/// Checks internal-caller secrets. With no secret configured every attempt is refused.
#[derive(Clone)]
pub struct InternalGate {
    secret: Option<String>,
}

impl std::fmt::Debug for InternalGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InternalGate")
            .field("enabled", &self.secret.is_some())
            .finish()
    }
}

impl InternalGate {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    #[tracing::instrument(skip_all)]
    pub fn authorize(&self, presented: &str) -> Result<TrustedCaller, GateError> {
        let Some(secret) = &self.secret else {
            tracing::warn!("Trusted caller requested but no internal secret is configured");
            return Err(GateError::Disabled);
        };
        if constant_time_eq(secret.as_bytes(), presented.as_bytes()) {
            Ok(TrustedCaller { _sealed: () })
        } else {
            tracing::warn!("Internal caller secret rejected");
            Err(GateError::Rejected)
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Capability to act on behalf of any user. Only [`InternalGate::authorize`] creates one.
#[derive(Debug)]
pub struct TrustedCaller {
    _sealed: (),
}

impl TrustedCaller {
    pub fn act_as(&self, user_id: UserId, role: Role) -> Caller {
        tracing::info!(%user_id, role = role.as_str(), "Trusted caller acting for user");
        Caller::Authenticated(Principal::new(user_id, role))
    }
}

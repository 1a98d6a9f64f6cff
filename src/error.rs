//! # Error Classification
//!
//! Every actor defines its own `thiserror` enum. Callers outside the crate only need to know
//! *what kind* of failure happened, so each of those enums implements [`Classify`], which maps
//! it onto a stable [`ErrorKind`] code and renders an [`ErrorBody`].

use serde::Serialize;

/// The stable failure categories exposed to callers.
///
/// Serializes as `VALIDATION_ERROR`, `NOT_FOUND`, `FORBIDDEN`, `CONFLICT`, `CAPACITY_EXCEEDED`,
/// `UNAUTHENTICATED` and `INTERNAL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Missing or malformed input.
    ValidationError,
    /// A referenced cart, order, reservation, menu item, vendor or user is absent.
    NotFound,
    /// Authenticated, but not allowed to touch the target resource.
    Forbidden,
    /// Valid request that the entity's current state disallows.
    Conflict,
    /// The requested slot is fully booked.
    CapacityExceeded,
    /// Anonymous caller on a protected operation.
    Unauthenticated,
    /// Actor communication failure or an unrecoverable inconsistency.
    Internal,
}

impl ErrorKind {
    pub const fn code(self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::CapacityExceeded => "CAPACITY_EXCEEDED",
            ErrorKind::Unauthenticated => "UNAUTHENTICATED",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// The serializable failure payload: `{"code": "...", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: ErrorKind,
    pub message: String,
}

/// Maps a domain error onto its stable [`ErrorKind`].
pub trait Classify: std::error::Error {
    fn kind(&self) -> ErrorKind;

    fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: self.kind(),
            message: self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("slot is full")]
    struct Full;

    impl Classify for Full {
        fn kind(&self) -> ErrorKind {
            ErrorKind::CapacityExceeded
        }
    }

    #[test]
    fn body_carries_code_and_message() {
        let body = Full.to_body();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "CAPACITY_EXCEEDED");
        assert_eq!(json["message"], "slot is full");
    }

    #[test]
    fn serialized_kind_matches_code() {
        for kind in [
            ErrorKind::ValidationError,
            ErrorKind::NotFound,
            ErrorKind::Forbidden,
            ErrorKind::Conflict,
            ErrorKind::CapacityExceeded,
            ErrorKind::Unauthenticated,
            ErrorKind::Internal,
        ] {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.code());
        }
    }
}

//! # Framework Errors
//!
//! Common error types used throughout the actor framework. Entity errors travel boxed inside
//! [`FrameworkError::EntityError`] and are recovered with [`FrameworkError::downcast`].

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's own error type.
    ///
    /// Returns `Err(self)` unchanged when this is not an entity error of type `E`, so callers
    /// can fall through to mapping the framework variants.
    pub fn downcast<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("slot full")]
    struct SlotFull;

    #[derive(Debug, thiserror::Error)]
    #[error("other")]
    struct Other;

    #[test]
    fn downcast_recovers_entity_error() {
        let err = FrameworkError::EntityError(Box::new(SlotFull));
        assert_eq!(err.downcast::<SlotFull>().unwrap(), SlotFull);
    }

    #[test]
    fn downcast_keeps_foreign_errors() {
        let err = FrameworkError::EntityError(Box::new(Other));
        let back = err.downcast::<SlotFull>().unwrap_err();
        assert!(matches!(back, FrameworkError::EntityError(_)));

        let not_found = FrameworkError::NotFound("cart_1".into());
        let back = not_found.downcast::<SlotFull>().unwrap_err();
        assert!(matches!(back, FrameworkError::NotFound(id) if id == "cart_1"));
    }
}

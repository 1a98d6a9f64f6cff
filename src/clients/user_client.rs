//! # User Client
//!
//! Provides a high-level API for the user directory. Reservations read display names from here.
use crate::model::{User, UserCreate, UserId, UserUpdate};
use crate::user_actor::UserError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn register(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Like [`ActorClient::get`], but a missing user is an error.
    #[instrument(skip(self))]
    pub async fn find_user(&self, id: UserId) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner
            .get(id)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast::<UserError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => UserError::NotFound(id),
            Err(other) => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use actor_framework::mock::MockClient;

    #[tokio::test]
    async fn find_user_turns_absence_into_not_found() {
        let mut mock = MockClient::<User>::new();
        mock.expect_get(UserId(3)).return_ok(None);
        let client = UserClient::new(mock.client());

        let err = client.find_user(UserId(3)).await.unwrap_err();
        assert_eq!(err, UserError::NotFound("user_3".into()));
        mock.verify();
    }

    #[tokio::test]
    async fn entity_errors_survive_the_round_trip() {
        let mut mock = MockClient::<User>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(
                UserError::ValidationError("name must not be empty".into()),
            )));
        let client = UserClient::new(mock.client());

        let err = client
            .register(UserCreate {
                name: String::new(),
                email: "a@b.co".into(),
                role: Role::User,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::ValidationError(_)));
    }
}

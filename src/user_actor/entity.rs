//! [`ActorEntity`] implementation for [`User`].

use crate::model::{User, UserCreate, UserId, UserUpdate};
use crate::user_actor::UserError;
use actor_framework::ActorEntity;
use async_trait::async_trait;

fn check_name(name: &str) -> Result<(), UserError> {
    if name.trim().is_empty() {
        return Err(UserError::ValidationError("name must not be empty".into()));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), UserError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(UserError::ValidationError(format!(
            "invalid email address '{email}'"
        ))),
    }
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        check_name(&params.name)?;
        check_email(&params.email)?;
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            role: params.role,
        })
    }

    /// # Fields Updated
    /// - `name`: display name
    /// - `email`: contact address
    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = &update.name {
            check_name(name)?;
        }
        if let Some(email) = &update.email {
            check_email(email)?;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

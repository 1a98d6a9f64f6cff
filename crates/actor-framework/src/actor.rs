//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns the state of one entity
//! type. It implements the "Server" side of the Actor Model, processing messages sequentially
//! and so giving every entity exclusive, lock-free access to its own state.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This struct is the "Server" half of the actor. It owns the store and the receiver end of the
/// channel. Each instance processes its own messages one at a time, so two requests against the
/// same entity can never interleave; no `Mutex` or `RwLock` guards the store.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the `actor` (server) and `client` (interface).
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// # Store Semantics
///
/// * **IDs**: `create` draws IDs from an internal `u32` counter, skipping any ID already taken
///   by `insert`/`upsert`, which use caller-chosen IDs.
/// * **Expiry**: entities reporting [`ActorEntity::is_expired`] are evicted when touched and
///   behave as absent. `query` sweeps the whole store first.
/// * **Vacancy**: after a successful `update`, `action` or `upsert`, an entity reporting
///   [`ActorEntity::is_vacant`] is removed. The caller still receives the result computed
///   before removal.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
    entity_type: &'static str,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel. When the channel is full, client
    /// calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        // Just the type name ("Cart" rather than "food_market::model::cart::Cart")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
            entity_type,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. It can hold clients of actors
    /// created after this one, as long as they exist before the loop starts.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let _ = respond_to.send(self.create(params, &context).await);
                }
                ResourceRequest::Insert {
                    id,
                    item,
                    respond_to,
                } => {
                    debug!(entity_type, %id, "Insert");
                    let _ = respond_to.send(self.insert(id, item));
                }
                ResourceRequest::Get { id, respond_to } => {
                    self.evict_expired(&id);
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let _ = respond_to.send(self.update(id, update, &context).await);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let _ = respond_to.send(self.delete(id, &context).await);
                }
                ResourceRequest::Take { id, respond_to } => {
                    debug!(entity_type, %id, "Take");
                    let _ = respond_to.send(self.take(id, &context).await);
                }
                ResourceRequest::Upsert {
                    id,
                    params,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?params, ?action, "Upsert");
                    let _ = respond_to.send(self.upsert(id, params, action, &context).await);
                }
                ResourceRequest::Query { filter, respond_to } => {
                    let _ = respond_to.send(Ok(self.query(&filter)));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let _ = respond_to.send(self.action(id, action, &context).await);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let mut id = self.allocate_id();
        while self.store.contains_key(&id) {
            id = self.allocate_id();
        }

        let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(entity_type = self.entity_type, error = %e, "Create failed");
            entity_error(e)
        })?;
        if let Err(e) = item.on_create(context).await {
            warn!(entity_type = self.entity_type, error = %e, "on_create failed");
            return Err(entity_error(e));
        }

        self.store.insert(id.clone(), item);
        info!(entity_type = self.entity_type, %id, size = self.store.len(), "Created");
        Ok(id)
    }

    fn insert(&mut self, id: T::Id, item: T) -> Result<(), FrameworkError> {
        self.evict_expired(&id);
        if self.store.contains_key(&id) {
            warn!(entity_type = self.entity_type, %id, "Already exists");
            return Err(FrameworkError::AlreadyExists(id.to_string()));
        }
        self.store.insert(id.clone(), item);
        info!(entity_type = self.entity_type, %id, size = self.store.len(), "Inserted");
        Ok(())
    }

    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        self.evict_expired(&id);
        let Some(item) = self.store.get_mut(&id) else {
            warn!(entity_type = self.entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        if let Err(e) = item.on_update(update, context).await {
            warn!(entity_type = self.entity_type, %id, error = %e, "Update failed");
            return Err(entity_error(e));
        }
        let snapshot = item.clone();
        info!(entity_type = self.entity_type, %id, "Updated");
        self.remove_if_vacant(&id);
        Ok(snapshot)
    }

    async fn delete(&mut self, id: T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        self.evict_expired(&id);
        let Some(item) = self.store.get(&id) else {
            warn!(entity_type = self.entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        if let Err(e) = item.on_delete(context).await {
            warn!(entity_type = self.entity_type, %id, error = %e, "on_delete failed");
            return Err(entity_error(e));
        }
        self.store.remove(&id);
        info!(entity_type = self.entity_type, %id, size = self.store.len(), "Deleted");
        Ok(())
    }

    async fn take(&mut self, id: T::Id, context: &T::Context) -> Result<Option<T>, FrameworkError> {
        self.evict_expired(&id);
        let Some(item) = self.store.get(&id) else {
            debug!(entity_type = self.entity_type, %id, "Nothing to take");
            return Ok(None);
        };
        if let Err(e) = item.on_delete(context).await {
            warn!(entity_type = self.entity_type, %id, error = %e, "on_delete failed");
            return Err(entity_error(e));
        }
        let taken = self.store.remove(&id);
        info!(entity_type = self.entity_type, %id, size = self.store.len(), "Taken");
        Ok(taken)
    }

    async fn upsert(
        &mut self,
        id: T::Id,
        params: T::Create,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.evict_expired(&id);
        let created = !self.store.contains_key(&id);
        if created {
            let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
                warn!(entity_type = self.entity_type, %id, error = %e, "Create failed");
                entity_error(e)
            })?;
            if let Err(e) = item.on_create(context).await {
                warn!(entity_type = self.entity_type, %id, error = %e, "on_create failed");
                return Err(entity_error(e));
            }
            self.store.insert(id.clone(), item);
            info!(entity_type = self.entity_type, %id, size = self.store.len(), "Created");
        }

        let Some(item) = self.store.get_mut(&id) else {
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        let outcome = item.handle_action(action, context).await;
        match outcome {
            Ok(result) => {
                info!(entity_type = self.entity_type, %id, "Action ok");
                self.remove_if_vacant(&id);
                Ok(result)
            }
            Err(e) => {
                warn!(entity_type = self.entity_type, %id, error = %e, "Action failed");
                // A rejected first action leaves nothing behind.
                if created {
                    self.store.remove(&id);
                }
                Err(entity_error(e))
            }
        }
    }

    fn query(&mut self, filter: &Filter<T>) -> Vec<T> {
        self.sweep_expired();
        let matches: Vec<T> = self
            .store
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        debug!(entity_type = self.entity_type, matched = matches.len(), "Query");
        matches
    }

    async fn action(
        &mut self,
        id: T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.evict_expired(&id);
        let Some(item) = self.store.get_mut(&id) else {
            warn!(entity_type = self.entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        let outcome = item.handle_action(action, context).await;
        match outcome {
            Ok(result) => {
                info!(entity_type = self.entity_type, %id, "Action ok");
                self.remove_if_vacant(&id);
                Ok(result)
            }
            Err(e) => {
                warn!(entity_type = self.entity_type, %id, error = %e, "Action failed");
                Err(entity_error(e))
            }
        }
    }

    fn allocate_id(&mut self) -> T::Id {
        let id = T::Id::from(self.next_id);
        self.next_id += 1;
        id
    }

    fn evict_expired(&mut self, id: &T::Id) {
        if self.store.get(id).is_some_and(|item| item.is_expired()) {
            self.store.remove(id);
            info!(entity_type = self.entity_type, %id, size = self.store.len(), "Expired");
        }
    }

    fn sweep_expired(&mut self) {
        let before = self.store.len();
        self.store.retain(|_, item| !item.is_expired());
        let evicted = before - self.store.len();
        if evicted > 0 {
            info!(entity_type = self.entity_type, evicted, size = self.store.len(), "Expired");
        }
    }

    fn remove_if_vacant(&mut self, id: &T::Id) {
        if self.store.get(id).is_some_and(|item| item.is_vacant()) {
            self.store.remove(id);
            info!(entity_type = self.entity_type, %id, size = self.store.len(), "Vacated");
        }
    }
}

fn entity_error<E>(e: E) -> FrameworkError
where
    E: std::error::Error + Send + Sync + 'static,
{
    FrameworkError::EntityError(Box::new(e))
}

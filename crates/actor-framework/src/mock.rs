//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a queue
//! of expectations instead of by an actor. Entities that talk to other actors through their
//! `Context` can then be tested against scripted neighbours.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Determinism** | Scripted replies, in order | Subject to scheduler |
//! | **State** | None (expectations only) | Real store |
//! | **Use Case** | An actor's dependencies | The actor under test, or the full system |
//! | **Error Injection** | `return_err` | Requires building the failing state |
//!
//! ## Testing Strategies
//!
//! <details>
//! <summary><b>Pattern 1: Scripted Dependency</b></summary>
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Kitchen { id: u32, open: bool }
//! #[derive(Debug)] struct KitchenCreate;
//! #[derive(Debug)] struct KitchenUpdate;
//! #[derive(Debug)] enum KitchenAction { Close }
//! #[derive(Debug, thiserror::Error)] #[error("kitchen error")] struct KitchenError;
//!
//! #[async_trait]
//! impl ActorEntity for Kitchen {
//!     type Id = u32; type Create = KitchenCreate; type Update = KitchenUpdate;
//!     type Action = KitchenAction; type ActionResult = bool; type Context = (); type Error = KitchenError;
//!     fn from_create_params(id: u32, _: KitchenCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, open: true })
//!     }
//!     async fn on_update(&mut self, _: KitchenUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: KitchenAction, _: &()) -> Result<bool, Self::Error> {
//!         self.open = false;
//!         Ok(self.open)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Kitchen>::new();
//!     mock.expect_get(1).return_ok(Some(Kitchen { id: 1, open: true }));
//!     mock.expect_action(1).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.get(1).await.unwrap().unwrap().open);
//!     let closed = client.perform_action(1, KitchenAction::Close).await;
//!     assert!(matches!(closed, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//! </details>
//!
//! <details>
//! <summary><b>Pattern 2: Actor with Mocked Dependencies</b></summary>
//!
//! Run the real actor under test and pass mock clients as its context. See
//! `tests/order_actor_test.rs` in the `food-market` crate.
//! </details>
//!
//! <details>
//! <summary><b>Pattern 3: Full System</b></summary>
//!
//! See `tests/integration_test.rs` in the `food-market` crate.
//! </details>
//!
//! ## Manual Responders
//!
//! [`create_mock_client`] returns the raw receiver instead. Pull requests off it with the
//! `expect_*` helper functions and answer them by hand, which lets a test inspect payloads.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A queued reply. Keyed requests also carry the ID the request must name.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Insert {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Take {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Upsert {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Query {
        response: Result<Vec<T>, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

/// A mock client with expectation tracking.
///
/// Expectations are consumed strictly in the order they were queued. A request that does not
/// match the next expectation (wrong kind or wrong ID) panics the responder task, and the caller
/// observes `FrameworkError::ActorDropped`.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .expect("mock expectations poisoned")
                    .pop_front();
                answer(request, expectation);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_insert(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Insert { id, response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_take(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Take { id, response })
    }

    pub fn expect_upsert(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Upsert { id, response })
    }

    /// Expects a `query`. The filter is not evaluated; the queued rows are returned as-is.
    pub fn expect_query(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::Query { response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("mock expectations poisoned")
            .len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn builder<R>(
        &self,
        wrap: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap: Box::new(wrap),
        }
    }
}

fn answer<T: ActorEntity>(request: ResourceRequest<T>, expectation: Option<Expectation<T>>) {
    match (request, expectation) {
        (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
            assert_eq!(id, want, "get: unexpected id");
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Insert { id, respond_to, .. },
            Some(Expectation::Insert { id: want, response }),
        ) => {
            assert_eq!(id, want, "insert: unexpected id");
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Update { id, respond_to, .. },
            Some(Expectation::Update { id: want, response }),
        ) => {
            assert_eq!(id, want, "update: unexpected id");
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Delete { id, respond_to },
            Some(Expectation::Delete { id: want, response }),
        ) => {
            assert_eq!(id, want, "delete: unexpected id");
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Take { id, respond_to }, Some(Expectation::Take { id: want, response })) => {
            assert_eq!(id, want, "take: unexpected id");
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Upsert { id, respond_to, .. },
            Some(Expectation::Upsert { id: want, response }),
        ) => {
            assert_eq!(id, want, "upsert: unexpected id");
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Query { respond_to, .. }, Some(Expectation::Query { response })) => {
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Action { id, respond_to, .. },
            Some(Expectation::Action { id: want, response }),
        ) => {
            assert_eq!(id, want, "action: unexpected id");
            let _ = respond_to.send(response);
        }
        (_, None) => panic!("Unexpected request with no expectation queued"),
        (_, Some(_)) => panic!("Request does not match the next expectation"),
    }
}

/// Queues one reply on a [`MockClient`].
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Queue<T>,
    wrap: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.wrap)(response);
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .push_back(expectation);
    }
}

// =============================================================================
// MANUAL RESPONDERS
// =============================================================================

/// Creates a client whose requests land on the returned receiver.
///
/// Unlike [`MockClient`] nothing answers automatically: the test pulls each request off the
/// receiver, asserts on its payload, and sends the reply itself.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Take request.
pub async fn expect_take<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Take { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Upsert request.
pub async fn expect_upsert<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Create, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Upsert {
            id,
            params,
            action,
            respond_to,
        }) => Some((id, params, action, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Insert request.
pub async fn expect_insert<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Insert {
            id,
            item,
            respond_to,
        }) => Some((id, item, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Query request. The filter is handed back for the test to apply.
pub async fn expect_query<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Filter<T>, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Query { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Action request.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Table {
        id: u32,
        seats: u32,
    }

    #[derive(Debug)]
    struct TableCreate {
        seats: u32,
    }

    #[derive(Debug)]
    struct TableUpdate;

    #[derive(Debug)]
    enum TableAction {
        Seat(u32),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("table error")]
    struct TableError;

    #[async_trait]
    impl ActorEntity for Table {
        type Id = u32;
        type Create = TableCreate;
        type Update = TableUpdate;
        type Action = TableAction;
        type ActionResult = u32;
        type Context = ();
        type Error = TableError;

        fn from_create_params(id: u32, params: TableCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                seats: params.seats,
            })
        }

        async fn on_update(&mut self, _: TableUpdate, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, action: TableAction, _: &()) -> Result<u32, Self::Error> {
            let TableAction::Seat(n) = action;
            self.seats -= n;
            Ok(self.seats)
        }
    }

    #[tokio::test]
    async fn manual_responder_sees_payloads() {
        let (client, mut receiver) = create_mock_client::<Table>(10);

        let create_task = tokio::spawn(async move { client.create(TableCreate { seats: 4 }).await });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.seats, 4);
        responder.send(Ok(7)).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn manual_query_hands_back_the_filter() {
        let (client, mut receiver) = create_mock_client::<Table>(10);

        let task = tokio::spawn(async move { client.query(|t: &Table| t.seats >= 4).await });

        let (filter, responder) = expect_query(&mut receiver).await.unwrap();
        let rows: Vec<Table> = [2, 4, 6]
            .into_iter()
            .map(|seats| Table { id: seats, seats })
            .filter(|t| filter.matches(t))
            .collect();
        responder.send(Ok(rows)).unwrap();

        let found = task.await.unwrap().unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn expectations_are_consumed_in_order() {
        let mut mock = MockClient::<Table>::new();
        mock.expect_take(1)
            .return_ok(Some(Table { id: 1, seats: 2 }));
        mock.expect_insert(1).return_ok(());
        mock.expect_upsert(3).return_ok(5);

        let client = mock.client();
        let taken = client.take(1).await.unwrap().unwrap();
        client.insert(1, taken).await.unwrap();
        let left = client
            .upsert(3, TableCreate { seats: 6 }, TableAction::Seat(1))
            .await
            .unwrap();
        assert_eq!(left, 5);

        mock.verify();
    }

    #[tokio::test]
    async fn mismatched_request_drops_the_reply() {
        let mut mock = MockClient::<Table>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn verify_reports_leftovers() {
        let mut mock = MockClient::<Table>::new();
        mock.expect_delete(1).return_ok(());
        mock.verify();
    }
}

use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
use async_trait::async_trait;

// --- Test Entity ---

/// A bar tab: a list of line items that disappears once settled.
#[derive(Clone, Debug, PartialEq)]
struct Tab {
    id: u32,
    lines: Vec<u32>,
    stale: bool,
}

#[derive(Debug)]
struct TabCreate;

#[derive(Debug)]
struct TabUpdate {
    stale: bool,
}

#[derive(Debug)]
enum TabAction {
    Add(u32),
    Settle,
}

#[derive(Debug, PartialEq, thiserror::Error)]
enum TabError {
    #[error("zero-priced line")]
    ZeroLine,
}

#[async_trait]
impl ActorEntity for Tab {
    type Id = u32;
    type Create = TabCreate;
    type Update = TabUpdate;
    type Action = TabAction;
    type ActionResult = usize;
    type Context = ();
    type Error = TabError;

    fn from_create_params(id: u32, _: TabCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            lines: Vec::new(),
            stale: false,
        })
    }

    async fn on_update(&mut self, update: TabUpdate, _: &()) -> Result<(), Self::Error> {
        self.stale = update.stale;
        Ok(())
    }

    async fn handle_action(&mut self, action: TabAction, _: &()) -> Result<usize, Self::Error> {
        match action {
            TabAction::Add(0) => Err(TabError::ZeroLine),
            TabAction::Add(price) => {
                self.lines.push(price);
                Ok(self.lines.len())
            }
            TabAction::Settle => {
                self.lines.clear();
                Ok(0)
            }
        }
    }

    fn is_expired(&self) -> bool {
        self.stale
    }

    fn is_vacant(&self) -> bool {
        self.lines.is_empty()
    }
}

fn tab(id: u32, lines: Vec<u32>) -> Tab {
    Tab {
        id,
        lines,
        stale: false,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Tab>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(TabCreate).await.unwrap();
    assert_eq!(id, 1);

    let count = client.perform_action(id, TabAction::Add(5)).await.unwrap();
    assert_eq!(count, 1);

    let fetched = client.get(id).await.unwrap().unwrap();
    assert_eq!(fetched.lines, vec![5]);

    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(matches!(
        client.delete(id).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn upsert_creates_on_first_use() {
    let (actor, client) = ResourceActor::<Tab>::new(10);
    tokio::spawn(actor.run(()));

    assert_eq!(client.upsert(42, TabCreate, TabAction::Add(3)).await.unwrap(), 1);
    assert_eq!(client.upsert(42, TabCreate, TabAction::Add(4)).await.unwrap(), 2);

    let fetched = client.get(42).await.unwrap().unwrap();
    assert_eq!(fetched.lines, vec![3, 4]);
}

#[tokio::test]
async fn failed_first_upsert_leaves_nothing_behind() {
    let (actor, client) = ResourceActor::<Tab>::new(10);
    tokio::spawn(actor.run(()));

    let err = client
        .upsert(9, TabCreate, TabAction::Add(0))
        .await
        .unwrap_err();
    assert_eq!(err.downcast::<TabError>().unwrap(), TabError::ZeroLine);
    assert!(client.get(9).await.unwrap().is_none());
}

#[tokio::test]
async fn failed_action_keeps_existing_state() {
    let (actor, client) = ResourceActor::<Tab>::new(10);
    tokio::spawn(actor.run(()));

    client.insert(1, tab(1, vec![8])).await.unwrap();
    assert!(client.perform_action(1, TabAction::Add(0)).await.is_err());
    assert_eq!(client.get(1).await.unwrap().unwrap().lines, vec![8]);
}

#[tokio::test]
async fn vacant_entity_is_removed_after_mutation() {
    let (actor, client) = ResourceActor::<Tab>::new(10);
    tokio::spawn(actor.run(()));

    client.upsert(3, TabCreate, TabAction::Add(2)).await.unwrap();
    let left = client.perform_action(3, TabAction::Settle).await.unwrap();
    assert_eq!(left, 0);
    assert!(client.get(3).await.unwrap().is_none());
}

#[tokio::test]
async fn take_removes_and_insert_restores() {
    let (actor, client) = ResourceActor::<Tab>::new(10);
    tokio::spawn(actor.run(()));

    client.insert(5, tab(5, vec![1, 2])).await.unwrap();
    let taken = client.take(5).await.unwrap().unwrap();
    assert!(client.get(5).await.unwrap().is_none());
    assert!(client.take(5).await.unwrap().is_none());

    client.insert(5, taken.clone()).await.unwrap();
    assert!(matches!(
        client.insert(5, taken).await,
        Err(FrameworkError::AlreadyExists(_))
    ));
}

#[tokio::test]
async fn create_skips_ids_taken_by_insert() {
    let (actor, client) = ResourceActor::<Tab>::new(10);
    tokio::spawn(actor.run(()));

    client.insert(1, tab(1, vec![1])).await.unwrap();
    client.insert(2, tab(2, vec![1])).await.unwrap();
    assert_eq!(client.create(TabCreate).await.unwrap(), 3);
}

#[tokio::test]
async fn expired_entity_behaves_as_absent() {
    let (actor, client) = ResourceActor::<Tab>::new(10);
    tokio::spawn(actor.run(()));

    client.insert(1, tab(1, vec![4])).await.unwrap();
    client.insert(2, tab(2, vec![6])).await.unwrap();
    client.update(1, TabUpdate { stale: true }).await.unwrap();

    assert!(client.get(1).await.unwrap().is_none());
    // A fresh tab replaces the expired one
    assert_eq!(client.upsert(1, TabCreate, TabAction::Add(7)).await.unwrap(), 1);

    client.update(2, TabUpdate { stale: true }).await.unwrap();
    let live = client.query(|_: &Tab| true).await.unwrap();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].lines, vec![7]);
}

#[tokio::test]
async fn closed_actor_reports_actor_closed() {
    let (actor, client) = ResourceActor::<Tab>::new(10);
    drop(actor);
    assert!(matches!(
        client.get(1).await,
        Err(FrameworkError::ActorClosed)
    ));
}

//! Behaviour tests for the directory store.
//!
//! These scenarios exercise the store through its public API: mutations,
//! the role deletion guard, listener fan-out and snapshot round-trips.

use std::cell::RefCell;
use std::rc::Rc;

use rbac_admin::domain::ports::{SnapshotKey, SnapshotStorage};
use rbac_admin::domain::{
    DirectoryStore, NewUser, RoleId, StoreError, Subscription, UserId, UserPatch,
};
use rbac_admin::outbound::storage::MemorySnapshotStorage;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// User counts observed by each listener, one entry per notification.
type Observations = Rc<RefCell<Vec<Vec<usize>>>>;

struct StoreWorld {
    storage: MemorySnapshotStorage,
    store: RefCell<Option<DirectoryStore>>,
    subscriptions: RefCell<Vec<Subscription>>,
    observations: Observations,
    outcome: RefCell<Option<Result<(), StoreError>>>,
    open_error: RefCell<Option<StoreError>>,
}

impl StoreWorld {
    fn new() -> Self {
        Self {
            storage: MemorySnapshotStorage::new(),
            store: RefCell::new(None),
            subscriptions: RefCell::new(Vec::new()),
            observations: Rc::new(RefCell::new(Vec::new())),
            outcome: RefCell::new(None),
            open_error: RefCell::new(None),
        }
    }

    fn open(&self) {
        match DirectoryStore::open(self.storage.clone()) {
            Ok(store) => *self.store.borrow_mut() = Some(store),
            Err(err) => *self.open_error.borrow_mut() = Some(err),
        }
    }

    fn with_store<T>(&self, f: impl FnOnce(&mut DirectoryStore) -> T) -> T {
        let mut store = self.store.borrow_mut();
        f(store.as_mut().expect("store should be open"))
    }

    fn record(&self, result: Result<(), StoreError>) {
        *self.outcome.borrow_mut() = Some(result);
    }

    fn outcome(&self) -> Result<(), StoreError> {
        self.outcome
            .borrow()
            .clone()
            .expect("an operation should have run")
    }
}

#[fixture]
fn world() -> StoreWorld {
    StoreWorld::new()
}

#[given("a store opened over empty storage")]
fn a_store_opened_over_empty_storage(world: &StoreWorld) {
    world.open();
}

#[given("{count} listeners are subscribed")]
fn listeners_are_subscribed(world: &StoreWorld, count: usize) {
    for index in 0..count {
        world.observations.borrow_mut().push(Vec::new());
        let sink = Rc::clone(&world.observations);
        let subscription = world.with_store(|store| {
            store.subscribe(move |_, state| {
                if let Some(seen) = sink.borrow_mut().get_mut(index) {
                    seen.push(state.users().len());
                }
            })
        });
        world.subscriptions.borrow_mut().push(subscription);
    }
}

#[given("storage holding a corrupt users snapshot")]
fn storage_holding_a_corrupt_users_snapshot(world: &StoreWorld) {
    world
        .storage
        .write(SnapshotKey::Users, "{not json")
        .expect("memory writes succeed");
}

#[when("a user named {name} is created with role {role}")]
fn a_user_is_created(world: &StoreWorld, name: String, role: String) {
    let user = NewUser {
        email: format!("{}@example.com", name.to_lowercase()),
        name,
        role,
        is_active: true,
    };
    let result = world.with_store(|store| store.create_user(user).map(drop));
    world.record(result);
}

#[when("the role with id {id} is deleted")]
fn the_role_is_deleted(world: &StoreWorld, id: String) {
    let result = world.with_store(|store| store.delete_role(&RoleId::new(id)));
    world.record(result);
}

#[when("the user with id {id} is deleted")]
fn the_user_is_deleted(world: &StoreWorld, id: String) {
    let result = world.with_store(|store| store.delete_user(&UserId::new(id)));
    world.record(result);
}

#[when("the user with id {id} is reassigned to role {role}")]
fn the_user_is_reassigned(world: &StoreWorld, id: String, role: String) {
    let patch = UserPatch {
        role: Some(role),
        ..UserPatch::default()
    };
    let result = world.with_store(|store| store.update_user(&UserId::new(id), patch).map(drop));
    world.record(result);
}

#[when("the store is reopened from the same storage")]
fn the_store_is_reopened(world: &StoreWorld) {
    world.subscriptions.borrow_mut().clear();
    world.store.borrow_mut().take();
    world.open();
}

#[when("the store is opened")]
fn the_store_is_opened(world: &StoreWorld) {
    world.open();
}

#[then("the store holds {count} users")]
fn the_store_holds_users(world: &StoreWorld, count: usize) {
    assert_eq!(world.with_store(|store| store.list_users().len()), count);
}

#[then("the store holds {count} roles")]
fn the_store_holds_roles(world: &StoreWorld, count: usize) {
    assert_eq!(world.with_store(|store| store.list_roles().len()), count);
}

#[then("each listener was notified {count} times")]
fn each_listener_was_notified(world: &StoreWorld, count: usize) {
    let observations = world.observations.borrow();
    assert!(!observations.is_empty(), "no listeners were subscribed");
    for seen in observations.iter() {
        assert_eq!(seen.len(), count);
    }
}

#[then("every listener saw {count} users")]
fn every_listener_saw_users(world: &StoreWorld, count: usize) {
    for seen in world.observations.borrow().iter() {
        assert_eq!(seen.last(), Some(&count));
    }
}

#[then("the operation is refused because the role is in use")]
fn the_operation_is_refused(world: &StoreWorld) {
    let err = world.outcome().expect_err("deletion should be refused");
    assert!(err.is_in_use(), "unexpected error: {err}");
}

#[then("the operation succeeds")]
fn the_operation_succeeds(world: &StoreWorld) {
    world.outcome().expect("operation should succeed");
}

#[then("the operation fails because the record is missing")]
fn the_operation_fails_not_found(world: &StoreWorld) {
    let err = world.outcome().expect_err("operation should fail");
    assert!(err.is_not_found(), "unexpected error: {err}");
}

#[then("a user named {name} exists")]
fn a_user_named_exists(world: &StoreWorld, name: String) {
    let found = world.with_store(|store| store.list_users().iter().any(|user| user.name == name));
    assert!(found, "no user named {name}");
}

#[then("opening fails with a corrupt snapshot error")]
fn opening_fails_with_corrupt_snapshot(world: &StoreWorld) {
    let err = world
        .open_error
        .borrow()
        .clone()
        .expect("opening should have failed");
    assert!(
        matches!(
            err,
            StoreError::CorruptSnapshot {
                key: SnapshotKey::Users,
                ..
            }
        ),
        "unexpected error: {err}"
    );
    assert!(world.store.borrow().is_none());
}

#[scenario(path = "tests/features/directory_store.feature")]
fn directory_store_scenarios(world: StoreWorld) {
    drop(world);
}

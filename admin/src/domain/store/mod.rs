//! In-process store for users and roles.
//!
//! [`DirectoryStore`] owns both collections, the snapshot storage adapter and
//! the subscription bus. Every successful mutation runs the same sequence:
//! check preconditions, change the in-memory collection, write both
//! snapshots, then publish a [`Change`] to listeners. A precondition failure
//! returns before anything is touched.
//!
//! The store is single-threaded and explicitly owned by the hosting
//! application; there is no global instance.
//!
//! # Example
//!
//! ```
//! use rbac_admin::domain::{DirectoryStore, NewUser};
//! use rbac_admin::outbound::storage::MemorySnapshotStorage;
//!
//! let mut store = DirectoryStore::open(MemorySnapshotStorage::new()).expect("open store");
//! let created = store
//!     .create_user(NewUser {
//!         name: "Ada".to_owned(),
//!         email: "ada@example.com".to_owned(),
//!         role: "user".to_owned(),
//!         is_active: true,
//!     })
//!     .expect("create user");
//!
//! assert_eq!(store.list_users().len(), 3);
//! assert!(store.find_user(&created.id).is_some());
//! ```

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::domain::error::StoreError;
use crate::domain::ids::{RoleId, UserId};
use crate::domain::permission::Permission;
use crate::domain::ports::{SnapshotKey, SnapshotStorage};
use crate::domain::role::{NewRole, Role, RolePatch};
use crate::domain::seed::{default_roles, default_users};
use crate::domain::state::StoreState;
use crate::domain::subscriptions::{Change, Subscription, SubscriptionBus};
use crate::domain::user::{NewUser, User, UserPatch};

/// Users, roles and their change listeners.
pub struct DirectoryStore {
    users: Vec<User>,
    roles: Vec<Role>,
    storage: Box<dyn SnapshotStorage>,
    bus: SubscriptionBus,
}

impl DirectoryStore {
    /// Build a store holding only the seed records, without reading storage.
    #[must_use]
    pub fn seeded(storage: impl SnapshotStorage + 'static) -> Self {
        Self {
            users: default_users(),
            roles: default_roles(),
            storage: Box::new(storage),
            bus: SubscriptionBus::new(),
        }
    }

    /// Build a store from the seed records, replacing each collection whose
    /// snapshot exists in `storage`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if a snapshot cannot be read and
    /// [`StoreError::CorruptSnapshot`] if one cannot be decoded or repeats an
    /// id.
    pub fn open(storage: impl SnapshotStorage + 'static) -> Result<Self, StoreError> {
        let mut store = Self::seeded(storage);

        if let Some(users) = load_snapshot::<User>(&*store.storage, SnapshotKey::Users)? {
            debug!(count = users.len(), "loaded users snapshot");
            store.users = users;
        }
        if let Some(roles) = load_snapshot::<Role>(&*store.storage, SnapshotKey::Roles)? {
            debug!(count = roles.len(), "loaded roles snapshot");
            store.roles = roles;
        }

        Ok(store)
    }

    /// Read-only view over every collection.
    #[must_use]
    pub fn state(&self) -> StoreState<'_> {
        StoreState::new(&self.users, &self.roles)
    }

    /// Users in insertion order.
    #[must_use]
    pub fn list_users(&self) -> &[User] {
        &self.users
    }

    /// Roles in insertion order.
    #[must_use]
    pub fn list_roles(&self) -> &[Role] {
        &self.roles
    }

    /// The fixed permission catalogue.
    #[must_use]
    pub fn list_permissions(&self) -> &'static [Permission] {
        self.state().permissions()
    }

    /// Look up a user by id.
    #[must_use]
    pub fn find_user(&self, id: &UserId) -> Option<&User> {
        self.state().find_user(id)
    }

    /// Look up a role by id.
    #[must_use]
    pub fn find_role(&self, id: &RoleId) -> Option<&Role> {
        self.state().find_role(id)
    }

    /// First role whose name equals `name`.
    #[must_use]
    pub fn find_role_by_name(&self, name: &str) -> Option<&Role> {
        self.state().find_role_by_name(name)
    }

    /// Register a listener invoked after every successful mutation.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&Change, StoreState<'_>) + 'static,
    {
        self.bus.subscribe(listener)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.bus.len()
    }

    /// Append a user with a freshly generated id.
    ///
    /// Neither email uniqueness nor the existence of `role` is checked.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the snapshot write fails; the user has
    /// already been added in memory at that point.
    pub fn create_user(&mut self, user: NewUser) -> Result<User, StoreError> {
        let id = fresh_id(&self.users, UserId::random);
        let created = user.into_user(id);
        self.users.push(created.clone());
        info!(user_id = %created.id, role = %created.role, "user created");

        self.commit(&Change::UserCreated(created.id.clone()))?;
        Ok(created)
    }

    /// Merge `patch` over the user with `id` and return the result.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no user has `id`, or a persistence
    /// error if the snapshot write fails.
    pub fn update_user(&mut self, id: &UserId, patch: UserPatch) -> Result<User, StoreError> {
        let user = self
            .users
            .iter_mut()
            .find(|user| &user.id == id)
            .ok_or_else(|| StoreError::user_not_found(id))?;
        patch.apply_to(user);
        let updated = user.clone();
        info!(user_id = %id, "user updated");

        self.commit(&Change::UserUpdated(id.clone()))?;
        Ok(updated)
    }

    /// Remove the user with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no user has `id`, or a persistence
    /// error if the snapshot write fails.
    pub fn delete_user(&mut self, id: &UserId) -> Result<(), StoreError> {
        let index = self
            .users
            .iter()
            .position(|user| &user.id == id)
            .ok_or_else(|| StoreError::user_not_found(id))?;
        self.users.remove(index);
        info!(user_id = %id, "user deleted");

        self.commit(&Change::UserDeleted(id.clone()))
    }

    /// Append a role with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the snapshot write fails.
    pub fn create_role(&mut self, role: NewRole) -> Result<Role, StoreError> {
        let id = fresh_id(&self.roles, RoleId::random);
        let created = role.into_role(id);
        self.roles.push(created.clone());
        info!(
            role_id = %created.id,
            name = %created.name,
            permissions = created.permissions.len(),
            "role created"
        );

        self.commit(&Change::RoleCreated(created.id.clone()))?;
        Ok(created)
    }

    /// Merge `patch` over the role with `id` and return the result.
    ///
    /// Renaming a role does not rewrite the `role` field of its users.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no role has `id`, or a persistence
    /// error if the snapshot write fails.
    pub fn update_role(&mut self, id: &RoleId, patch: RolePatch) -> Result<Role, StoreError> {
        let role = self
            .roles
            .iter_mut()
            .find(|role| &role.id == id)
            .ok_or_else(|| StoreError::role_not_found(id))?;
        patch.apply_to(role);
        let updated = role.clone();
        info!(role_id = %id, "role updated");

        self.commit(&Change::RoleUpdated(id.clone()))?;
        Ok(updated)
    }

    /// Remove the role with `id` unless a user still references its name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no role has `id`,
    /// [`StoreError::InUse`] if any user's `role` equals the role's name, or
    /// a persistence error if the snapshot write fails.
    pub fn delete_role(&mut self, id: &RoleId) -> Result<(), StoreError> {
        let Some((index, role)) = self
            .roles
            .iter()
            .enumerate()
            .find(|(_, role)| &role.id == id)
        else {
            return Err(StoreError::role_not_found(id));
        };

        if let Some(holder) = self.users.iter().find(|user| user.role == role.name) {
            warn!(
                role_id = %id,
                name = %role.name,
                user_id = %holder.id,
                "refusing to delete role still assigned to users"
            );
            return Err(StoreError::InUse {
                role: role.name.clone(),
            });
        }

        self.roles.remove(index);
        info!(role_id = %id, "role deleted");

        self.commit(&Change::RoleDeleted(id.clone()))
    }

    /// Write both snapshots, replacing whatever storage held before.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialize`] or [`StoreError::Storage`] on
    /// failure. The users snapshot may already be written when the roles
    /// write fails.
    pub fn persist(&self) -> Result<(), StoreError> {
        write_snapshot(&*self.storage, SnapshotKey::Users, &self.users)?;
        write_snapshot(&*self.storage, SnapshotKey::Roles, &self.roles)?;
        debug!(
            users = self.users.len(),
            roles = self.roles.len(),
            "snapshots written"
        );
        Ok(())
    }

    fn commit(&self, change: &Change) -> Result<(), StoreError> {
        self.persist()?;
        self.bus.publish(change, self.state());
        Ok(())
    }
}

impl fmt::Debug for DirectoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryStore")
            .field("users", &self.users)
            .field("roles", &self.roles)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

trait Keyed {
    type Id: Eq + Hash + fmt::Display;

    fn key(&self) -> &Self::Id;
}

impl Keyed for User {
    type Id = UserId;

    fn key(&self) -> &UserId {
        &self.id
    }
}

impl Keyed for Role {
    type Id = RoleId;

    fn key(&self) -> &RoleId {
        &self.id
    }
}

fn fresh_id<T: Keyed>(items: &[T], generate: fn() -> T::Id) -> T::Id {
    loop {
        let candidate = generate();
        if !items.iter().any(|item| item.key() == &candidate) {
            return candidate;
        }
    }
}

fn load_snapshot<T>(
    storage: &dyn SnapshotStorage,
    key: SnapshotKey,
) -> Result<Option<Vec<T>>, StoreError>
where
    T: Keyed + DeserializeOwned,
{
    let Some(contents) = storage.read(key)? else {
        debug!(key = %key, "no snapshot stored; keeping seed");
        return Ok(None);
    };

    let items: Vec<T> =
        serde_json::from_str(&contents).map_err(|err| StoreError::CorruptSnapshot {
            key,
            message: err.to_string(),
        })?;

    let mut seen = HashSet::with_capacity(items.len());
    if let Some(duplicate) = items.iter().map(T::key).find(|id| !seen.insert(*id)) {
        return Err(StoreError::CorruptSnapshot {
            key,
            message: format!("duplicate id '{duplicate}'"),
        });
    }

    Ok(Some(items))
}

fn write_snapshot<T: Serialize>(
    storage: &dyn SnapshotStorage,
    key: SnapshotKey,
    items: &[T],
) -> Result<(), StoreError> {
    let contents = serde_json::to_string(items).map_err(|err| StoreError::Serialize {
        key,
        message: err.to_string(),
    })?;
    storage.write(key, &contents)?;
    Ok(())
}

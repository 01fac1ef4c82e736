//! Domain model for the access-control admin store.
//!
//! Users, roles and the fixed permission catalogue live here together with
//! the [`DirectoryStore`] that owns them, the change notification bus, the
//! view binding adapter and the read models the admin screens derive from
//! store state. Storage is reached only through the [`ports`] traits.

pub mod binding;
pub mod dashboard;
pub mod error;
pub mod ids;
pub mod permission;
pub mod ports;
pub mod queries;
pub mod role;
pub mod seed;
pub mod state;
pub mod store;
pub mod subscriptions;
pub mod user;
pub mod validation;

pub use self::binding::{BindingState, View, ViewBinding};
pub use self::dashboard::{DashboardStats, DashboardView};
pub use self::error::{EntityKind, StoreError};
pub use self::ids::{RoleId, UserId};
pub use self::permission::{
    PERMISSION_GROUPS, PERMISSIONS, Permission, PermissionGroup, UnknownPermission, permissions_in,
};
pub use self::queries::{RoleFilter, UserQuery, filter_roles};
pub use self::role::{NewRole, Role, RolePatch};
pub use self::state::StoreState;
pub use self::store::DirectoryStore;
pub use self::subscriptions::{Change, Subscription, SubscriptionBus};
pub use self::user::{NewUser, User, UserPatch};
pub use self::validation::{FormErrors, FormField, RoleDraft, UserDraft};

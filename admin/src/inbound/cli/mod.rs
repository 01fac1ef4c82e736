//! Command-line front end over the directory store.
//!
//! Parsing is done with clap derive. [`run`] executes a parsed [`Command`]
//! against an open store and returns the lines to print, so the binary only
//! handles process concerns (logging, settings, exit status).

use std::io;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

use crate::domain::seed::DEFAULT_ROLE;
use crate::domain::{
    DashboardView, DirectoryStore, FormErrors, NewRole, NewUser, PERMISSION_GROUPS, Permission,
    Role, RoleDraft, RoleFilter, RoleId, RolePatch, StoreError, User, UserDraft, UserId,
    UserPatch, UserQuery, ViewBinding, filter_roles, permissions_in,
};
use crate::outbound::storage::DirectorySnapshotStorage;

/// `rbac-admin` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rbac-admin",
    about = "Manage users, roles and permissions stored as JSON snapshots",
    version
)]
pub struct Cli {
    /// Snapshot directory. Overrides `RBAC_ADMIN_DATA_DIR`.
    #[arg(long = "data-dir", value_name = "path", global = true)]
    pub data_dir: Option<PathBuf>,
    /// Action to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level actions.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Manage user accounts.
    #[command(subcommand)]
    Users(UserCommand),
    /// Manage roles.
    #[command(subcommand)]
    Roles(RoleCommand),
    /// List the permission catalogue by group.
    Permissions,
    /// Show dashboard figures.
    Stats,
}

/// User actions.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum UserCommand {
    /// List users, optionally filtered.
    List {
        /// Case-insensitive text matched against name or email.
        #[arg(long)]
        search: Option<String>,
        /// Only users with this role name (`all` for every role).
        #[arg(long)]
        role: Option<String>,
    },
    /// Add a user.
    Create {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Email address.
        #[arg(long)]
        email: String,
        /// Role name.
        #[arg(long, default_value = DEFAULT_ROLE)]
        role: String,
        /// Create the account disabled.
        #[arg(long)]
        inactive: bool,
    },
    /// Change fields of an existing user.
    Update {
        /// User id.
        id: String,
        /// New display name.
        #[arg(long)]
        name: Option<String>,
        /// New email address.
        #[arg(long)]
        email: Option<String>,
        /// New role name.
        #[arg(long)]
        role: Option<String>,
        /// Enable or disable the account.
        #[arg(long, value_name = "bool")]
        active: Option<bool>,
    },
    /// Remove a user.
    Delete {
        /// User id.
        id: String,
    },
}

/// Role actions.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum RoleCommand {
    /// List roles, optionally filtered by name.
    List {
        /// Case-insensitive text matched against the role name.
        #[arg(long)]
        search: Option<String>,
        /// Only roles granting this permission.
        #[arg(long, value_name = "PERMISSION")]
        grants: Option<Permission>,
    },
    /// Add a role.
    Create {
        /// Role name.
        #[arg(long)]
        name: String,
        /// Granted permission; repeat for several.
        #[arg(long = "permission", value_name = "PERMISSION")]
        permissions: Vec<Permission>,
    },
    /// Change fields of an existing role.
    Update {
        /// Role id.
        id: String,
        /// New role name.
        #[arg(long)]
        name: Option<String>,
        /// Replacement permission list; repeat for several.
        #[arg(long = "permission", value_name = "PERMISSION")]
        permissions: Vec<Permission>,
    },
    /// Remove a role that no user holds.
    Delete {
        /// Role id.
        id: String,
    },
}

/// Errors reported by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// The store refused or failed the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Input failed form validation; the store was not touched.
    #[error("invalid input: {0}")]
    Invalid(#[from] FormErrors),
    /// The data directory path is not UTF-8.
    #[error("data directory '{path}' is not valid UTF-8")]
    NonUtf8Path {
        /// Lossy rendering of the rejected path.
        path: String,
    },
    /// The data directory could not be created or opened.
    #[error("failed to open data directory '{path}': {source}")]
    OpenStorage {
        /// Directory that was requested.
        path: Utf8PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
    /// Settings could not be loaded.
    #[error("failed to load configuration: {message}")]
    Config {
        /// Loader error description.
        message: String,
    },
}

/// Open the snapshot directory at `data_dir` and load a store from it.
///
/// # Errors
///
/// Returns [`CliError::NonUtf8Path`] or [`CliError::OpenStorage`] when the
/// directory is unusable, and [`CliError::Store`] when a snapshot is corrupt.
pub fn open_store(data_dir: PathBuf) -> Result<DirectoryStore, CliError> {
    let path = Utf8PathBuf::try_from(data_dir).map_err(|err| CliError::NonUtf8Path {
        path: err.as_path().to_string_lossy().into_owned(),
    })?;
    let storage = DirectorySnapshotStorage::open(&path)
        .map_err(|source| CliError::OpenStorage { path, source })?;
    Ok(DirectoryStore::open(storage)?)
}

/// Execute `command` against `store` and return the lines to print.
///
/// # Errors
///
/// Returns [`CliError::Invalid`] when input fails validation and
/// [`CliError::Store`] when the store rejects the change.
pub fn run(command: Command, store: &mut DirectoryStore) -> Result<Vec<String>, CliError> {
    debug!(?command, "running command");
    match command {
        Command::Users(action) => run_users(action, store),
        Command::Roles(action) => run_roles(action, store),
        Command::Permissions => Ok(permission_lines()),
        Command::Stats => Ok(stats_lines(store)),
    }
}

fn run_users(action: UserCommand, store: &mut DirectoryStore) -> Result<Vec<String>, CliError> {
    match action {
        UserCommand::List { search, role } => {
            let query = UserQuery {
                search: search.unwrap_or_default(),
                role: RoleFilter::from_option(role.as_deref()),
            };
            let users = query.apply(store.list_users());
            if users.is_empty() {
                return Ok(vec!["no users match".to_owned()]);
            }
            Ok(users.into_iter().map(user_line).collect())
        }
        UserCommand::Create {
            name,
            email,
            role,
            inactive,
        } => {
            let user = NewUser {
                name,
                email,
                role,
                is_active: !inactive,
            };
            UserDraft::from(&user).validate()?;
            let warning = unknown_role_warning(store, &user.role);
            let created = store.create_user(user)?;
            let mut lines = vec![format!("created user {}", created.id), user_line(&created)];
            lines.extend(warning);
            Ok(lines)
        }
        UserCommand::Update {
            id,
            name,
            email,
            role,
            active,
        } => {
            let user_id = UserId::new(id);
            let patch = UserPatch {
                name,
                email,
                role,
                is_active: active,
            };
            let current = store
                .find_user(&user_id)
                .ok_or_else(|| StoreError::user_not_found(&user_id))?;
            if patch.is_empty() {
                return Ok(vec![format!("nothing to update for user {user_id}")]);
            }
            UserDraft::from(&patch.merged(current)).validate()?;
            let warning = patch
                .role
                .as_deref()
                .and_then(|role| unknown_role_warning(store, role));
            let updated = store.update_user(&user_id, patch)?;
            let mut lines = vec![format!("updated user {user_id}"), user_line(&updated)];
            lines.extend(warning);
            Ok(lines)
        }
        UserCommand::Delete { id } => {
            let user_id = UserId::new(id);
            store.delete_user(&user_id)?;
            Ok(vec![format!("deleted user {user_id}")])
        }
    }
}

fn run_roles(action: RoleCommand, store: &mut DirectoryStore) -> Result<Vec<String>, CliError> {
    match action {
        RoleCommand::List { search, grants } => {
            let mut roles = filter_roles(store.list_roles(), search.as_deref().unwrap_or_default());
            if let Some(permission) = grants {
                roles.retain(|role| role.grants(permission));
            }
            if roles.is_empty() {
                return Ok(vec!["no roles match".to_owned()]);
            }
            Ok(roles.into_iter().map(role_line).collect())
        }
        RoleCommand::Create { name, permissions } => {
            let role = NewRole { name, permissions };
            RoleDraft::from(&role).validate()?;
            let created = store.create_role(role)?;
            Ok(vec![format!("created role {}", created.id), role_line(&created)])
        }
        RoleCommand::Update {
            id,
            name,
            permissions,
        } => {
            let role_id = RoleId::new(id);
            let patch = RolePatch {
                name,
                permissions: (!permissions.is_empty()).then_some(permissions),
            };
            let current = store
                .find_role(&role_id)
                .ok_or_else(|| StoreError::role_not_found(&role_id))?;
            if patch.is_empty() {
                return Ok(vec![format!("nothing to update for role {role_id}")]);
            }
            RoleDraft::from(&patch.merged(current)).validate()?;
            let updated = store.update_role(&role_id, patch)?;
            Ok(vec![format!("updated role {role_id}"), role_line(&updated)])
        }
        RoleCommand::Delete { id } => {
            let role_id = RoleId::new(id);
            store.delete_role(&role_id)?;
            Ok(vec![format!("deleted role {role_id}")])
        }
    }
}

fn unknown_role_warning(store: &DirectoryStore, role: &str) -> Option<String> {
    store
        .find_role_by_name(role)
        .is_none()
        .then(|| format!("warning: no role named '{role}'"))
}

fn user_line(user: &User) -> String {
    let status = if user.is_active { "active" } else { "inactive" };
    format!(
        "{}\t{}\t{}\t{}\t{status}",
        user.id, user.name, user.email, user.role
    )
}

fn role_line(role: &Role) -> String {
    let permissions: Vec<&str> = role
        .permissions
        .iter()
        .map(|permission| permission.as_str())
        .collect();
    format!("{}\t{}\t{}", role.id, role.name, permissions.join(","))
}

fn permission_lines() -> Vec<String> {
    PERMISSION_GROUPS
        .iter()
        .map(|group| {
            let entries: Vec<String> = permissions_in(*group)
                .into_iter()
                .map(|permission| format!("{permission} ({})", permission.label()))
                .collect();
            format!("{}: {}", group.title(), entries.join(", "))
        })
        .collect()
}

fn stats_lines(store: &DirectoryStore) -> Vec<String> {
    let mut binding = ViewBinding::new(DashboardView::default());
    binding.mount(store);
    let lines = binding.view().stats().lines();
    binding.unmount();
    lines
}

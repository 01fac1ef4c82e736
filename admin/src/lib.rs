//! Role-based access control administration.
//!
//! The [`domain`] module holds users, roles, the permission catalogue and the
//! [`DirectoryStore`](domain::DirectoryStore) that owns them. Snapshot
//! storage adapters live under [`outbound`], the command-line front end under
//! [`inbound`], and runtime settings in [`config`].

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

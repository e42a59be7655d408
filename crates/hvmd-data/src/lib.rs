#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Data access layer for `hvmd`: the `PostgreSQL` connection and the
//! `pg_roles` queries behind every command.

pub mod error;
pub mod roles;

pub use error::{DataError, Result as DataResult};
pub use roles::{RoleCatalog, RoleIdentity, RoleStore};

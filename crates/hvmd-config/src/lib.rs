#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Environment-backed configuration for the `hvmd` operator tool.
//!
//! Layout: `env.rs` (`.env` loading and runtime flags), `database.rs`
//! (`DatabaseSettings` and connection URL assembly), `keystore.rs` (the local
//! `.key` credential artifact).

pub mod database;
pub mod env;
pub mod error;
pub mod keystore;

pub use database::{DEFAULT_HOST, DEFAULT_PORT, DatabaseSettings};
pub use env::{load_env_file, ssh_check_enabled, ssh_check_enabled_from};
pub use error::{ConfigError, ConfigResult};
pub use keystore::{KEY_ENTRY, KeyStore};

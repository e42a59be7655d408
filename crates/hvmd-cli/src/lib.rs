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
#![allow(clippy::redundant_pub_crate)]

//! Operator CLI for a PostgreSQL deployment with a role-gated core mode.
//!
//! Layout:
//! - `cli.rs`: argument capture, invocation wiring, and error reporting
//! - `args.rs`: elevation marker handling
//! - `trust.rs`: elevation checks
//! - `registry.rs`: static command table
//! - `dispatch.rs`: authorization and routing
//! - `suggest.rs`: typo hints
//! - `commands/`: command handlers grouped by concern
//! - `client.rs`: error type and exit codes
//! - `output.rs`: renderers and formatting helpers
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod args;
pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod dispatch;
pub(crate) mod output;
pub(crate) mod registry;
pub(crate) mod suggest;
pub(crate) mod trust;

#[cfg(test)]
mod testing;

pub use cli::run;

//! Process environment helpers.

use std::path::Path;

/// Variable that toggles the startup credential check; the check runs only
/// when it is set to `false`.
pub const SSH_CHECK_VAR: &str = "isNULL";

/// Load `KEY=VALUE` pairs from `path` into the process environment.
///
/// Variables that are already set are left untouched. Returns `false` when the
/// file is missing or unreadable so callers can fall back to the inherited
/// environment.
pub fn load_env_file(path: &Path) -> bool {
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "loaded environment file");
            true
        }
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "environment file not loaded");
            false
        }
    }
}

/// Whether the startup credential check is enabled in the process environment.
#[must_use]
pub fn ssh_check_enabled() -> bool {
    ssh_check_enabled_from(|name| std::env::var(name).ok())
}

/// Whether the startup credential check is enabled according to `lookup`.
#[must_use]
pub fn ssh_check_enabled_from(lookup: impl Fn(&str) -> Option<String>) -> bool {
    lookup(SSH_CHECK_VAR).is_some_and(|value| value.trim().eq_ignore_ascii_case("false"))
}

//! Enrollment and display of the local SSH key artifact.

use anyhow::{Context, anyhow};
use hvmd_config::KeyStore;
use tracing::info;

use crate::client::{CliError, CliResult};
use crate::commands::{HandlerContext, Report};

pub(crate) fn add_admin_ssh_key(ctx: &HandlerContext<'_>) -> CliResult<Report> {
    let input = ctx
        .key_input
        .read_key()
        .context("failed to read input")
        .map_err(CliError::failure)?;
    let key = input.trim();
    if key.is_empty() {
        return Err(CliError::failure(anyhow!("no key provided")));
    }

    ctx.keys
        .write_key(key)
        .with_context(|| format!("failed to write {}", ctx.keys.path().display()))
        .map_err(CliError::failure)?;
    info!(path = %ctx.keys.path().display(), "stored operator key");

    Ok(Report::KeyStored {
        path: ctx.keys.path().to_path_buf(),
    })
}

pub(crate) fn cat_ssh(ctx: &HandlerContext<'_>) -> CliResult<Report> {
    let key = ctx
        .keys
        .read_key()
        .with_context(|| format!("failed to read {}", ctx.keys.path().display()))
        .map_err(CliError::failure)?;
    Ok(Report::KeyContents {
        path: ctx.keys.path().to_path_buf(),
        key,
    })
}

/// Startup notice about the key artifact. Silent when the file cannot be read.
pub(crate) fn key_status_line(keys: &KeyStore) -> Option<String> {
    match keys.read_key() {
        Ok(Some(_)) => Some(format!(
            "{{🔓 }} SSH key loaded from {}",
            keys.path().display()
        )),
        Ok(None) => Some(format!(
            "{{⚠️  }} No SSH_KEY found in {} file",
            keys.path().display()
        )),
        Err(_) => None,
    }
}

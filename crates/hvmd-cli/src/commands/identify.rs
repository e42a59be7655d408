use anyhow::Context;

use crate::client::{CliError, CliResult};
use crate::commands::{HandlerContext, Report};

/// Role attributes of the authenticated principal. Reachable only with
/// elevated trust.
pub(crate) async fn identify(ctx: &HandlerContext<'_>) -> CliResult<Report> {
    let identity = ctx
        .catalog
        .identity(ctx.principal)
        .await
        .context("failed to query user information")
        .map_err(CliError::failure)?;
    Ok(Report::Identity { identity })
}

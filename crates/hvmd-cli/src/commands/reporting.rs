use anyhow::Context;
use tracing::warn;

use crate::client::{CliError, CliResult, error_chain};
use crate::commands::{HandlerContext, Report};
use crate::trust::TrustLevel;

pub(crate) async fn ping(ctx: &HandlerContext<'_>) -> CliResult<Report> {
    let now = ctx
        .catalog
        .server_time()
        .await
        .context("failed to query DB")
        .map_err(CliError::failure)?;
    Ok(Report::ServerTime { now })
}

/// Undecodable rows are skipped with a warning; the rest are still listed.
pub(crate) async fn admins(ctx: &HandlerContext<'_>) -> CliResult<Report> {
    let rows = ctx
        .catalog
        .admin_roles()
        .await
        .context("failed to query admin users")
        .map_err(CliError::failure)?;

    let mut admins = Vec::with_capacity(rows.len());
    let mut row_errors = Vec::new();
    for row in rows {
        match row {
            Ok(name) => admins.push(name),
            Err(err) => {
                warn!(error = %err, "skipping unreadable admin row");
                row_errors.push(error_chain(&err));
            }
        }
    }

    Ok(Report::Admins { admins, row_errors })
}

pub(crate) const fn help(trust: TrustLevel) -> Report {
    Report::Help {
        elevated: matches!(trust, TrustLevel::Elevated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeCatalog, FakeKeyInput, context_with, fixed_time, key_store};

    #[tokio::test]
    async fn ping_reports_server_time() {
        let catalog = FakeCatalog::standard();
        let (_dir, keys) = key_store();
        let input = FakeKeyInput::closed();
        let ctx = context_with(&catalog, &keys, &input);
        assert_eq!(
            ping(&ctx).await.expect("ping"),
            Report::ServerTime { now: fixed_time() }
        );
    }

    #[tokio::test]
    async fn ping_failure_is_a_handler_error() {
        let catalog = FakeCatalog::failing();
        let (_dir, keys) = key_store();
        let input = FakeKeyInput::closed();
        let ctx = context_with(&catalog, &keys, &input);
        let err = ping(&ctx).await.expect_err("failure");
        assert!(err.display_message().starts_with("(X) failed to query DB"));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn bad_admin_rows_are_skipped() {
        let catalog = FakeCatalog::standard().with_admins(vec![
            Some("alpha".into()),
            None,
            Some("omega".into()),
        ]);
        let (_dir, keys) = key_store();
        let input = FakeKeyInput::closed();
        let ctx = context_with(&catalog, &keys, &input);
        match admins(&ctx).await.expect("admins") {
            Report::Admins { admins, row_errors } => {
                assert_eq!(admins, vec!["alpha".to_string(), "omega".to_string()]);
                assert_eq!(row_errors.len(), 1);
                assert!(row_errors[0].starts_with("failed to decode row"));
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn help_reflects_trust() {
        assert_eq!(help(TrustLevel::Standard), Report::Help { elevated: false });
        assert_eq!(help(TrustLevel::Elevated), Report::Help { elevated: true });
    }
}

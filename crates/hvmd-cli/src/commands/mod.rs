//! Command handlers grouped by concern.

pub(crate) mod identify;
pub(crate) mod keys;
pub(crate) mod reporting;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use hvmd_config::KeyStore;
use hvmd_data::{RoleCatalog, RoleIdentity};
use serde::Serialize;

use crate::client::CliResult;
use crate::registry::CommandKind;
use crate::trust::TrustLevel;

/// Collaborators available to every handler.
pub(crate) struct HandlerContext<'a> {
    pub(crate) catalog: &'a dyn RoleCatalog,
    pub(crate) keys: &'a KeyStore,
    pub(crate) principal: &'a str,
    pub(crate) key_input: &'a dyn KeyInput,
}

/// Source of the key pasted during enrollment.
pub(crate) trait KeyInput {
    fn read_key(&self) -> io::Result<String>;
}

/// Prompts on stdout and reads a single line from stdin.
pub(crate) struct StdinKeyInput;

impl KeyInput for StdinKeyInput {
    fn read_key(&self) -> io::Result<String> {
        let mut stdout = io::stdout();
        writeln!(stdout, "Paste your SSH public key (press Enter when done):")?;
        stdout.flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

/// Result of an executed command, rendered by `output`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub(crate) enum Report {
    ServerTime {
        now: DateTime<Utc>,
    },
    Admins {
        admins: Vec<String>,
        row_errors: Vec<String>,
    },
    Help {
        elevated: bool,
    },
    Identity {
        identity: RoleIdentity,
    },
    KeyStored {
        path: PathBuf,
    },
    KeyContents {
        path: PathBuf,
        key: Option<String>,
    },
}

/// Run the handler for an authorized command.
pub(crate) async fn execute(
    kind: CommandKind,
    positional: &[String],
    trust: TrustLevel,
    ctx: &HandlerContext<'_>,
) -> CliResult<Report> {
    if !positional.is_empty() {
        tracing::debug!(?kind, ?positional, "ignoring positional arguments");
    }

    match kind {
        CommandKind::Ping => reporting::ping(ctx).await,
        CommandKind::Admins => reporting::admins(ctx).await,
        CommandKind::Help => Ok(reporting::help(trust)),
        CommandKind::Identify => identify::identify(ctx).await,
        CommandKind::AddAdminSshKey => keys::add_admin_ssh_key(ctx),
        CommandKind::CatSsh => keys::cat_ssh(ctx),
    }
}

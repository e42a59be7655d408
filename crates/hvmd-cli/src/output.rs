//! Output renderers and formatting helpers for CLI commands.

use std::fmt::Write as _;

use anyhow::anyhow;
use chrono::{DateTime, Local, TimeZone};
use hvmd_data::RoleIdentity;
use serde_json::json;

use crate::args::ELEVATION_MARKER;
use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};
use crate::commands::Report;
use crate::registry::{Access, COMMANDS, CommandSpec};

const RULE: &str = "👁····························································👁";
const CORE_RULE: &str = "☢️  ··························································☢️";

pub(crate) fn usage_text() -> String {
    "(!) No command provided\n    Try: hvmd help".to_string()
}

pub(crate) fn missing_env_file_text(path: &std::path::Path) -> String {
    format!(
        "(!) No {} file found, relying on environment variables",
        path.display()
    )
}

/// Text shared by every denial so unknown and hidden commands look alike.
pub(crate) fn denial_text(subject: &str, suggestion: Option<&str>) -> String {
    let hint = suggestion.map_or_else(
        || "    Try: hvmd help".to_string(),
        |name| format!("    Did you mean: hvmd {name}"),
    );
    format!("(!) Unknown command: {subject}\n{hint}")
}

pub(crate) fn render_report(report: &Report, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Table => Ok(render_table(report)),
    }
}

fn render_json(report: &Report) -> CliResult<String> {
    let value = match report {
        Report::Help { elevated } => json!({
            "report": "help",
            "elevated": elevated,
            "commands": visible_commands(*elevated)
                .map(|spec| json!({ "name": spec.name, "summary": spec.summary }))
                .collect::<Vec<_>>(),
        }),
        other => serde_json::to_value(other)
            .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?,
    };
    serde_json::to_string_pretty(&value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

fn render_table(report: &Report) -> String {
    match report {
        Report::ServerTime { now } => format!("(✓) Postgres time: {now}"),
        Report::Admins { admins, row_errors } => render_admins(admins, row_errors),
        Report::Help { elevated } => help_text(*elevated),
        Report::Identity { identity } => render_identity(identity, &Local::now()),
        Report::KeyStored { path } => {
            format!("{{🔑 }} SSH key successfully written to {}", path.display())
        }
        Report::KeyContents { path, key } => key.clone().unwrap_or_else(|| {
            format!("{{⚠️  }} No SSH_KEY found in {} file", path.display())
        }),
    }
}

fn render_admins(admins: &[String], row_errors: &[String]) -> String {
    let mut lines: Vec<String> = row_errors
        .iter()
        .map(|err| format!("(!) Failed to read row: {err}"))
        .collect();
    if admins.is_empty() {
        lines.push("(!) No admin users found".to_string());
    } else {
        lines.push("(✓) Admin users:".to_string());
        lines.extend(admins.iter().map(|name| format!("  (-) {name}")));
    }
    lines.join("\n")
}

/// Identity listing; the breach notice is stamped with `at`.
pub(crate) fn render_identity<Tz>(identity: &RoleIdentity, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let valid_until = identity.valid_until.map_or_else(
        || "No expiration".to_string(),
        |until| until.format("%Y-%m-%d %H:%M:%S").to_string(),
    );
    let rows = [
        ("Role Name", identity.role_name.clone()),
        ("Superuser", identity.superuser.to_string()),
        ("Inherit", identity.inherit.to_string()),
        ("Create Role", identity.create_role.to_string()),
        ("Create DB", identity.create_db.to_string()),
        ("Can Login", identity.can_login.to_string()),
        ("Replication", identity.replication.to_string()),
        ("Connection Limit", identity.connection_limit.to_string()),
        ("Valid Until", valid_until),
    ];

    let mut text = String::from("{👁️  } Identity Information:\n\n");
    for (label, value) in rows {
        let label = format!("{label}:");
        let _ = writeln!(text, "  {{👁️  }} {label:<17} {value}");
    }
    text.push('\n');
    if identity.superuser {
        text.push_str("{👁️  } CORE ACCESS GRANTED");
    } else {
        let _ = write!(
            text,
            "{{⚠️    👁️  👁️   ⚠️}} Not a superuser - Your breach has been logged at {}",
            at.format("%H:%M:%S%.3f")
        );
    }
    text
}

fn visible_commands(elevated: bool) -> impl Iterator<Item = &'static CommandSpec> {
    COMMANDS
        .iter()
        .filter(move |spec| elevated || !spec.core_listed)
}

pub(crate) fn help_text(elevated: bool) -> String {
    let mut lines = vec![
        RULE.to_string(),
        "👁··········<  hvmd  | Database communication CLI >···········👁".to_string(),
        RULE.to_string(),
        "Usage: hvmd command".to_string(),
        String::new(),
        "Commands:".to_string(),
        String::new(),
    ];
    lines.extend(
        COMMANDS
            .iter()
            .filter(|spec| !spec.core_listed)
            .map(|spec| format!("  {:<10}- {}", spec.name, spec.summary)),
    );
    lines.push(String::new());

    if elevated {
        lines.extend([
            CORE_RULE.to_string(),
            "{👁️  } HIVEMIND CORE:".to_string(),
            String::new(),
            format!("Usage: hvmd command {ELEVATION_MARKER}"),
            String::new(),
        ]);
        lines.extend(
            COMMANDS
                .iter()
                .filter(|spec| spec.access == Access::PrivilegedOnly)
                .map(|spec| core_row(&format!("{} {ELEVATION_MARKER}", spec.name), spec.summary)),
        );
        lines.push(core_row(
            &format!("help {ELEVATION_MARKER}"),
            "Show this help message with the core section",
        ));
        lines.extend([
            String::new(),
            format!("Secret commands (no {ELEVATION_MARKER}):"),
            String::new(),
        ]);
        lines.extend(
            COMMANDS
                .iter()
                .filter(|spec| spec.core_listed && spec.access == Access::Public)
                .map(|spec| core_row(spec.name, spec.summary)),
        );
        lines.extend([String::new(), CORE_RULE.to_string()]);
    }

    lines.push(RULE.to_string());
    lines.join("\n")
}

fn core_row(label: &str, summary: &str) -> String {
    format!("  {label:<20}- {summary}")
}

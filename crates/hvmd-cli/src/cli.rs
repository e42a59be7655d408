//! Argument capture, invocation wiring, and top-level error reporting.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use hvmd_config::{DatabaseSettings, KeyStore};
use hvmd_data::RoleStore;
use hvmd_telemetry::LoggingConfig;
use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

use crate::args::InvocationRequest;
use crate::client::{CliError, CliResult, EXIT_FAILURE};
use crate::commands::keys::key_status_line;
use crate::commands::{HandlerContext, StdinKeyInput};
use crate::dispatch::{dispatch, refuse_elevation};
use crate::output;
use crate::trust::{self, TrustEvaluation};

#[derive(Parser, Debug)]
#[command(
    name = "hvmd",
    about = "Database communication CLI",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub(crate) struct Cli {
    /// Output format for command results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Environment file loaded before reading database settings.
    #[arg(long, env = "HVMD_ENV_FILE", default_value = ".env")]
    env_file: PathBuf,

    /// Key file holding the operator's SSH key.
    #[arg(long, env = "HVMD_KEY_FILE", default_value = ".key")]
    key_file: PathBuf,

    /// Command, its arguments, and an optional trailing `--core`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    /// Stdout carries a document that must stay parseable.
    pub(crate) const fn machine_readable(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Print a side notice without corrupting machine-readable stdout.
fn announce(format: OutputFormat, line: &str) {
    if format.machine_readable() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// Exit code and text for an argument vector clap rejected.
fn argument_failure(err: &clap::Error) -> (i32, String) {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => (0, err.to_string()),
        _ => {
            let rendered = err.to_string();
            let line = rendered.lines().next().unwrap_or_default();
            let line = line.strip_prefix("error: ").unwrap_or(line);
            (EXIT_FAILURE, format!("(X) {line}"))
        }
    }
}

/// Parses CLI arguments, runs one invocation against the database, and
/// reports the result. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let (code, message) = argument_failure(&err);
            if code == 0 {
                println!("{message}");
            } else {
                eprintln!("{message}");
            }
            return code;
        }
    };
    if let Err(err) = hvmd_telemetry::init_logging(&LoggingConfig::from_env()) {
        eprintln!("(!) logging unavailable: {err:#}");
    }

    let Some(request) = InvocationRequest::parse(cli.args.clone()) else {
        println!("{}", output::usage_text());
        return 0;
    };

    let span = info_span!(
        "invocation",
        trace_id = %Uuid::new_v4(),
        command = %request.command,
        raw_args = ?request.raw_args,
    );
    match invoke(&cli, &request).instrument(span).await {
        Ok(text) => {
            println!("{text}");
            0
        }
        Err(err) => {
            eprintln!("{}", err.display_message());
            err.exit_code()
        }
    }
}

async fn invoke(cli: &Cli, request: &InvocationRequest) -> CliResult<String> {
    if !hvmd_config::load_env_file(&cli.env_file) {
        announce(cli.output, &output::missing_env_file_text(&cli.env_file));
    }
    let settings = DatabaseSettings::from_env().map_err(CliError::Config)?;
    let url = settings.connection_url().map_err(CliError::Config)?;

    debug!(?settings, "connecting");
    let store = RoleStore::connect(&url)
        .await
        .map_err(|source| CliError::Connectivity {
            database: settings.database.clone(),
            source,
        })?;

    let keys = KeyStore::new(&cli.key_file);
    let ctx = HandlerContext {
        catalog: &store,
        keys: &keys,
        principal: &settings.user,
        key_input: &StdinKeyInput,
    };
    let result = execute(
        request,
        &ctx,
        cli.output,
        hvmd_config::ssh_check_enabled(),
    )
    .await;
    store.close().await;
    result
}

/// Evaluate trust, dispatch, and render. Everything after the connection is
/// established goes through here.
pub(crate) async fn execute(
    request: &InvocationRequest,
    ctx: &HandlerContext<'_>,
    format: OutputFormat,
    ssh_check: bool,
) -> CliResult<String> {
    if ssh_check && let Some(line) = key_status_line(ctx.keys) {
        announce(format, &line);
    }

    let evaluation = trust::evaluate(
        ctx.principal,
        request.elevation_requested,
        ctx.catalog,
        ctx.keys,
    )
    .await;
    let outcome = match evaluation {
        TrustEvaluation::Denied(_) => refuse_elevation(&request.command)?,
        TrustEvaluation::Standard | TrustEvaluation::Elevated => {
            dispatch(request, evaluation.level(), ctx).await?
        }
    };
    let report = outcome.into_report(&request.command)?;
    output::render_report(&report, format)
}

//! CLI error type and user-facing error text.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use hvmd_config::ConfigError;
use hvmd_data::DataError;

use crate::output;
use crate::suggest::suggest;

pub(crate) const EXIT_FAILURE: i32 = 1;

/// Errors that end an invocation with a non-zero exit code.
#[derive(Debug)]
pub(crate) enum CliError {
    Config(ConfigError),
    Connectivity {
        database: String,
        source: DataError,
    },
    /// Unknown, unauthorized, and refused-elevation requests share this text.
    Denied {
        subject: String,
        suggestion: Option<&'static str>,
    },
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn denied(subject: &str) -> Self {
        Self::Denied {
            subject: subject.to_string(),
            suggestion: suggest(subject),
        }
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Connectivity { .. } | Self::Denied { .. } | Self::Failure(_) => {
                EXIT_FAILURE
            }
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Config(ConfigError::MissingEnv { names }) => {
                format!("(X) Missing environment variables: {}", names.join(", "))
            }
            Self::Config(ConfigError::InvalidPort { value }) => {
                format!("(X) Invalid POSTGRES_PORT: {value}")
            }
            Self::Config(err) => format!("(X) {}", error_chain(err)),
            Self::Connectivity { database, source } => format!(
                "(X) Failed to connect to database '{database}': {}",
                error_chain(source)
            ),
            Self::Denied {
                subject,
                suggestion,
            } => output::denial_text(subject, *suggestion),
            Self::Failure(error) => format!("(X) {error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl Error for CliError {}

/// Render an error and its sources as `outer: inner: root`.
pub(crate) fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

//! Authorization of a parsed invocation and routing to its handler.

use crate::args::{ELEVATION_MARKER, InvocationRequest};
use crate::client::{CliError, CliResult};
use crate::commands::{self, HandlerContext, Report};
use crate::registry::{Classification, CommandKind, classify, lookup};
use crate::trust::TrustLevel;

/// Decision for a command name at a given trust level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Authorization {
    Allowed(CommandKind),
    DeniedUnknown,
    DeniedUnauthorized,
}

/// Outcome of routing one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DispatchOutcome {
    Executed(Report),
    DeniedUnknown,
    DeniedUnauthorized,
}

impl DispatchOutcome {
    /// Both denials surface as the same unknown-command error for `command`.
    pub(crate) fn into_report(self, command: &str) -> CliResult<Report> {
        match self {
            Self::Executed(report) => Ok(report),
            Self::DeniedUnknown | Self::DeniedUnauthorized => Err(CliError::denied(command)),
        }
    }
}

pub(crate) fn authorize(command: &str, trust: TrustLevel) -> Authorization {
    match (classify(command), trust) {
        (Classification::Unknown, _) => Authorization::DeniedUnknown,
        (Classification::PrivilegedOnly, TrustLevel::Standard) => Authorization::DeniedUnauthorized,
        (Classification::Public | Classification::PrivilegedOnly, _) => lookup(command)
            .map_or(Authorization::DeniedUnknown, |spec| {
                Authorization::Allowed(spec.kind)
            }),
    }
}

/// Route `request` at `trust`. Denials are outcomes, handler failures are errors.
pub(crate) async fn dispatch(
    request: &InvocationRequest,
    trust: TrustLevel,
    ctx: &HandlerContext<'_>,
) -> CliResult<DispatchOutcome> {
    match authorize(&request.command, trust) {
        Authorization::Allowed(kind) => {
            commands::execute(kind, &request.positional, trust, ctx)
                .await
                .map(DispatchOutcome::Executed)
        }
        Authorization::DeniedUnknown => Ok(DispatchOutcome::DeniedUnknown),
        Authorization::DeniedUnauthorized => Ok(DispatchOutcome::DeniedUnauthorized),
    }
}

/// Handle a refused elevation request without running anything.
///
/// Commands standard trust cannot reach keep their own denial. For any other
/// command the refusal is reported against the elevation marker.
pub(crate) fn refuse_elevation(command: &str) -> CliResult<DispatchOutcome> {
    match authorize(command, TrustLevel::Standard) {
        Authorization::Allowed(_) => Err(CliError::denied(ELEVATION_MARKER)),
        Authorization::DeniedUnknown => Ok(DispatchOutcome::DeniedUnknown),
        Authorization::DeniedUnauthorized => Ok(DispatchOutcome::DeniedUnauthorized),
    }
}

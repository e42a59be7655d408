//! Elevation checks resolving the trust level of an invocation.
//!
//! Elevation needs two independent factors: the principal must hold the
//! superuser attribute, and the local key artifact must be loadable. Anything
//! short of both resolves to standard trust.

use hvmd_config::KeyStore;
use hvmd_data::RoleCatalog;
use tracing::{debug, warn};

/// Trust level governing which commands are reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrustLevel {
    Standard,
    Elevated,
}

/// Reason an elevation request was refused. Logged, never shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ElevationDenial {
    RoleNotGranted,
    RoleLookupFailed,
    CredentialMissing,
}

/// Outcome of trust evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrustEvaluation {
    Standard,
    Elevated,
    Denied(ElevationDenial),
}

impl TrustEvaluation {
    /// Effective trust level; every denial degrades to standard.
    pub(crate) const fn level(self) -> TrustLevel {
        match self {
            Self::Elevated => TrustLevel::Elevated,
            Self::Standard | Self::Denied(_) => TrustLevel::Standard,
        }
    }
}

/// Possession check for the local credential artifact.
pub(crate) trait CredentialCheck {
    fn credential_present(&self) -> bool;
}

impl CredentialCheck for KeyStore {
    fn credential_present(&self) -> bool {
        self.has_key()
    }
}

/// Resolve the trust level for `principal`.
///
/// Without an elevation request no role lookup is made.
pub(crate) async fn evaluate(
    principal: &str,
    elevation_requested: bool,
    roles: &dyn RoleCatalog,
    credentials: &dyn CredentialCheck,
) -> TrustEvaluation {
    if !elevation_requested {
        return TrustEvaluation::Standard;
    }

    let denial = match roles.is_superuser(principal).await {
        Ok(true) if credentials.credential_present() => return TrustEvaluation::Elevated,
        Ok(true) => ElevationDenial::CredentialMissing,
        Ok(false) => ElevationDenial::RoleNotGranted,
        Err(err) => {
            warn!(error = %err, operation = ?err.operation(), "role lookup failed during elevation");
            ElevationDenial::RoleLookupFailed
        }
    };
    debug!(principal, reason = ?denial, "elevation denied");
    TrustEvaluation::Denied(denial)
}

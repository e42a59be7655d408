//! In-memory collaborators for handler and dispatch tests.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hvmd_config::KeyStore;
use hvmd_data::{DataError, DataResult, RoleCatalog, RoleIdentity};
use tempfile::TempDir;

use crate::commands::{HandlerContext, KeyInput};
use crate::trust::CredentialCheck;

pub(crate) const PRINCIPAL: &str = "hive";

pub(crate) fn fixed_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_792_411_200, 0).expect("valid timestamp")
}

/// Key store inside a fresh temp dir. The store file is not created; keep the
/// dir alive for the duration of the test.
pub(crate) fn key_store() -> (TempDir, KeyStore) {
    let dir = tempfile::tempdir().expect("temp dir");
    let keys = KeyStore::new(dir.path().join(".key"));
    (dir, keys)
}

pub(crate) const fn context_with<'a>(
    catalog: &'a FakeCatalog,
    keys: &'a KeyStore,
    key_input: &'a FakeKeyInput,
) -> HandlerContext<'a> {
    HandlerContext {
        catalog,
        keys,
        principal: PRINCIPAL,
        key_input,
    }
}

/// Role catalog with canned answers. A failing catalog errors on every call.
pub(crate) struct FakeCatalog {
    superuser: bool,
    failing: bool,
    admins: Vec<Option<String>>,
    role_lookups: AtomicUsize,
}

impl FakeCatalog {
    fn new(superuser: bool, failing: bool) -> Self {
        Self {
            superuser,
            failing,
            admins: vec![Some("postgres".into())],
            role_lookups: AtomicUsize::new(0),
        }
    }

    pub(crate) fn standard() -> Self {
        Self::new(false, false)
    }

    pub(crate) fn superuser() -> Self {
        Self::new(true, false)
    }

    pub(crate) fn failing() -> Self {
        Self::new(false, true)
    }

    /// `None` entries decode as failed rows.
    pub(crate) fn with_admins(mut self, admins: Vec<Option<String>>) -> Self {
        self.admins = admins;
        self
    }

    pub(crate) fn role_lookups(&self) -> usize {
        self.role_lookups.load(Ordering::SeqCst)
    }

    fn check(&self, operation: &'static str) -> DataResult<()> {
        if self.failing {
            return Err(DataError::QueryFailed {
                operation,
                source: sqlx::Error::PoolTimedOut,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RoleCatalog for FakeCatalog {
    async fn is_superuser(&self, _principal: &str) -> DataResult<bool> {
        self.role_lookups.fetch_add(1, Ordering::SeqCst);
        self.check("roles.is_superuser")?;
        Ok(self.superuser)
    }

    async fn server_time(&self) -> DataResult<DateTime<Utc>> {
        self.check("roles.server_time")?;
        Ok(fixed_time())
    }

    async fn admin_roles(&self) -> DataResult<Vec<DataResult<String>>> {
        self.check("roles.admin_roles")?;
        Ok(self
            .admins
            .iter()
            .map(|admin| {
                admin.clone().ok_or_else(|| DataError::RowDecode {
                    operation: "roles.admin_roles",
                    source: sqlx::Error::ColumnNotFound("rolname".into()),
                })
            })
            .collect())
    }

    async fn identity(&self, principal: &str) -> DataResult<RoleIdentity> {
        self.check("roles.identity")?;
        Ok(RoleIdentity {
            role_name: principal.to_string(),
            superuser: self.superuser,
            inherit: true,
            create_role: self.superuser,
            create_db: self.superuser,
            can_login: true,
            replication: false,
            connection_limit: -1,
            valid_until: None,
        })
    }
}

pub(crate) struct FixedCredential(pub(crate) bool);

impl CredentialCheck for FixedCredential {
    fn credential_present(&self) -> bool {
        self.0
    }
}

/// Key input yielding a canned line, or an error when closed.
pub(crate) struct FakeKeyInput(Option<String>);

impl FakeKeyInput {
    pub(crate) fn line(line: &str) -> Self {
        Self(Some(line.to_string()))
    }

    pub(crate) const fn closed() -> Self {
        Self(None)
    }
}

impl KeyInput for FakeKeyInput {
    fn read_key(&self) -> io::Result<String> {
        self.0
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"))
    }
}

//! Role catalog queries against `pg_roles`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, FromRow, PgPool, Row};
use tracing::debug;

use crate::error::{DataError, Result};

const IS_SUPERUSER_QUERY: &str = r"
    SELECT rolsuper
    FROM pg_roles
    WHERE rolname = $1
";

const SERVER_TIME_QUERY: &str = r"SELECT NOW()";

const ADMIN_ROLES_QUERY: &str = r"
    SELECT rolname::text AS rolname
    FROM pg_roles
    WHERE rolsuper = true OR rolcreaterole = true
    ORDER BY rolname
";

const IDENTITY_QUERY: &str = r"
    SELECT rolname::text AS rolname,
           rolsuper,
           rolinherit,
           rolcreaterole,
           rolcreatedb,
           rolcanlogin,
           rolreplication,
           rolconnlimit,
           rolvaliduntil
    FROM pg_roles
    WHERE rolname = $1
";

/// Read-only view of the server's role catalog.
///
/// Every command handler and the elevation check go through this seam so they
/// can be exercised without a live database.
#[async_trait]
pub trait RoleCatalog: Send + Sync {
    /// Whether `principal` carries the superuser attribute. Unknown roles are
    /// reported as `false`.
    async fn is_superuser(&self, principal: &str) -> Result<bool>;
    /// Current server time.
    async fn server_time(&self) -> Result<DateTime<Utc>>;
    /// Roles with superuser or create-role rights, ordered by name. Each entry
    /// is decoded independently so one bad row does not hide the others.
    async fn admin_roles(&self) -> Result<Vec<Result<String>>>;
    /// Role attributes for `principal`.
    async fn identity(&self, principal: &str) -> Result<RoleIdentity>;
}

/// Attributes of a single role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleIdentity {
    /// Role name.
    pub role_name: String,
    /// Superuser attribute.
    pub superuser: bool,
    /// Inherits privileges of granted roles.
    pub inherit: bool,
    /// May create roles.
    pub create_role: bool,
    /// May create databases.
    pub create_db: bool,
    /// May log in.
    pub can_login: bool,
    /// May initiate replication.
    pub replication: bool,
    /// Connection limit, `-1` for unlimited.
    pub connection_limit: i32,
    /// Password expiry, `None` when it never expires.
    pub valid_until: Option<DateTime<Utc>>,
}

#[derive(Debug, FromRow)]
struct IdentityRow {
    rolname: String,
    rolsuper: bool,
    rolinherit: bool,
    rolcreaterole: bool,
    rolcreatedb: bool,
    rolcanlogin: bool,
    rolreplication: bool,
    rolconnlimit: i32,
    rolvaliduntil: Option<DateTime<Utc>>,
}

impl From<IdentityRow> for RoleIdentity {
    fn from(row: IdentityRow) -> Self {
        Self {
            role_name: row.rolname,
            superuser: row.rolsuper,
            inherit: row.rolinherit,
            create_role: row.rolcreaterole,
            create_db: row.rolcreatedb,
            can_login: row.rolcanlogin,
            replication: row.rolreplication,
            connection_limit: row.rolconnlimit,
            valid_until: row.rolvaliduntil,
        }
    }
}

/// `PostgreSQL`-backed role catalog holding a single-connection pool.
#[derive(Clone)]
pub struct RoleStore {
    pool: PgPool,
}

impl RoleStore {
    /// Open the connection and verify it with a ping.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::ConnectFailed`] if the server cannot be reached.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(|source| {
                debug!(error = %source, "database connection failed");
                DataError::ConnectFailed { source }
            })?;
        let store = Self { pool };
        if let Err(err) = store.ping().await {
            debug!(error = %err, "ping failed after connect; closing pool");
            store.close().await;
            return Err(err);
        }
        debug!("database connection verified");
        Ok(store)
    }

    /// Access the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip to the server on the pooled connection.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::ConnectFailed`] if the connection is unusable.
    pub async fn ping(&self) -> Result<()> {
        let mut connection = self
            .pool
            .acquire()
            .await
            .map_err(|source| DataError::ConnectFailed { source })?;
        connection
            .ping()
            .await
            .map_err(|source| DataError::ConnectFailed { source })
    }

    /// Close the pool and its connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl RoleCatalog for RoleStore {
    async fn is_superuser(&self, principal: &str) -> Result<bool> {
        let superuser = sqlx::query_scalar::<_, bool>(IS_SUPERUSER_QUERY)
            .bind(principal)
            .fetch_optional(&self.pool)
            .await
            .map_err(|source| DataError::QueryFailed {
                operation: "roles.is_superuser",
                source,
            })?;
        Ok(superuser.unwrap_or(false))
    }

    async fn server_time(&self) -> Result<DateTime<Utc>> {
        sqlx::query_scalar::<_, DateTime<Utc>>(SERVER_TIME_QUERY)
            .fetch_one(&self.pool)
            .await
            .map_err(|source| DataError::QueryFailed {
                operation: "roles.server_time",
                source,
            })
    }

    async fn admin_roles(&self) -> Result<Vec<Result<String>>> {
        let rows = sqlx::query(ADMIN_ROLES_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| DataError::QueryFailed {
                operation: "roles.admin_roles",
                source,
            })?;

        Ok(rows
            .iter()
            .map(|row| {
                row.try_get::<String, _>("rolname")
                    .map_err(|source| DataError::RowDecode {
                        operation: "roles.admin_roles",
                        source,
                    })
            })
            .collect())
    }

    async fn identity(&self, principal: &str) -> Result<RoleIdentity> {
        let row = sqlx::query_as::<_, IdentityRow>(IDENTITY_QUERY)
            .bind(principal)
            .fetch_one(&self.pool)
            .await
            .map_err(|source| DataError::QueryFailed {
                operation: "roles.identity",
                source,
            })?;
        Ok(row.into())
    }
}

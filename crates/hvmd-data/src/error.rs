//! Error types for the data access layer.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Result alias for data layer operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors raised by the data access layer.
#[derive(Debug)]
pub enum DataError {
    /// The database could not be reached.
    ConnectFailed {
        /// Underlying SQL error.
        source: sqlx::Error,
    },
    /// A database operation failed.
    QueryFailed {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying SQL error.
        source: sqlx::Error,
    },
    /// A single row could not be decoded.
    RowDecode {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying SQL error.
        source: sqlx::Error,
    },
}

impl DataError {
    /// Operation identifier for query and decode failures.
    #[must_use]
    pub const fn operation(&self) -> Option<&'static str> {
        match self {
            Self::ConnectFailed { .. } => None,
            Self::QueryFailed { operation, .. } | Self::RowDecode { operation, .. } => {
                Some(*operation)
            }
        }
    }
}

impl Display for DataError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectFailed { .. } => formatter.write_str("database connection failed"),
            Self::QueryFailed { .. } => formatter.write_str("database operation failed"),
            Self::RowDecode { .. } => formatter.write_str("failed to decode row"),
        }
    }
}

impl Error for DataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ConnectFailed { source }
            | Self::QueryFailed { source, .. }
            | Self::RowDecode { source, .. } => Some(source),
        }
    }
}

impl From<sqlx::Error> for DataError {
    fn from(source: sqlx::Error) -> Self {
        Self::QueryFailed {
            operation: "sqlx operation",
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_error_display_and_source() {
        let connect = DataError::ConnectFailed {
            source: sqlx::Error::PoolTimedOut,
        };
        assert_eq!(connect.to_string(), "database connection failed");
        assert!(connect.source().is_some());
        assert_eq!(connect.operation(), None);

        let query = DataError::QueryFailed {
            operation: "roles.server_time",
            source: sqlx::Error::RowNotFound,
        };
        assert_eq!(query.to_string(), "database operation failed");
        assert_eq!(query.operation(), Some("roles.server_time"));

        let row = DataError::RowDecode {
            operation: "roles.admin_roles",
            source: sqlx::Error::ColumnNotFound("rolname".into()),
        };
        assert_eq!(row.to_string(), "failed to decode row");
        assert!(row.source().is_some());

        let from = DataError::from(sqlx::Error::RowNotFound);
        assert_eq!(from.to_string(), "database operation failed");
        assert_eq!(from.operation(), Some("sqlx operation"));
    }
}

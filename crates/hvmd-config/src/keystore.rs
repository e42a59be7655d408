//! Local credential artifact holding the operator's SSH public key.
//!
//! The file uses dotenv syntax with a single `SSH_KEY` entry. Values are
//! written single-quoted so keys containing spaces survive a read back.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// Entry name holding the key inside the key file.
pub const KEY_ENTRY: &str = "SSH_KEY";

/// File-backed key store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    /// Key store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the key file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored key.
    ///
    /// Returns `Ok(None)` when the file parses but holds no non-empty
    /// `SSH_KEY` entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be opened and
    /// [`ConfigError::KeyFile`] if it is not valid dotenv syntax.
    pub fn read_key(&self) -> ConfigResult<Option<String>> {
        let entries = dotenvy::from_path_iter(&self.path).map_err(|err| self.map_err(err))?;
        for entry in entries {
            let (name, value) = entry.map_err(|err| self.map_err(err))?;
            if name == KEY_ENTRY {
                let value = value.trim().to_string();
                return Ok((!value.is_empty()).then_some(value));
            }
        }
        Ok(None)
    }

    /// Whether a non-empty key can be loaded. Any read failure counts as absent.
    #[must_use]
    pub fn has_key(&self) -> bool {
        match self.read_key() {
            Ok(key) => key.is_some(),
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "key file unreadable");
                false
            }
        }
    }

    /// Replace the key file contents with `key`.
    ///
    /// On Unix the file is created with mode `0600`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidKey`] for empty keys or keys that cannot
    /// be stored single-quoted, and [`ConfigError::Io`] if writing fails.
    pub fn write_key(&self, key: &str) -> ConfigResult<()> {
        let key = key.trim();
        if key.is_empty() || key.contains(['\'', '\n', '\r']) {
            return Err(ConfigError::InvalidKey);
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(|source| ConfigError::Io {
            operation: "keystore.open",
            path: self.path.clone(),
            source,
        })?;
        writeln!(file, "{KEY_ENTRY}='{key}'").map_err(|source| ConfigError::Io {
            operation: "keystore.write",
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    fn map_err(&self, err: dotenvy::Error) -> ConfigError {
        match err {
            dotenvy::Error::Io(source) => ConfigError::Io {
                operation: "keystore.read",
                path: self.path.clone(),
                source,
            },
            other => ConfigError::KeyFile {
                path: self.path.clone(),
                source: other,
            },
        }
    }
}

//! Local persistence for the provider session
//!
//! Two stores: a JSON file (default) and the OS keychain.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use congregate_core::SessionStore;
use congregate_domain::{CongregateError, Result, Session, SessionConfig, SessionStoreKind};
use tracing::{debug, warn};

use crate::errors::InfraError;

const SESSION_FILE: &str = "session.json";
const KEYRING_SERVICE: &str = "congregate";
const KEYRING_ACCOUNT: &str = "session";

/// Default session file: `$XDG_CONFIG_HOME/congregate/session.json`, else
/// `$HOME/.config/congregate/session.json`, else the working directory.
pub fn default_session_path() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")));
    match base {
        Some(dir) => dir.join("congregate").join(SESSION_FILE),
        None => PathBuf::from(format!(".congregate-{SESSION_FILE}")),
    }
}

/// Build the store selected in configuration.
pub fn session_store_from_config(config: &SessionConfig) -> Arc<dyn SessionStore> {
    match config.store {
        SessionStoreKind::File => {
            let path = config.path.clone().unwrap_or_else(default_session_path);
            Arc::new(FileSessionStore::new(path))
        }
        SessionStoreKind::Keyring => Arc::new(KeyringSessionStore::default()),
    }
}

fn decode(raw: &str) -> Result<Session> {
    serde_json::from_str(raw)
        .map_err(|e| CongregateError::Internal(format!("stored session is corrupt: {e}")))
}

fn encode(session: &Session) -> Result<String> {
    serde_json::to_string(session)
        .map_err(|e| CongregateError::Internal(format!("cannot serialise session: {e}")))
}

/// Session kept as JSON on disk
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(InfraError::from(err).into()),
        };
        match decode(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "discarding unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(InfraError::from)?;
        }
        std::fs::write(&self.path, encode(session)?).map_err(InfraError::from)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .map_err(InfraError::from)?;
        }

        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }
}

/// Session kept in the OS keychain
#[derive(Debug, Clone)]
pub struct KeyringSessionStore {
    service: String,
    account: String,
}

impl Default for KeyringSessionStore {
    fn default() -> Self {
        Self::new(KEYRING_SERVICE, KEYRING_ACCOUNT)
    }
}

impl KeyringSessionStore {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self { service: service.into(), account: account.into() }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, &self.account)
            .map_err(|e| CongregateError::from(InfraError::from(e)))
    }
}

impl SessionStore for KeyringSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        match self.entry()?.get_password() {
            Ok(raw) => decode(&raw).map(Some),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        self.entry()?.set_password(&encode(session)?).map_err(InfraError::from)?;
        debug!(service = %self.service, "session saved to keychain");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }
}

//! OS keyring session storage

use crate::error::{Result, StorageError};
use crate::storage::SessionStorage;

const KEYRING_SERVICE: &str = "eatgo";
const KEYRING_USER: &str = "access_token";

/// Stores the token in the OS keyring (Secret Service, Keychain, Credential Manager)
pub struct KeyringSessionStore {
    service: String,
}

impl KeyringSessionStore {
    /// # Errors
    ///
    /// Returns `StorageError::KeyringUnavailable` if the OS keyring cannot be
    /// accessed (e.g., headless Linux without Secret Service).
    pub fn new() -> Result<Self> {
        Self::with_service(KEYRING_SERVICE)
    }

    /// Use a custom keyring service name (separate profiles, tests)
    pub fn with_service(service: &str) -> Result<Self> {
        keyring::Entry::new(service, KEYRING_USER).map_err(|e| {
            StorageError::KeyringUnavailable(format!("OS keyring not accessible: {}", e))
        })?;

        Ok(Self {
            service: service.to_string(),
        })
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, KEYRING_USER)
            .map_err(|e| StorageError::KeyringUnavailable(e.to_string()).into())
    }
}

impl SessionStorage for KeyringSessionStore {
    fn get(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) if token.is_empty() => Ok(None),
            Ok(token) => {
                tracing::debug!("Loaded session token from OS keyring ({})", self.service);
                Ok(Some(token))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StorageError::Keyring(e.to_string()).into()),
        }
    }

    fn set(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return self.clear();
        }

        self.entry()?
            .set_password(token)
            .map_err(|e| StorageError::Keyring(e.to_string()))?;

        tracing::debug!("Stored session token in OS keyring ({})", self.service);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_password() {
            Ok(()) => {
                tracing::debug!("Deleted session token from OS keyring ({})", self.service);
                Ok(())
            }
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StorageError::Keyring(e.to_string()).into()),
        }
    }

    fn backend_name(&self) -> &str {
        "keyring"
    }
}

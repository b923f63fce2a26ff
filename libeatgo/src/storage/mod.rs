//! Session token storage
//!
//! Remembers the single access token across runs. Three backends share the
//! [`SessionStorage`] trait:
//! - `FileSessionStore`: one owner-readable file under the data directory
//! - `KeyringSessionStore`: OS-native secure storage
//! - `MemorySessionStore`: process memory, used by tests and `storage = "memory"`
//!
//! # Example
//!
//! ```no_run
//! use libeatgo::config::SessionConfig;
//! use libeatgo::storage::open_session_storage;
//!
//! # fn example() -> libeatgo::Result<()> {
//! let storage = open_session_storage(&SessionConfig::default())?;
//!
//! storage.set("ACCESS_TOKEN")?;
//! assert_eq!(storage.get()?.as_deref(), Some("ACCESS_TOKEN"));
//!
//! storage.clear()?;
//! assert!(storage.get()?.is_none());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::config::{SessionConfig, StorageBackend};
use crate::error::Result;

pub mod file;
pub mod os_keyring;
pub mod memory;

pub use file::FileSessionStore;
pub use os_keyring::KeyringSessionStore;
pub use memory::MemorySessionStore;

/// Persistent get/set/clear for the session token
pub trait SessionStorage: Send + Sync {
    /// Stored token, or `None` when logged out
    fn get(&self) -> Result<Option<String>>;

    /// Remember `token`; an empty token clears instead
    fn set(&self, token: &str) -> Result<()>;

    /// Forget the token. Clearing an absent token is not an error.
    fn clear(&self) -> Result<()>;

    fn backend_name(&self) -> &str;
}

/// Build the backend named by the session configuration
pub fn open_session_storage(config: &SessionConfig) -> Result<Arc<dyn SessionStorage>> {
    let storage: Arc<dyn SessionStorage> = match config.storage {
        StorageBackend::File => Arc::new(FileSessionStore::new(config.expand_path())),
        StorageBackend::Keyring => Arc::new(KeyringSessionStore::new()?),
        StorageBackend::Memory => Arc::new(MemorySessionStore::new()),
    };

    tracing::debug!("Using {} session storage", storage.backend_name());
    Ok(storage)
}

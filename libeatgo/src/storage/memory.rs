//! In-memory session storage

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::error::Result;
use crate::storage::SessionStorage;

/// Keeps the token in process memory and counts writes
///
/// Nothing survives a restart. Tests use the counters to check how often
/// coordinators touched storage.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<String>>,
    set_calls: AtomicUsize,
    clear_calls: AtomicUsize,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already stored
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
            ..Self::default()
        }
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }

    fn replace(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }
}

impl SessionStorage for MemorySessionStore {
    fn get(&self) -> Result<Option<String>> {
        let token = match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        Ok(token)
    }

    fn set(&self, token: &str) -> Result<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if token.is_empty() {
            self.replace(None);
        } else {
            self.replace(Some(token.to_string()));
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        self.replace(None);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

//! Store: the single owner and writer of [`AppState`]
//!
//! Actions are applied one at a time, to completion, in the order they
//! arrive. Coordinators running on other tasks never touch state: they send
//! actions through a [`Dispatcher`], and the thread owning the store applies
//! them with [`Store::process_pending`].
//!
//! State is published as an `Arc` that is swapped whole on each transition,
//! so a reader holding an earlier snapshot keeps a consistent view.
//!
//! # Example
//!
//! ```
//! use eatgo_client::app::{selectors, Action, Store};
//! use libeatgo::types::Region;
//!
//! let mut store = Store::new();
//! let dispatcher = store.dispatcher();
//!
//! dispatcher
//!     .dispatch(Action::SetRegions(vec![Region { id: 1, name: "서울".to_string() }]))
//!     .unwrap();
//! dispatcher.dispatch(Action::SelectRegion(1)).unwrap();
//! assert_eq!(store.process_pending(), 2);
//!
//! let name = store.select(|s| selectors::selected_region(s).map(|r| r.name.clone()));
//! assert_eq!(name.as_deref(), Some("서울"));
//! ```

use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use libeatgo::storage::SessionStorage;

use super::actions::Action;
use super::reducer::reduce;
use super::state::AppState;
use crate::error::{ClientError, Result};

/// Called with the new state after every applied action
pub type Listener = Box<dyn Fn(&AppState) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Cloneable handle that queues actions for the store
///
/// Safe to move into async tasks; queued actions are applied in send order.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    sender: Sender<Action>,
}

impl Dispatcher {
    /// Queue `action` for the owning store
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Dispatch` if the store has been dropped.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        let kind = action.kind();
        self.sender
            .send(action)
            .map_err(|_| ClientError::Dispatch(format!("store dropped before {}", kind)))
    }
}

pub struct Store {
    state: Arc<AppState>,
    sender: Sender<Action>,
    receiver: Receiver<Action>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            state: Arc::new(state),
            sender,
            receiver,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Initial state with the access token remembered by `storage`
    ///
    /// # Errors
    ///
    /// Propagates the storage read failure; nothing is assumed about the session.
    pub fn rehydrate(storage: &dyn SessionStorage) -> Result<Self> {
        let state = match storage.get()? {
            Some(token) => {
                tracing::debug!(
                    "Restored session token from {} storage",
                    storage.backend_name()
                );
                AppState::with_access_token(token)
            }
            None => AppState::default(),
        };
        Ok(Self::with_state(state))
    }

    /// Current state snapshot
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Project the current state; the result may borrow from the store
    pub fn select<'s, T>(&'s self, selector: impl FnOnce(&'s AppState) -> T) -> T {
        selector(self.state.as_ref())
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher {
            sender: self.sender.clone(),
        }
    }

    /// Apply one action now
    pub fn dispatch(&mut self, action: Action) {
        if action == Action::Unknown {
            // Identity transition: keep the same snapshot and skip listeners
            tracing::trace!("ignoring unknown action");
            return;
        }

        tracing::trace!(action = action.kind(), "dispatch");
        let current = Arc::unwrap_or_clone(std::mem::take(&mut self.state));
        self.state = Arc::new(reduce(current, action));

        for (_, listener) in &self.listeners {
            listener(self.state.as_ref());
        }
    }

    /// Apply every queued action in the order it was sent
    ///
    /// Returns the number of actions applied.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.receiver.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        applied
    }

    pub fn subscribe(&mut self, listener: impl Fn(&AppState) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libeatgo::storage::MemorySessionStore;
    use libeatgo::types::Region;
    use std::sync::Mutex;

    fn region(id: u64, name: &str) -> Region {
        Region {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_new_store_has_default_state() {
        let store = Store::new();
        assert_eq!(*store.state(), AppState::default());
    }

    #[test]
    fn test_dispatch_applies_immediately() {
        let mut store = Store::new();
        store.dispatch(Action::access_token("T"));
        assert_eq!(store.select(|s| s.access_token.clone()), "T");
    }

    #[test]
    fn test_snapshots_are_not_mutated() {
        let mut store = Store::new();
        let before = store.state();

        store.dispatch(Action::access_token("T"));

        assert_eq!(before.access_token, "");
        assert_eq!(store.state().access_token, "T");
    }

    #[test]
    fn test_queued_actions_apply_in_order() {
        let mut store = Store::new();
        let dispatcher = store.dispatcher();

        dispatcher
            .dispatch(Action::SetRegions(vec![region(1, "서울")]))
            .unwrap();
        dispatcher
            .dispatch(Action::SetRegions(vec![region(2, "부산")]))
            .unwrap();

        assert_eq!(store.process_pending(), 2);
        assert_eq!(store.state().regions[0].name, "부산");
        assert_eq!(store.process_pending(), 0);
    }

    #[test]
    fn test_unknown_action_keeps_snapshot() {
        let mut store = Store::new();
        let before = store.state();

        store.dispatch(Action::Unknown);
        assert!(Arc::ptr_eq(&before, &store.state()));
    }

    #[test]
    fn test_listeners_see_each_transition() {
        let mut store = Store::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let id = store.subscribe(move |state| {
            sink.lock().unwrap().push(state.access_token.clone());
        });

        store.dispatch(Action::access_token("A"));
        store.dispatch(Action::ClearSession);
        assert!(store.unsubscribe(id));
        store.dispatch(Action::access_token("B"));

        assert_eq!(*seen.lock().unwrap(), vec!["A".to_string(), String::new()]);
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn test_dispatcher_fails_after_store_dropped() {
        let store = Store::new();
        let dispatcher = store.dispatcher();
        drop(store);

        let result = dispatcher.dispatch(Action::ClearSession);
        assert!(matches!(result, Err(ClientError::Dispatch(_))));
    }

    #[test]
    fn test_rehydrate_restores_token() {
        let storage = MemorySessionStore::with_token("STORED");
        let store = Store::rehydrate(&storage).unwrap();

        assert_eq!(store.state().access_token, "STORED");
        assert!(store.state().is_logged_in());
    }

    #[test]
    fn test_rehydrate_without_token_is_logged_out() {
        let storage = MemorySessionStore::new();
        let store = Store::rehydrate(&storage).unwrap();

        assert_eq!(*store.state(), AppState::default());
    }
}

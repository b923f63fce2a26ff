//! Application module
//!
//! Contains the core application architecture:
//! - Actions: What happened
//! - State: What is true right now
//! - Reducer: Pure function (State, Action) -> State
//! - Selectors: Read-only projections of state
//! - Store: Owns the state and applies actions one at a time
//! - Effects: Async coordinators that turn I/O results into actions

pub mod actions;
pub mod effects;
pub mod reducer;
pub mod selectors;
pub mod state;
pub mod store;

// Re-export commonly used types
pub use actions::{AccessTokenPayload, Action, FieldChange};
pub use effects::Effects;
pub use reducer::{reduce, reduce_or_init};
pub use state::{AppState, FormFields};
pub use store::{Dispatcher, Store, SubscriptionId};

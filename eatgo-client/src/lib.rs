//! eatgo-client library
//!
//! The client-side state engine: actions, state, the reducer, selectors,
//! the store that owns state, and the coordinators that bridge API and
//! storage I/O into dispatched actions.

pub mod app;
pub mod error;
pub mod output;

// Re-export commonly used types
pub use app::{reduce, selectors, Action, AppState, Dispatcher, Effects, Store};
pub use error::{ClientError, Result};

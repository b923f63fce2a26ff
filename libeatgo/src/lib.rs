//! EatGo - client library for the restaurant discovery and review service
//!
//! This library provides the collaborators the client state engine talks to:
//! the remote API client, the session token storage, and the shared
//! configuration, error and logging plumbing.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use api::{ApiClient, HttpApiClient};
pub use config::Config;
pub use error::{EatgoError, Result};
pub use storage::{open_session_storage, SessionStorage};
pub use types::{
    Category, CategoryId, Credentials, MenuItem, Region, RegionId, RestaurantDetail,
    RestaurantId, RestaurantQuery, RestaurantSummary, Review, ReviewSubmission, Session,
};

//! Remote API abstraction
//!
//! The state engine never talks HTTP itself. Everything it needs from the
//! server goes through the [`ApiClient`] trait, which has a real
//! implementation backed by `reqwest` and a mock for tests.
//!
//! # Examples
//!
//! ```no_run
//! use libeatgo::api::{ApiClient, HttpApiClient};
//! use libeatgo::config::ApiConfig;
//! use libeatgo::types::RestaurantQuery;
//!
//! # async fn example() -> libeatgo::Result<()> {
//! let client = HttpApiClient::new(&ApiConfig::default())?;
//!
//! let regions = client.fetch_regions().await?;
//! let restaurants = client
//!     .fetch_restaurants(&RestaurantQuery {
//!         region_name: regions[0].name.clone(),
//!         category_id: 1,
//!     })
//!     .await?;
//! println!("{} restaurants", restaurants.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    Category, Credentials, Region, RestaurantDetail, RestaurantId, RestaurantQuery,
    RestaurantSummary, ReviewSubmission, Session,
};

pub mod http;

// Mock client is available for all builds so dependent crates can test against it
pub mod mock;

pub use http::HttpApiClient;
pub use mock::{MockApiClient, MockCall, MockConfig, MockOperation};

/// Read and write operations offered by the EatGo server
///
/// Every operation may fail with a network, status or decode error; callers
/// treat all of these as transport failures.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// List all regions
    async fn fetch_regions(&self) -> Result<Vec<Region>>;

    /// List all categories
    async fn fetch_categories(&self) -> Result<Vec<Category>>;

    /// List restaurants in a region, filtered by category
    async fn fetch_restaurants(&self, query: &RestaurantQuery) -> Result<Vec<RestaurantSummary>>;

    /// Fetch one restaurant with menu and reviews
    async fn fetch_restaurant(&self, restaurant_id: RestaurantId) -> Result<RestaurantDetail>;

    /// Exchange credentials for an access token
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Authentication` when the server rejects the credentials.
    async fn post_login(&self, credentials: &Credentials) -> Result<Session>;

    /// Post a review as the user owning `submission.access_token`
    async fn post_review(&self, submission: &ReviewSubmission) -> Result<()>;
}

//! Mock API client for testing
//!
//! Serves fixture data, records every call, and can be told to fail
//! individual operations. Coordinator tests use it in place of the server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::api::ApiClient;
use crate::error::{ApiError, Result};
use crate::types::{
    Category, Credentials, MenuItem, Region, RestaurantDetail, RestaurantId, RestaurantQuery,
    RestaurantSummary, Review, ReviewSubmission, Session,
};

/// Operation selector for failure injection and call counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    FetchRegions,
    FetchCategories,
    FetchRestaurants,
    FetchRestaurant,
    PostLogin,
    PostReview,
}

/// A recorded call with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    FetchRegions,
    FetchCategories,
    FetchRestaurants(RestaurantQuery),
    FetchRestaurant(RestaurantId),
    PostLogin { email: String },
    PostReview(ReviewSubmission),
}

impl MockCall {
    pub fn operation(&self) -> MockOperation {
        match self {
            MockCall::FetchRegions => MockOperation::FetchRegions,
            MockCall::FetchCategories => MockOperation::FetchCategories,
            MockCall::FetchRestaurants(_) => MockOperation::FetchRestaurants,
            MockCall::FetchRestaurant(_) => MockOperation::FetchRestaurant,
            MockCall::PostLogin { .. } => MockOperation::PostLogin,
            MockCall::PostReview(_) => MockOperation::PostReview,
        }
    }
}

/// Configuration for mock client behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub regions: Vec<Region>,
    pub categories: Vec<Category>,
    pub restaurants: Vec<RestaurantSummary>,

    /// Served by `fetch_restaurant` when the id matches, otherwise 404
    pub restaurant: Option<RestaurantDetail>,

    /// Token handed out by `post_login`
    pub access_token: String,

    /// Operations that fail, and how
    pub failures: HashMap<MockOperation, ApiError>,

    /// Delay before completing operations (simulates network latency)
    pub delay: Duration,

    /// Every call made, in order
    pub calls: Arc<Mutex<Vec<MockCall>>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
            categories: Vec::new(),
            restaurants: Vec::new(),
            restaurant: None,
            access_token: "ACCESS_TOKEN".to_string(),
            failures: HashMap::new(),
            delay: Duration::from_millis(0),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

pub struct MockApiClient {
    config: MockConfig,
}

impl MockApiClient {
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// Mock serving a small Seoul/Korean-food data set
    pub fn with_fixtures() -> Self {
        Self::new(MockConfig {
            regions: vec![
                Region { id: 1, name: "서울".to_string() },
                Region { id: 2, name: "부산".to_string() },
            ],
            categories: vec![
                Category { id: 1, name: "한식".to_string() },
                Category { id: 2, name: "중식".to_string() },
            ],
            restaurants: vec![RestaurantSummary {
                id: 1,
                name: "마법사주방".to_string(),
                address: Some("서울 강남구".to_string()),
                category_id: Some(1),
            }],
            restaurant: Some(RestaurantDetail {
                id: 1,
                name: "마법사주방".to_string(),
                address: Some("서울 강남구".to_string()),
                category_id: Some(1),
                menu_items: vec![MenuItem { id: 1, name: "비빔밥".to_string() }],
                reviews: vec![Review {
                    id: 1,
                    name: "테스터".to_string(),
                    score: 5,
                    description: "맛있어요".to_string(),
                }],
            }),
            ..Default::default()
        })
    }

    /// Make `operation` fail with `error`
    pub fn failing(mut self, operation: MockOperation, error: ApiError) -> Self {
        self.config.failures.insert(operation, error);
        self
    }

    /// Delay every operation by `delay`
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    /// All calls made so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.config
            .calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Number of calls made to `operation`
    pub fn call_count(&self, operation: MockOperation) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    async fn enter(&self, call: MockCall) -> Result<()> {
        let operation = call.operation();
        if let Ok(mut calls) = self.config.calls.lock() {
            calls.push(call);
        }

        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }

        match self.config.failures.get(&operation) {
            Some(error) => Err(error.clone().into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ApiClient for MockApiClient {
    async fn fetch_regions(&self) -> Result<Vec<Region>> {
        self.enter(MockCall::FetchRegions).await?;
        Ok(self.config.regions.clone())
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        self.enter(MockCall::FetchCategories).await?;
        Ok(self.config.categories.clone())
    }

    async fn fetch_restaurants(&self, query: &RestaurantQuery) -> Result<Vec<RestaurantSummary>> {
        self.enter(MockCall::FetchRestaurants(query.clone())).await?;
        Ok(self
            .config
            .restaurants
            .iter()
            .filter(|r| r.category_id.map_or(true, |id| id == query.category_id))
            .cloned()
            .collect())
    }

    async fn fetch_restaurant(&self, restaurant_id: RestaurantId) -> Result<RestaurantDetail> {
        self.enter(MockCall::FetchRestaurant(restaurant_id)).await?;
        self.config
            .restaurant
            .iter()
            .find(|r| r.id == restaurant_id)
            .cloned()
            .ok_or_else(|| {
                ApiError::Status {
                    status: 404,
                    message: format!("fetch restaurant: no restaurant {}", restaurant_id),
                }
                .into()
            })
    }

    async fn post_login(&self, credentials: &Credentials) -> Result<Session> {
        self.enter(MockCall::PostLogin {
            email: credentials.email.clone(),
        })
        .await?;
        Ok(Session {
            access_token: self.config.access_token.clone(),
        })
    }

    async fn post_review(&self, submission: &ReviewSubmission) -> Result<()> {
        self.enter(MockCall::PostReview(submission.clone())).await
    }
}

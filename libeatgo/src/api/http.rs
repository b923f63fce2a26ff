//! HTTP implementation of [`ApiClient`](super::ApiClient)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

use crate::api::ApiClient;
use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::types::{
    Category, Credentials, Region, RestaurantDetail, RestaurantId, RestaurantQuery,
    RestaurantSummary, ReviewSubmission, Session,
};

/// Client for the customer API (reads and reviews) and the login API (sessions)
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
    login_url: String,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            login_url: config.login_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T> {
        tracing::debug!(%url, "GET ({})", context);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport_error(e, context))?;

        let response = check_status(response, context).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(format!("{}: {}", context, e)).into())
    }
}

/// Join a path onto a base URL
fn endpoint(base: &str, path: &str) -> Result<Url> {
    let raw = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)).into())
}

pub fn regions_url(base: &str) -> Result<Url> {
    endpoint(base, "regions")
}

pub fn categories_url(base: &str) -> Result<Url> {
    endpoint(base, "categories")
}

/// `/restaurants?region=<name>&category=<id>`, with the region name percent-encoded
pub fn restaurants_url(base: &str, query: &RestaurantQuery) -> Result<Url> {
    let mut url = endpoint(base, "restaurants")?;
    url.query_pairs_mut()
        .append_pair("region", &query.region_name)
        .append_pair("category", &query.category_id.to_string());
    Ok(url)
}

pub fn restaurant_url(base: &str, restaurant_id: RestaurantId) -> Result<Url> {
    endpoint(base, &format!("restaurants/{}", restaurant_id))
}

pub fn reviews_url(base: &str, restaurant_id: RestaurantId) -> Result<Url> {
    endpoint(base, &format!("restaurants/{}/reviews", restaurant_id))
}

pub fn session_url(login_base: &str) -> Result<Url> {
    endpoint(login_base, "session")
}

/// Map a non-2xx status to an [`ApiError`]
///
/// 401 and 403 are authentication failures; every other status keeps its code.
pub fn map_status(status: u16, context: &str, body: &str) -> ApiError {
    let detail = body.trim();
    let message = if detail.is_empty() {
        context.to_string()
    } else {
        format!("{}: {}", context, detail)
    };

    match status {
        401 | 403 => ApiError::Authentication(message),
        _ => ApiError::Status { status, message },
    }
}

fn map_transport_error(error: reqwest::Error, context: &str) -> ApiError {
    if error.is_decode() {
        ApiError::Decode(format!("{}: {}", context, error))
    } else if error.is_timeout() {
        ApiError::Network(format!("{}: request timed out", context))
    } else {
        ApiError::Network(format!("{}: {}", context, error))
    }
}

async fn check_status(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), "{} failed", context);
    Err(map_status(status.as_u16(), context, &body).into())
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn fetch_regions(&self) -> Result<Vec<Region>> {
        self.get_json(regions_url(&self.base_url)?, "fetch regions")
            .await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        self.get_json(categories_url(&self.base_url)?, "fetch categories")
            .await
    }

    async fn fetch_restaurants(&self, query: &RestaurantQuery) -> Result<Vec<RestaurantSummary>> {
        self.get_json(restaurants_url(&self.base_url, query)?, "fetch restaurants")
            .await
    }

    async fn fetch_restaurant(&self, restaurant_id: RestaurantId) -> Result<RestaurantDetail> {
        self.get_json(
            restaurant_url(&self.base_url, restaurant_id)?,
            "fetch restaurant",
        )
        .await
    }

    async fn post_login(&self, credentials: &Credentials) -> Result<Session> {
        let url = session_url(&self.login_url)?;
        tracing::debug!(%url, email = %credentials.email, "POST (login)");

        let response = self
            .client
            .post(url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| map_transport_error(e, "login"))?;

        let response = check_status(response, "login").await?;

        response
            .json::<Session>()
            .await
            .map_err(|e| ApiError::Decode(format!("login: {}", e)).into())
    }

    async fn post_review(&self, submission: &ReviewSubmission) -> Result<()> {
        let url = reviews_url(&self.base_url, submission.restaurant_id)?;
        tracing::debug!(%url, "POST (review)");

        let response = self
            .client
            .post(url)
            .bearer_auth(&submission.access_token)
            .json(&submission.body())
            .send()
            .await
            .map_err(|e| map_transport_error(e, "post review"))?;

        // The server answers with the stored review; nothing here needs it
        check_status(response, "post review").await?;
        Ok(())
    }
}

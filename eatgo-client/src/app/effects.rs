//! Async coordinators
//!
//! Each coordinator awaits one piece of I/O (API or session storage) and
//! only then queues the resulting action on the store's [`Dispatcher`].
//! On failure the error is returned to the caller and nothing is dispatched,
//! so the reducer never sees transport errors.
//!
//! There is no request fencing: if two listing loads race, whichever settles
//! last is dispatched last and wins. Callers that need ordering await one
//! coordinator before starting the next.

use std::sync::Arc;

use libeatgo::api::ApiClient;
use libeatgo::storage::SessionStorage;
use libeatgo::types::{RestaurantId, RestaurantQuery, ReviewSubmission};

use super::actions::Action;
use super::state::{review_field, FormFields};
use super::store::Dispatcher;
use crate::error::Result;

/// Coordinators bound to one API client, one session storage and one store
#[derive(Clone)]
pub struct Effects {
    api: Arc<dyn ApiClient>,
    storage: Arc<dyn SessionStorage>,
    dispatcher: Dispatcher,
}

impl Effects {
    pub fn new(
        api: Arc<dyn ApiClient>,
        storage: Arc<dyn SessionStorage>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            api,
            storage,
            dispatcher,
        }
    }

    pub async fn load_regions(&self) -> Result<()> {
        let regions = self.api.fetch_regions().await?;
        tracing::debug!(count = regions.len(), "Loaded regions");
        self.dispatcher.dispatch(Action::SetRegions(regions))
    }

    pub async fn load_categories(&self) -> Result<()> {
        let categories = self.api.fetch_categories().await?;
        tracing::debug!(count = categories.len(), "Loaded categories");
        self.dispatcher.dispatch(Action::SetCategories(categories))
    }

    /// Load regions and categories concurrently (the mount-time fetch)
    ///
    /// Both requests must succeed before either list is dispatched.
    pub async fn load_filters(&self) -> Result<()> {
        let (regions, categories) =
            futures::try_join!(self.api.fetch_regions(), self.api.fetch_categories())?;
        tracing::debug!(
            regions = regions.len(),
            categories = categories.len(),
            "Loaded filters"
        );
        self.dispatcher.dispatch(Action::SetRegions(regions))?;
        self.dispatcher.dispatch(Action::SetCategories(categories))
    }

    pub async fn load_restaurants(&self, query: &RestaurantQuery) -> Result<()> {
        let restaurants = self.api.fetch_restaurants(query).await?;
        tracing::debug!(
            region = %query.region_name,
            category = query.category_id,
            count = restaurants.len(),
            "Loaded restaurants"
        );
        self.dispatcher.dispatch(Action::SetRestaurants(restaurants))
    }

    pub async fn load_restaurant(&self, restaurant_id: RestaurantId) -> Result<()> {
        let restaurant = self.api.fetch_restaurant(restaurant_id).await?;
        tracing::debug!(restaurant_id, "Loaded restaurant");
        self.dispatcher.dispatch(Action::SetRestaurant(restaurant))
    }

    /// Log in with the `email` and `password` login fields
    ///
    /// On success the token is dispatched and then persisted. A failure to
    /// persist is logged and does not undo the login; the session just won't
    /// survive a restart.
    ///
    /// # Errors
    ///
    /// Returns the API error (e.g. `ApiError::Authentication`) without
    /// dispatching anything.
    pub async fn request_session(&self, login_fields: &FormFields) -> Result<()> {
        let credentials = login_fields.credentials();
        tracing::info!(email = %credentials.email, "Requesting session");

        let session = match self.api.post_login(&credentials).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                return Err(e.into());
            }
        };

        self.dispatcher
            .dispatch(Action::access_token(session.access_token.clone()))?;

        if let Err(e) = self.storage.set(&session.access_token) {
            tracing::warn!(
                "Logged in, but could not remember the session in {} storage: {}",
                self.storage.backend_name(),
                e
            );
        }

        Ok(())
    }

    /// Post the review form for `restaurant_id` as the `access_token` owner
    ///
    /// Dispatches nothing; callers that want the new review on screen follow
    /// up with [`Effects::load_restaurant`].
    pub async fn submit_review(
        &self,
        access_token: &str,
        review_fields: &FormFields,
        restaurant_id: RestaurantId,
    ) -> Result<()> {
        let submission = ReviewSubmission {
            access_token: access_token.to_string(),
            score: review_fields.get(review_field::SCORE).to_string(),
            description: review_fields.get(review_field::DESCRIPTION).to_string(),
            restaurant_id,
        };

        self.api.post_review(&submission).await?;
        tracing::info!(restaurant_id, "Review submitted");
        Ok(())
    }

    /// Forget the stored token, then end the session in state
    ///
    /// # Errors
    ///
    /// Returns the storage error without dispatching, so state and storage
    /// never disagree about a logout.
    pub async fn clear_session(&self) -> Result<()> {
        self.storage.clear()?;
        tracing::info!("Session cleared");
        self.dispatcher.dispatch(Action::ClearSession)
    }
}

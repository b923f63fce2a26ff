//! Core types for EatGo
//!
//! These mirror the JSON shapes of the remote API, so field names are
//! camelCase on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

pub type RegionId = u64;
pub type CategoryId = u64;
pub type RestaurantId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Restaurant as it appears in a filtered listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSummary {
    pub id: RestaurantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

/// Restaurant with menu and reviews, loaded by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetail {
    pub id: RestaurantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub score: u32,
    pub description: String,
}

/// Filter for the restaurant listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantQuery {
    pub region_name: String,
    pub category_id: CategoryId,
}

/// Login request body
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
}

/// Everything needed to post a review on behalf of a logged-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSubmission {
    pub access_token: String,
    pub score: String,
    pub description: String,
    pub restaurant_id: RestaurantId,
}

/// Review request body (the token travels in the Authorization header)
#[derive(Debug, Serialize)]
pub(crate) struct ReviewBody<'a> {
    pub score: &'a str,
    pub description: &'a str,
}

impl ReviewSubmission {
    pub(crate) fn body(&self) -> ReviewBody<'_> {
        ReviewBody {
            score: &self.score,
            description: &self.description,
        }
    }
}

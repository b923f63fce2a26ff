//! Application state
//!
//! Immutable state structure. All state transitions happen through the
//! reducer (see `reducer.rs`).

use std::collections::BTreeMap;
use std::sync::Arc;

use libeatgo::types::{
    Category, CategoryId, Credentials, Region, RegionId, RestaurantDetail, RestaurantSummary,
};
use serde::{Deserialize, Serialize};

/// Login form field names
pub mod login_field {
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
}

/// Review form field names
pub mod review_field {
    pub const SCORE: &str = "score";
    pub const DESCRIPTION: &str = "description";
}

/// Root application state
///
/// This is the single source of truth for the client. Lists are shared
/// slices, so a transition that doesn't touch a list hands the very same
/// allocation to the next state.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub regions: Arc<[Region]>,

    pub categories: Arc<[Category]>,

    /// Replaced wholesale on every listing fetch
    pub restaurants: Arc<[RestaurantSummary]>,

    /// Absent until loaded by id
    pub restaurant: Option<Arc<RestaurantDetail>>,

    /// Id of the selected region; set only if it matched `regions` when selected.
    /// Resolve through `selectors::selected_region`.
    pub selected_region_id: Option<RegionId>,

    /// Id of the selected category, same rules as `selected_region_id`
    pub selected_category_id: Option<CategoryId>,

    pub login_fields: FormFields,

    pub review_fields: FormFields,

    /// Empty means logged out
    pub access_token: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            regions: Vec::<Region>::new().into(),
            categories: Vec::<Category>::new().into(),
            restaurants: Vec::<RestaurantSummary>::new().into(),
            restaurant: None,
            selected_region_id: None,
            selected_category_id: None,
            login_fields: FormFields::with_keys(&[login_field::EMAIL, login_field::PASSWORD]),
            review_fields: FormFields::with_keys(&[
                review_field::SCORE,
                review_field::DESCRIPTION,
            ]),
            access_token: String::new(),
        }
    }
}

impl AppState {
    /// Create new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default state carrying a previously stored session token
    pub fn with_access_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    pub fn is_logged_in(&self) -> bool {
        !self.access_token.is_empty()
    }
}

/// Form values keyed by field name
///
/// Edits replace one key and keep every other key, including names the
/// client itself never defines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields present with empty values
    pub fn with_keys(keys: &[&str]) -> Self {
        keys.iter()
            .map(|key| (key.to_string(), String::new()))
            .collect()
    }

    /// Value of `name`, or `""` when the field was never set
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Copy with `name` set to `value`
    pub fn with(mut self, name: String, value: String) -> Self {
        self.0.insert(name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Login body built from the `email` and `password` fields
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.get(login_field::EMAIL).to_string(),
            password: self.get(login_field::PASSWORD).to_string(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

//! Read-only projections of [`AppState`]
//!
//! Presentation code reads state only through these, so the state layout
//! can change without touching callers.

use libeatgo::types::{
    Category, Credentials, Region, RestaurantDetail, RestaurantQuery, RestaurantSummary,
};

use super::state::{AppState, FormFields};

pub fn regions(state: &AppState) -> &[Region] {
    &state.regions
}

pub fn categories(state: &AppState) -> &[Category] {
    &state.categories
}

pub fn restaurants(state: &AppState) -> &[RestaurantSummary] {
    &state.restaurants
}

pub fn restaurant(state: &AppState) -> Option<&RestaurantDetail> {
    state.restaurant.as_deref()
}

/// The selected region, resolved against the current region list
///
/// Returns `None` if the list was replaced and no longer holds the id.
pub fn selected_region(state: &AppState) -> Option<&Region> {
    let id = state.selected_region_id?;
    state.regions.iter().find(|region| region.id == id)
}

/// The selected category, resolved against the current category list
pub fn selected_category(state: &AppState) -> Option<&Category> {
    let id = state.selected_category_id?;
    state.categories.iter().find(|category| category.id == id)
}

pub fn login_fields(state: &AppState) -> &FormFields {
    &state.login_fields
}

pub fn review_fields(state: &AppState) -> &FormFields {
    &state.review_fields
}

pub fn credentials(state: &AppState) -> Credentials {
    state.login_fields.credentials()
}

pub fn access_token(state: &AppState) -> &str {
    &state.access_token
}

pub fn is_logged_in(state: &AppState) -> bool {
    state.is_logged_in()
}

/// Listing filter from the current selections, once both are made
pub fn restaurant_query(state: &AppState) -> Option<RestaurantQuery> {
    let region = selected_region(state)?;
    let category = selected_category(state)?;
    Some(RestaurantQuery {
        region_name: region.name.clone(),
        category_id: category.id,
    })
}

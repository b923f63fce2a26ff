//! Pure reducer function for state transitions
//!
//! `(State, Action) -> State`, with no side effects. Storage and network
//! work happens in the coordinators (see `effects.rs`), never here.

use std::sync::Arc;

use super::actions::{AccessTokenPayload, Action, FieldChange};
use super::state::AppState;

/// Pure reducer function
///
/// Takes current state and an action, returns new state. Fields the action
/// doesn't touch move into the new state unchanged.
///
/// # Purity Guarantees
///
/// - No network requests
/// - No storage access (`ClearSession` only resets the token)
/// - Deterministic (same inputs -> same output)
/// - Never fails: unmatched selections become absent, unknown actions are ignored
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === Data arrived ===
        Action::SetRegions(regions) => AppState {
            regions: regions.into(),
            ..state
        },

        Action::SetCategories(categories) => AppState {
            categories: categories.into(),
            ..state
        },

        Action::SetRestaurants(restaurants) => AppState {
            restaurants: restaurants.into(),
            ..state
        },

        Action::SetRestaurant(restaurant) => AppState {
            restaurant: Some(Arc::new(restaurant)),
            ..state
        },

        // === Selections ===
        Action::SelectRegion(id) => {
            let selected_region_id = state.regions.iter().find(|r| r.id == id).map(|r| r.id);
            AppState {
                selected_region_id,
                ..state
            }
        }

        Action::SelectCategory(id) => {
            let selected_category_id = state
                .categories
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.id);
            AppState {
                selected_category_id,
                ..state
            }
        }

        // === Form edits ===
        Action::SetLoginFields(FieldChange { name, value }) => AppState {
            login_fields: state.login_fields.with(name, value),
            ..state
        },

        Action::SetReviewFields(FieldChange { name, value }) => AppState {
            review_fields: state.review_fields.with(name, value),
            ..state
        },

        // === Session ===
        Action::SetAccessToken(AccessTokenPayload { access_token }) => AppState {
            access_token,
            ..state
        },

        Action::ClearSession => AppState {
            access_token: String::new(),
            ..state
        },

        Action::Unknown => state,
    }
}

/// Reducer entry point for a store that may not have state yet
///
/// Absent state yields the default state; the action is not applied.
pub fn reduce_or_init(state: Option<AppState>, action: Action) -> AppState {
    match state {
        Some(state) => reduce(state, action),
        None => AppState::default(),
    }
}

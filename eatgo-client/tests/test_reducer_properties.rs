//! State transition properties
//!
//! Drives the reducer through the public API only, the way a front end
//! would, and checks the guarantees callers rely on.

use std::sync::Arc;

use eatgo_client::app::{reduce, reduce_or_init, selectors, Action, AppState, FormFields};
use libeatgo::types::{Category, Region, RestaurantSummary};

fn regions() -> Vec<Region> {
    vec![
        Region {
            id: 1,
            name: "서울".to_string(),
        },
        Region {
            id: 2,
            name: "부산".to_string(),
        },
    ]
}

fn categories() -> Vec<Category> {
    vec![
        Category {
            id: 1,
            name: "중식".to_string(),
        },
        Category {
            id: 2,
            name: "한식".to_string(),
        },
    ]
}

fn apply(state: AppState, actions: Vec<Action>) -> AppState {
    actions.into_iter().fold(state, reduce)
}

#[test]
fn test_absent_state_initializes_to_default() {
    let state = reduce_or_init(None, Action::SetRegions(regions()));
    assert_eq!(state, AppState::default());

    let state = reduce_or_init(None, Action::Unknown);
    assert_eq!(state, AppState::default());
}

#[test]
fn test_present_state_is_reduced() {
    let state = reduce_or_init(Some(AppState::new()), Action::SetRegions(regions()));
    assert_eq!(state.regions.len(), 2);
}

#[test]
fn test_set_regions_is_idempotent() {
    let once = reduce(AppState::new(), Action::SetRegions(regions()));
    let twice = reduce(once.clone(), Action::SetRegions(regions()));

    assert_eq!(once, twice);
}

#[test]
fn test_each_action_touches_only_its_field() {
    let base = apply(
        AppState::new(),
        vec![
            Action::SetRegions(regions()),
            Action::SetCategories(categories()),
            Action::access_token("T"),
        ],
    );

    let next = reduce(base.clone(), Action::SetRestaurants(Vec::new()));
    assert_eq!(next.regions, base.regions);
    assert_eq!(next.categories, base.categories);
    assert_eq!(next.access_token, base.access_token);
    assert_eq!(next.login_fields, base.login_fields);

    let next = reduce(base.clone(), Action::login_field("email", "a@b.c"));
    assert_eq!(next.review_fields, base.review_fields);
    assert_eq!(next.access_token, base.access_token);
    assert!(Arc::ptr_eq(&next.regions, &base.regions));
}

#[test]
fn test_selections_leave_lists_untouched() {
    let base = apply(
        AppState::new(),
        vec![
            Action::SetRegions(regions()),
            Action::SetCategories(categories()),
        ],
    );

    for action in [
        Action::SelectRegion(1),
        Action::SelectCategory(2),
        Action::SelectRegion(999),
        Action::SelectCategory(999),
    ] {
        let next = reduce(base.clone(), action);
        assert!(Arc::ptr_eq(&next.regions, &base.regions));
        assert!(Arc::ptr_eq(&next.categories, &base.categories));
        assert!(Arc::ptr_eq(&next.restaurants, &base.restaurants));
    }
}

#[test]
fn test_select_region_by_id() {
    let state = apply(
        AppState::new(),
        vec![Action::SetRegions(regions()), Action::SelectRegion(1)],
    );

    assert_eq!(
        selectors::selected_region(&state),
        Some(&Region {
            id: 1,
            name: "서울".to_string(),
        })
    );
}

#[test]
fn test_select_unknown_region_clears_selection() {
    let state = apply(
        AppState::new(),
        vec![
            Action::SetRegions(regions()),
            Action::SelectRegion(1),
            Action::SelectRegion(999),
        ],
    );

    assert!(selectors::selected_region(&state).is_none());
    assert!(state.selected_region_id.is_none());
}

#[test]
fn test_select_before_list_loaded_selects_nothing() {
    let state = reduce(AppState::new(), Action::SelectCategory(2));
    assert!(selectors::selected_category(&state).is_none());

    // Loading the list afterwards doesn't retroactively select
    let state = reduce(state, Action::SetCategories(categories()));
    assert!(selectors::selected_category(&state).is_none());
}

#[test]
fn test_clear_session_only_resets_token() {
    let state = apply(
        AppState::new(),
        vec![
            Action::SetRegions(regions()),
            Action::login_field("email", "tester@example.com"),
            Action::access_token("TOKEN"),
            Action::ClearSession,
        ],
    );

    assert_eq!(state.access_token, "");
    assert!(!state.is_logged_in());
    assert_eq!(state.regions.len(), 2);
    assert_eq!(state.login_fields.get("email"), "tester@example.com");
}

#[test]
fn test_review_fields_accumulate_from_empty() {
    let start = AppState {
        review_fields: FormFields::new(),
        ..AppState::new()
    };

    let state = apply(
        start,
        vec![
            Action::review_field("score", "5"),
            Action::review_field("description", "Good"),
        ],
    );

    assert_eq!(state.review_fields.len(), 2);
    assert_eq!(state.review_fields.get("score"), "5");
    assert_eq!(state.review_fields.get("description"), "Good");
}

#[test]
fn test_field_edit_keeps_unrelated_keys() {
    let state = apply(
        AppState::new(),
        vec![
            Action::login_field("remember", "yes"),
            Action::login_field("email", "a@b.c"),
            Action::login_field("email", "c@d.e"),
        ],
    );

    assert_eq!(state.login_fields.get("remember"), "yes");
    assert_eq!(state.login_fields.get("email"), "c@d.e");
    assert_eq!(state.login_fields.get("password"), "");
}

#[test]
fn test_unknown_action_is_identity() {
    let state = apply(
        AppState::new(),
        vec![Action::SetRegions(regions()), Action::access_token("T")],
    );

    assert_eq!(reduce(state.clone(), Action::Unknown), state);
}

#[test]
fn test_unknown_wire_action_is_identity() {
    let action: Action =
        serde_json::from_str(r#"{ "type": "somethingElse", "payload": 42 }"#).unwrap();
    assert_eq!(action, Action::Unknown);

    let state = AppState::with_access_token("T");
    assert_eq!(reduce(state.clone(), action), state);
}

#[test]
fn test_browse_scenario() {
    let state = apply(
        AppState::new(),
        vec![
            Action::SetRegions(regions()),
            Action::SetCategories(categories()),
            Action::SelectRegion(1),
            Action::SelectCategory(2),
        ],
    );

    let lists = apply(
        AppState::new(),
        vec![
            Action::SetRegions(regions()),
            Action::SetCategories(categories()),
        ],
    );
    assert_eq!(state.regions, lists.regions);
    assert_eq!(state.categories, lists.categories);

    let query = selectors::restaurant_query(&state).unwrap();
    assert_eq!(query.region_name, "서울");
    assert_eq!(query.category_id, 2);

    let state = reduce(
        state,
        Action::SetRestaurants(vec![RestaurantSummary {
            id: 7,
            name: "마법사주방".to_string(),
            address: Some("서울 강남구".to_string()),
            category_id: Some(2),
        }]),
    );

    assert_eq!(selectors::restaurants(&state).len(), 1);
    assert_eq!(
        selectors::selected_category(&state).map(|c| c.name.as_str()),
        Some("한식")
    );
}

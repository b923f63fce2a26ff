//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions. Actions are plain data:
//! they serialize as `{ "type": "...", "payload": ... }` and building one
//! never performs I/O.

use libeatgo::types::{
    Category, CategoryId, Region, RegionId, RestaurantDetail, RestaurantSummary,
};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Events that drive state transitions
///
/// Deserializing reads the `type` tag first, so an unrecognized type becomes
/// [`Action::Unknown`] whatever its payload looks like.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action {
    // === Data arrived ===
    /// Replace the region list
    SetRegions(Vec<Region>),

    /// Replace the category list
    SetCategories(Vec<Category>),

    /// Replace the restaurant listing
    SetRestaurants(Vec<RestaurantSummary>),

    /// Replace the loaded restaurant
    SetRestaurant(RestaurantDetail),

    // === Selections ===
    /// Select a region by id
    SelectRegion(RegionId),

    /// Select a category by id
    SelectCategory(CategoryId),

    // === Form edits ===
    /// One login form field changed
    SetLoginFields(FieldChange),

    /// One review form field changed
    SetReviewFields(FieldChange),

    // === Session ===
    /// Session granted
    SetAccessToken(AccessTokenPayload),

    /// Session ended
    ClearSession,

    /// Any action type this client doesn't know (leaves state untouched)
    Unknown,
}

/// Payload of a single form field edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenPayload {
    pub access_token: String,
}

impl Action {
    pub fn login_field(name: impl Into<String>, value: impl Into<String>) -> Self {
        Action::SetLoginFields(FieldChange {
            name: name.into(),
            value: value.into(),
        })
    }

    pub fn review_field(name: impl Into<String>, value: impl Into<String>) -> Self {
        Action::SetReviewFields(FieldChange {
            name: name.into(),
            value: value.into(),
        })
    }

    pub fn access_token(access_token: impl Into<String>) -> Self {
        Action::SetAccessToken(AccessTokenPayload {
            access_token: access_token.into(),
        })
    }

    /// Serialized `type` tag, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetRegions(_) => "setRegions",
            Action::SetCategories(_) => "setCategories",
            Action::SetRestaurants(_) => "setRestaurants",
            Action::SetRestaurant(_) => "setRestaurant",
            Action::SelectRegion(_) => "selectRegion",
            Action::SelectCategory(_) => "selectCategory",
            Action::SetLoginFields(_) => "setLoginFields",
            Action::SetReviewFields(_) => "setReviewFields",
            Action::SetAccessToken(_) => "setAccessToken",
            Action::ClearSession => "clearSession",
            Action::Unknown => "unknown",
        }
    }
}

/// `{ "type": ..., "payload": ... }` before the tag is interpreted
#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Envelope { kind, payload: body } = Envelope::deserialize(deserializer)?;

        // Unrecognized tags never look at the payload
        let action = match kind.as_str() {
            "setRegions" => serde_json::from_value(body).map(Action::SetRegions),
            "setCategories" => serde_json::from_value(body).map(Action::SetCategories),
            "setRestaurants" => serde_json::from_value(body).map(Action::SetRestaurants),
            "setRestaurant" => serde_json::from_value(body).map(Action::SetRestaurant),
            "selectRegion" => serde_json::from_value(body).map(Action::SelectRegion),
            "selectCategory" => serde_json::from_value(body).map(Action::SelectCategory),
            "setLoginFields" => serde_json::from_value(body).map(Action::SetLoginFields),
            "setReviewFields" => serde_json::from_value(body).map(Action::SetReviewFields),
            "setAccessToken" => serde_json::from_value(body).map(Action::SetAccessToken),
            "clearSession" => Ok(Action::ClearSession),
            _ => Ok(Action::Unknown),
        };
        action.map_err(|e| D::Error::custom(format!("{} payload: {}", kind, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_select_region_wire_shape() {
        let value = serde_json::to_value(Action::SelectRegion(1)).unwrap();
        assert_eq!(value, json!({ "type": "selectRegion", "payload": 1 }));
    }

    #[test]
    fn test_field_change_wire_shape() {
        let value = serde_json::to_value(Action::login_field("email", "tester@example.com"))
            .unwrap();
        assert_eq!(
            value,
            json!({
                "type": "setLoginFields",
                "payload": { "name": "email", "value": "tester@example.com" }
            })
        );
    }

    #[test]
    fn test_access_token_payload_is_camel_case() {
        let value = serde_json::to_value(Action::access_token("ACCESS_TOKEN")).unwrap();
        assert_eq!(
            value,
            json!({ "type": "setAccessToken", "payload": { "accessToken": "ACCESS_TOKEN" } })
        );
    }

    #[test]
    fn test_clear_session_has_no_payload() {
        let action: Action = serde_json::from_value(json!({ "type": "clearSession" })).unwrap();
        assert_eq!(action, Action::ClearSession);
    }

    #[test]
    fn test_set_regions_from_json() {
        let action: Action = serde_json::from_value(json!({
            "type": "setRegions",
            "payload": [{ "id": 1, "name": "서울" }]
        }))
        .unwrap();

        assert_eq!(
            action,
            Action::SetRegions(vec![Region {
                id: 1,
                name: "서울".to_string()
            }])
        );
    }

    #[test]
    fn test_unrecognized_type_becomes_unknown() {
        let action: Action = serde_json::from_value(json!({ "type": "UNKNOWN" })).unwrap();
        assert_eq!(action, Action::Unknown);
    }

    #[test]
    fn test_unrecognized_type_ignores_any_payload() {
        for payload in [json!(42), json!({ "x": 1 }), json!([1, 2]), json!(null)] {
            let action: Action =
                serde_json::from_value(json!({ "type": "somethingElse", "payload": payload }))
                    .unwrap();
            assert_eq!(action, Action::Unknown);
        }
    }

    #[test]
    fn test_known_type_with_bad_payload_is_an_error() {
        let result: Result<Action, _> =
            serde_json::from_value(json!({ "type": "selectRegion", "payload": "one" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_kind_matches_serialized_tag() {
        let actions = [
            Action::SetRegions(Vec::new()),
            Action::SelectCategory(2),
            Action::review_field("score", "5"),
            Action::access_token("T"),
            Action::ClearSession,
        ];

        for action in actions {
            let value = serde_json::to_value(&action).unwrap();
            assert_eq!(value["type"], action.kind());
        }
    }
}

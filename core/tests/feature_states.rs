mod common;

use assert_json_diff::assert_json_eq;
use common::*;
use flagsmith_core::{
    ApiError, FeatureState, FeatureStateValue, HttpMethod, Resource, SegmentOverride, SegmentPlacement,
};
use serde_json::json;

fn env_feature_states_path() -> String {
    format!("/environments/{ENVIRONMENT_API_KEY}/featurestates/?feature={FEATURE_ID}")
}

#[test]
fn environment_feature_state_decodes_raw_value() {
    let transport = ScriptedTransport::new().ok(HttpMethod::Get, &env_feature_states_path(), ENVIRONMENT_FEATURE_STATES_JSON);
    let client = client(transport);

    let state = client
        .get_environment_feature_state(ENVIRONMENT_API_KEY, FEATURE_ID)
        .unwrap();
    assert_eq!(state.id, Some(1));
    assert_eq!(state.feature, FEATURE_ID);
    assert_eq!(state.environment, Some(ENVIRONMENT_ID));
    assert!(!state.enabled);
    assert_eq!(state.feature_state_value, FeatureStateValue::Unicode("some_value".to_string()));

    // Re-encoding produces the structured shape.
    assert_json_eq!(
        serde_json::to_value(&state.feature_state_value).unwrap(),
        json!({"type": "unicode", "string_value": "some_value", "integer_value": null, "boolean_value": null})
    );
}

#[test]
fn environment_feature_state_requires_exactly_one_result() {
    let empty = r#"{"count": 0, "next": null, "previous": null, "results": []}"#;
    let transport = ScriptedTransport::new().ok(HttpMethod::Get, &env_feature_states_path(), empty);
    let client = client(transport);

    let err = client
        .get_environment_feature_state(ENVIRONMENT_API_KEY, FEATURE_ID)
        .unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedResultCount { expected: 1, found: 0 }));
}

#[test]
fn get_feature_state_decodes_structured_value() {
    let transport = ScriptedTransport::new().ok(
        HttpMethod::Get,
        &format!("/features/featurestates/get-by-uuid/{FEATURE_STATE_UUID}/"),
        FEATURE_STATE_JSON,
    );
    let client = client(transport);

    let state = client.get_feature_state(uuid(FEATURE_STATE_UUID)).unwrap();
    assert_eq!(state.uuid, Some(uuid(FEATURE_STATE_UUID)));
    assert_eq!(state.feature_state_value.as_str(), Some("some_value"));
    assert!(!state.is_segment_override());
}

#[test]
fn get_feature_state_404_is_not_found() {
    let transport = ScriptedTransport::new().route(
        HttpMethod::Get,
        &format!("/features/featurestates/get-by-uuid/{FEATURE_STATE_UUID}/"),
        404,
        "",
    );
    let client = client(transport);
    let err = client.get_feature_state(uuid(FEATURE_STATE_UUID)).unwrap_err();
    assert!(matches!(
        err,
        ApiError::NotFound { resource: Resource::FeatureState, ref identifier } if identifier == FEATURE_STATE_UUID
    ));
}

#[test]
fn plain_404_on_update_stays_http_error() {
    let transport = ScriptedTransport::new().route(HttpMethod::Put, "/features/featurestates/1/", 404, "gone");
    let client = client(transport);
    let state = FeatureState {
        id: Some(1),
        feature: FEATURE_ID,
        ..FeatureState::default()
    };
    let err = client.update_feature_state(&state).unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 404, .. }));
}

#[test]
fn update_feature_state_sends_structured_value() {
    let response = FEATURE_STATE_JSON.replace("\"some_value\"", "\"updated_value\"").replace("\"enabled\": false", "\"enabled\": true");
    let transport = ScriptedTransport::new().ok(HttpMethod::Put, "/features/featurestates/1/", &response);
    let client = client(transport);

    let state = FeatureState {
        id: Some(1),
        feature: FEATURE_ID,
        environment: Some(ENVIRONMENT_ID),
        enabled: true,
        feature_state_value: "updated_value".into(),
        ..FeatureState::default()
    };
    let updated = client.update_feature_state(&state).unwrap();

    assert!(updated.enabled);
    assert_eq!(updated.feature_state_value.as_str(), Some("updated_value"));
    assert_json_eq!(
        client.transport().body_of(0),
        json!({
            "id": 1,
            "feature_state_value": {
                "type": "unicode",
                "string_value": "updated_value",
                "integer_value": null,
                "boolean_value": null
            },
            "enabled": true,
            "feature": 1,
            "environment": 100
        })
    );
}

#[test]
fn update_without_id_fails_before_any_call() {
    let client = client(ScriptedTransport::new());
    let err = client
        .update_feature_state(&FeatureState::default())
        .unwrap_err();
    assert!(matches!(err, ApiError::MissingReference(_)));
    assert!(client.transport().requests().is_empty());
}

#[test]
fn list_feature_states_reads_first_page() {
    let page = FEATURE_STATE_JSON.to_string();
    let body = format!(r#"{{"count": 2, "next": "{BASE_URL}/features/featurestates/?page=2", "previous": null, "results": [{page}]}}"#);
    let transport = ScriptedTransport::new().ok(
        HttpMethod::Get,
        &format!("/features/featurestates/?environment={ENVIRONMENT_ID}"),
        &body,
    );
    let client = client(transport);
    let states = client.list_feature_states(ENVIRONMENT_ID).unwrap();
    assert_eq!(states.len(), 1);
    assert_eq!(client.transport().requests().len(), 1);
}

#[test]
fn delete_feature_state_issues_one_delete() {
    let transport = ScriptedTransport::new().route(HttpMethod::Delete, "/features/featurestates/1/", 204, "");
    let client = client(transport);
    client.delete_feature_state(1).unwrap();
    assert_eq!(
        client.transport().calls(),
        vec![(HttpMethod::Delete, "/features/featurestates/1/".to_string())]
    );
}

// --- feature segments ---

#[test]
fn feature_segment_without_feature_field_parses() {
    let body = r#"{
        "id": 400,
        "uuid": "7b7bbb74-00bc-4d14-aabe-3d44debe4662",
        "segment": 300,
        "priority": 0,
        "environment": 100,
        "segment_name": "is_not_set",
        "is_feature_specific": false
    }"#;
    let transport = ScriptedTransport::new().ok(HttpMethod::Get, "/features/feature-segments/400/", body);
    let client = client(transport);
    let fs = client.get_feature_segment_by_id(FEATURE_SEGMENT_ID).unwrap();
    assert_eq!(fs.feature, None);
    assert_eq!(fs.segment, SEGMENT_ID);
    assert_eq!(fs.priority, Some(0));
}

#[test]
fn priority_update_posts_single_entry_array() {
    let transport = ScriptedTransport::new().ok(HttpMethod::Post, "/features/feature-segments/update-priorities/", "[]");
    let client = client(transport);
    client.update_feature_segment_priority(FEATURE_SEGMENT_ID, 5).unwrap();
    assert_json_eq!(client.transport().body_of(0), json!([{"id": 400, "priority": 5}]));
}

// --- segment overrides ---

fn override_state() -> FeatureState {
    FeatureState {
        feature: FEATURE_ID,
        enabled: true,
        feature_state_value: "some_value".into(),
        ..FeatureState::default()
    }
}

fn placement(priority: i64) -> SegmentPlacement {
    SegmentPlacement {
        segment: SEGMENT_ID,
        priority,
    }
}

#[test]
fn create_segment_override_runs_three_calls_in_order() {
    let transport = ScriptedTransport::new()
        .ok(HttpMethod::Get, &format!("/environments/{ENVIRONMENT_API_KEY}/"), ENVIRONMENT_JSON)
        .route(HttpMethod::Post, "/features/feature-segments/", 201, FEATURE_SEGMENT_JSON)
        .route(HttpMethod::Post, "/features/featurestates/", 201, SEGMENT_OVERRIDE_STATE_JSON);
    let client = client(transport);

    let created = client
        .create_segment_override(ENVIRONMENT_API_KEY, &override_state(), placement(0))
        .unwrap();

    assert_eq!(
        client.transport().calls(),
        vec![
            (HttpMethod::Get, format!("/environments/{ENVIRONMENT_API_KEY}/")),
            (HttpMethod::Post, "/features/feature-segments/".to_string()),
            (HttpMethod::Post, "/features/featurestates/".to_string()),
        ]
    );
    assert_json_eq!(
        client.transport().body_of(1),
        json!({"feature": 1, "segment": 300, "environment": 100, "priority": 0})
    );
    let state_body = client.transport().body_of(2);
    assert_eq!(state_body["environment"], 100);
    assert_eq!(state_body["feature_segment"], 400);
    assert_eq!(state_body["feature_state_value"]["string_value"], "some_value");

    assert_eq!(created.state.feature_segment, Some(FEATURE_SEGMENT_ID));
    assert_eq!(created.placement, placement(0));
}

#[test]
fn create_segment_override_stops_at_first_failure() {
    let transport = ScriptedTransport::new()
        .ok(HttpMethod::Get, &format!("/environments/{ENVIRONMENT_API_KEY}/"), ENVIRONMENT_JSON)
        .route(HttpMethod::Post, "/features/feature-segments/", 400, r#"{"segment":["invalid"]}"#);
    let client = client(transport);

    let err = client
        .create_segment_override(ENVIRONMENT_API_KEY, &override_state(), placement(0))
        .unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 400, .. }));
    assert_eq!(client.transport().requests().len(), 2);
}

#[test]
fn failed_state_create_leaves_feature_segment_in_place() {
    let transport = ScriptedTransport::new()
        .ok(HttpMethod::Get, &format!("/environments/{ENVIRONMENT_API_KEY}/"), ENVIRONMENT_JSON)
        .route(HttpMethod::Post, "/features/feature-segments/", 201, FEATURE_SEGMENT_JSON)
        .route(HttpMethod::Post, "/features/featurestates/", 500, "internal error");
    let client = client(transport);

    let err = client
        .create_segment_override(ENVIRONMENT_API_KEY, &override_state(), placement(0))
        .unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 500, .. }));

    // No DELETE of the feature segment follows the failure.
    assert_eq!(
        client.transport().calls(),
        vec![
            (HttpMethod::Get, format!("/environments/{ENVIRONMENT_API_KEY}/")),
            (HttpMethod::Post, "/features/feature-segments/".to_string()),
            (HttpMethod::Post, "/features/featurestates/".to_string()),
        ]
    );
}

#[test]
fn update_segment_override_with_priority_makes_one_extra_call() {
    let transport = ScriptedTransport::new()
        .ok(HttpMethod::Put, "/features/featurestates/1/", SEGMENT_OVERRIDE_STATE_JSON)
        .ok(HttpMethod::Post, "/features/feature-segments/update-priorities/", "[]");
    let client = client(transport);

    let existing = SegmentOverride::merge(
        FeatureState {
            id: Some(1),
            environment: Some(ENVIRONMENT_ID),
            feature_segment: Some(FEATURE_SEGMENT_ID),
            ..override_state()
        },
        placement(2),
    );
    let updated = client.update_segment_override(&existing, true).unwrap();

    assert_eq!(
        client.transport().calls(),
        vec![
            (HttpMethod::Put, "/features/featurestates/1/".to_string()),
            (HttpMethod::Post, "/features/feature-segments/update-priorities/".to_string()),
        ]
    );
    assert_json_eq!(client.transport().body_of(1), json!([{"id": 400, "priority": 2}]));
    assert_eq!(updated.placement, placement(2));
    assert_eq!(updated.feature_segment(), Some(FEATURE_SEGMENT_ID));
}

#[test]
fn update_segment_override_without_priority_is_one_call() {
    let transport = ScriptedTransport::new().ok(HttpMethod::Put, "/features/featurestates/1/", SEGMENT_OVERRIDE_STATE_JSON);
    let client = client(transport);

    let existing = SegmentOverride::merge(
        FeatureState {
            id: Some(1),
            feature_segment: Some(FEATURE_SEGMENT_ID),
            ..override_state()
        },
        placement(7),
    );
    let updated = client.update_segment_override(&existing, false).unwrap();
    assert_eq!(client.transport().requests().len(), 1);
    assert_eq!(updated.placement.priority, 7);
}

//! Shared fixtures for the request-shape tests.
//!
//! `ScriptedTransport` answers from a fixed route table and records every
//! request it sees, so tests can assert both the parsed result and the exact
//! sequence of calls an operation made.

#![allow(dead_code)]

use std::sync::Mutex;

use flagsmith_core::{ApiError, ClientConfig, FlagsmithClient, HttpMethod, HttpRequest, HttpResponse, Transport};
use serde_json::Value;

pub const BASE_URL: &str = "http://flagsmith.test/api/v1";
pub const MASTER_API_KEY: &str = "master_api_key";

pub const PROJECT_ID: i64 = 10;
pub const PROJECT_UUID: &str = "cba035f8-d801-416f-a985-ce6e05acbe13";
pub const FEATURE_ID: i64 = 1;
pub const FEATURE_UUID: &str = "10421b1f-5f29-4da9-abe2-30f88c07c9e8";
pub const FEATURE_STATE_UUID: &str = "1a1f9371-6181-4035-93f5-09bd291b7d5e";
pub const MV_OPTION_ID: i64 = 200;
pub const MV_OPTION_UUID: &str = "8d3512d3-721a-4cae-9855-56c02cb0afe9";
pub const SEGMENT_ID: i64 = 300;
pub const SEGMENT_UUID: &str = "f6c714d3-94e7-4b14-9117-8dd9db91bc19";
pub const ENVIRONMENT_ID: i64 = 100;
pub const ENVIRONMENT_API_KEY: &str = "environment_api_key";
pub const FEATURE_SEGMENT_ID: i64 = 400;

pub const PROJECT_JSON: &str = r#"{
    "id": 10,
    "uuid": "cba035f8-d801-416f-a985-ce6e05acbe13",
    "name": "project-1",
    "organisation": 1,
    "hide_disabled_flags": false,
    "enable_dynamo_db": true,
    "migration_status": "NOT_APPLICABLE",
    "use_edge_identities": false
}"#;

pub const FEATURE_JSON: &str = r#"{
    "id": 1,
    "uuid": "10421b1f-5f29-4da9-abe2-30f88c07c9e8",
    "name": "test_feature",
    "project": 10,
    "type": "STANDARD",
    "default_enabled": false,
    "initial_value": null,
    "created_date": "2022-08-24T03:34:55.862503Z",
    "description": null,
    "tags": [],
    "multivariate_options": [],
    "is_archived": false,
    "owners": [
        {"id": 1, "email": "some_user@email.com"},
        {"id": 2, "email": "some_other_user@email.com"}
    ]
}"#;

pub const MV_OPTION_JSON: &str = r#"{
    "id": 200,
    "uuid": "8d3512d3-721a-4cae-9855-56c02cb0afe9",
    "type": "unicode",
    "string_value": "option_value_30",
    "boolean_value": null,
    "default_percentage_allocation": 60.0,
    "feature": 1
}"#;

pub const ENVIRONMENT_FEATURE_STATES_JSON: &str = r#"{
    "count": 1,
    "next": null,
    "previous": null,
    "results": [
        {
            "id": 1,
            "uuid": "1a1f9371-6181-4035-93f5-09bd291b7d5e",
            "feature_state_value": "some_value",
            "multivariate_feature_state_values": [],
            "identity": null,
            "enabled": false,
            "feature": 1,
            "environment": 100,
            "feature_segment": null,
            "change_request": null
        }
    ]
}"#;

pub const FEATURE_STATE_JSON: &str = r#"{
    "id": 1,
    "uuid": "1a1f9371-6181-4035-93f5-09bd291b7d5e",
    "feature_state_value": {
        "type": "unicode",
        "string_value": "some_value",
        "integer_value": null,
        "boolean_value": null
    },
    "multivariate_feature_state_values": [],
    "enabled": false,
    "feature": 1,
    "environment": 100,
    "identity": null,
    "feature_segment": null,
    "change_request": null
}"#;

pub const SEGMENT_OVERRIDE_STATE_JSON: &str = r#"{
    "id": 1,
    "feature_state_value": {
        "type": "unicode",
        "string_value": "some_value",
        "integer_value": null,
        "boolean_value": null
    },
    "enabled": true,
    "feature": 1,
    "feature_segment": 400,
    "environment": 100,
    "identity": null
}"#;

pub const SEGMENT_JSON: &str = r#"{
    "id": 300,
    "rules": [
        {
            "type": "ALL",
            "rules": [
                {
                    "type": "ANY",
                    "rules": [],
                    "conditions": [{"operator": "EQUAL", "property": "1", "value": "1"}]
                }
            ],
            "conditions": []
        }
    ],
    "uuid": "f6c714d3-94e7-4b14-9117-8dd9db91bc19",
    "name": "one_matches_one",
    "description": null,
    "project": 10,
    "feature": null
}"#;

pub const ENVIRONMENT_JSON: &str = r#"{
    "id": 100,
    "name": "Development",
    "api_key": "environment_api_key",
    "description": null,
    "project": 10,
    "minimum_change_request_approvals": 0,
    "allow_client_traits": true
}"#;

pub const FEATURE_SEGMENT_JSON: &str = r#"{
    "id": 400,
    "uuid": "7b7bbb74-00bc-4d14-aabe-3d44debe4662",
    "feature": 1,
    "segment": 300,
    "priority": 0,
    "environment": 100
}"#;

struct Route {
    method: HttpMethod,
    url: String,
    status: u16,
    body: String,
}

/// In-process `Transport` that replays canned responses.
///
/// Requests with no matching route get a 599 so a missing fixture surfaces
/// as an `HttpError` rather than a silent success.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Vec<Route>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `status` and `body`. `path` is relative to
    /// `BASE_URL` and may carry a query string.
    pub fn route(mut self, method: HttpMethod, path: &str, status: u16, body: &str) -> Self {
        self.routes.push(Route {
            method,
            url: format!("{BASE_URL}{path}"),
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn ok(self, method: HttpMethod, path: &str, body: &str) -> Self {
        self.route(method, path, 200, body)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `(method, path)` of every request, in order.
    pub fn calls(&self) -> Vec<(HttpMethod, String)> {
        self.requests()
            .into_iter()
            .map(|r| (r.method, r.url.trim_start_matches(BASE_URL).to_string()))
            .collect()
    }

    pub fn body_of(&self, index: usize) -> Value {
        let requests = self.requests();
        let body = requests[index].body.as_deref().expect("request has no body");
        serde_json::from_str(body).unwrap()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let response = self
            .routes
            .iter()
            .find(|r| r.method == request.method && r.url == request.url)
            .map(|r| HttpResponse {
                status: r.status,
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                body: r.body.clone(),
            })
            .unwrap_or_else(|| HttpResponse {
                status: 599,
                headers: Vec::new(),
                body: format!("no route for {} {}", request.method, request.url),
            });
        self.requests.lock().unwrap().push(request);
        Ok(response)
    }
}

pub fn client(transport: ScriptedTransport) -> FlagsmithClient<ScriptedTransport> {
    FlagsmithClient::with_transport(ClientConfig::new(MASTER_API_KEY, BASE_URL), transport)
}

pub fn uuid(s: &str) -> uuid::Uuid {
    s.parse().unwrap()
}

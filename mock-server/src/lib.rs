//! In-memory stand-in for the subset of the Flagsmith admin API exercised by
//! the client's end-to-end tests.
//!
//! All routes live under `/api/v1` and require an `Authorization: Api-Key ...`
//! header. Creating a feature or an environment materialises the
//! environment-default feature states the real service would create.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub organisation: i64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Feature {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub feature_type: String,
    pub description: Option<String>,
    pub initial_value: Option<String>,
    pub default_enabled: bool,
    pub is_archived: bool,
    pub owners: Vec<Value>,
    pub tags: Vec<i64>,
    pub multivariate_options: Vec<Value>,
    pub project: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Environment {
    pub id: i64,
    pub name: String,
    pub api_key: String,
    pub description: Option<String>,
    pub project: i64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Segment {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub project: i64,
    pub feature: Option<i64>,
    pub rules: Value,
}

#[derive(Clone, Debug, Serialize)]
pub struct FeatureSegment {
    pub id: i64,
    pub uuid: Uuid,
    pub feature: i64,
    pub segment: i64,
    pub environment: i64,
    pub priority: i64,
}

/// Value stored with a feature state, in the typed shape the
/// `/features/featurestates/` endpoints speak.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredValue {
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default)]
    pub string_value: Option<String>,
    #[serde(default)]
    pub integer_value: Option<i64>,
    #[serde(default)]
    pub boolean_value: Option<bool>,
}

impl StoredValue {
    /// The raw scalar the environment endpoints report.
    pub fn as_scalar(&self) -> Value {
        match self.value_type.as_str() {
            "int" => json!(self.integer_value),
            "bool" => json!(self.boolean_value),
            _ => json!(self.string_value),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FeatureState {
    pub id: i64,
    pub uuid: Uuid,
    pub enabled: bool,
    pub feature: i64,
    pub environment: i64,
    pub feature_segment: Option<i64>,
    pub value: Option<StoredValue>,
}

impl FeatureState {
    fn structured(&self) -> Value {
        json!({
            "id": self.id,
            "uuid": self.uuid,
            "enabled": self.enabled,
            "feature": self.feature,
            "environment": self.environment,
            "feature_segment": self.feature_segment,
            "feature_state_value": self.value,
        })
    }

    fn raw(&self) -> Value {
        let mut body = self.structured();
        body["feature_state_value"] = self.value.as_ref().map(StoredValue::as_scalar).unwrap_or(Value::Null);
        body
    }
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    projects: BTreeMap<i64, Project>,
    features: BTreeMap<i64, Feature>,
    environments: BTreeMap<String, Environment>,
    segments: BTreeMap<i64, Segment>,
    feature_segments: BTreeMap<i64, FeatureSegment>,
    feature_states: BTreeMap<i64, FeatureState>,
}

impl Store {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn add_default_state(&mut self, feature: &Feature, environment: i64) {
        let id = self.allocate_id();
        let value = feature.initial_value.clone().map(|s| StoredValue {
            value_type: "unicode".to_string(),
            string_value: Some(s),
            ..StoredValue::default()
        });
        self.feature_states.insert(
            id,
            FeatureState {
                id,
                uuid: Uuid::new_v4(),
                enabled: feature.default_enabled,
                feature: feature.id,
                environment,
                feature_segment: None,
                value,
            },
        );
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Deserialize)]
pub struct CreateProject {
    pub name: String,
    #[serde(default)]
    pub organisation: i64,
}

#[derive(Deserialize)]
pub struct FeatureInput {
    pub name: String,
    #[serde(rename = "type", default)]
    pub feature_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub initial_value: Option<String>,
    #[serde(default)]
    pub default_enabled: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub tags: Vec<i64>,
}

#[derive(Deserialize)]
pub struct CreateEnvironment {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub project: i64,
}

#[derive(Deserialize)]
pub struct FeatureStateInput {
    #[serde(default)]
    pub enabled: bool,
    pub feature: i64,
    #[serde(default)]
    pub environment: Option<i64>,
    #[serde(default)]
    pub feature_segment: Option<i64>,
    #[serde(default)]
    pub feature_state_value: Option<StoredValue>,
}

#[derive(Deserialize)]
pub struct SegmentInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub feature: Option<i64>,
    #[serde(default)]
    pub rules: Value,
}

#[derive(Deserialize)]
pub struct FeatureSegmentInput {
    pub feature: i64,
    pub segment: i64,
    pub environment: i64,
    #[serde(default)]
    pub priority: Option<i64>,
}

#[derive(Deserialize)]
pub struct PriorityInput {
    pub id: i64,
    pub priority: i64,
}

#[derive(Deserialize)]
pub struct FeatureFilter {
    pub feature: Option<i64>,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let api = Router::new()
        .route("/projects/", post(create_project))
        .route("/projects/{project}/", get(get_project))
        .route("/projects/get-by-uuid/{uuid}/", get(get_project_by_uuid))
        .route("/projects/{project}/features/", post(create_feature))
        .route("/projects/{project}/features/{id}/", put(update_feature).delete(delete_feature))
        .route("/features/get-by-uuid/{uuid}/", get(get_feature_by_uuid))
        .route("/environments/", post(create_environment))
        .route("/environments/{key}/", get(get_environment).delete(delete_environment))
        .route("/environments/{key}/featurestates/", get(list_environment_feature_states))
        .route("/features/featurestates/", post(create_feature_state))
        .route("/features/featurestates/{id}/", put(update_feature_state))
        .route("/features/featurestates/get-by-uuid/{uuid}/", get(get_feature_state_by_uuid))
        .route("/projects/{project}/segments/", post(create_segment))
        .route("/segments/get-by-uuid/{uuid}/", get(get_segment_by_uuid))
        .route("/features/feature-segments/", post(create_feature_segment))
        .route("/features/feature-segments/{id}/", get(get_feature_segment))
        .route("/features/feature-segments/update-priorities/", post(update_priorities))
        .route_layer(middleware::from_fn(require_api_key))
        .with_state(db);
    Router::new().nest("/api/v1", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_api_key(request: Request, next: Next) -> Result<Response, StatusCode> {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("Api-Key "));
    if !authorized {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(request).await)
}

async fn create_project(State(db): State<Db>, Json(input): Json<CreateProject>) -> (StatusCode, Json<Project>) {
    let mut store = db.write().await;
    let project = Project {
        id: store.allocate_id(),
        uuid: Uuid::new_v4(),
        name: input.name,
        organisation: input.organisation,
    };
    store.projects.insert(project.id, project.clone());
    (StatusCode::CREATED, Json(project))
}

async fn get_project(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Project>, StatusCode> {
    let store = db.read().await;
    store.projects.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn get_project_by_uuid(State(db): State<Db>, Path(uuid): Path<Uuid>) -> Result<Json<Project>, StatusCode> {
    let store = db.read().await;
    let project = store.projects.values().find(|p| p.uuid == uuid);
    project.cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_feature(
    State(db): State<Db>,
    Path(project): Path<i64>,
    Json(input): Json<FeatureInput>,
) -> Result<(StatusCode, Json<Feature>), StatusCode> {
    let mut store = db.write().await;
    if !store.projects.contains_key(&project) {
        return Err(StatusCode::NOT_FOUND);
    }
    let feature = Feature {
        id: store.allocate_id(),
        uuid: Uuid::new_v4(),
        name: input.name,
        feature_type: input.feature_type.unwrap_or_else(|| "STANDARD".to_string()),
        description: input.description,
        initial_value: input.initial_value,
        default_enabled: input.default_enabled,
        is_archived: input.is_archived,
        owners: Vec::new(),
        tags: input.tags,
        multivariate_options: Vec::new(),
        project,
    };
    let environments: Vec<i64> = store
        .environments
        .values()
        .filter(|e| e.project == project)
        .map(|e| e.id)
        .collect();
    for environment in environments {
        store.add_default_state(&feature, environment);
    }
    store.features.insert(feature.id, feature.clone());
    Ok((StatusCode::CREATED, Json(feature)))
}

async fn update_feature(
    State(db): State<Db>,
    Path((project, id)): Path<(i64, i64)>,
    Json(input): Json<FeatureInput>,
) -> Result<Json<Feature>, StatusCode> {
    let mut store = db.write().await;
    let feature = store
        .features
        .get_mut(&id)
        .filter(|f| f.project == project)
        .ok_or(StatusCode::NOT_FOUND)?;
    feature.name = input.name;
    feature.description = input.description;
    feature.initial_value = input.initial_value;
    feature.default_enabled = input.default_enabled;
    feature.is_archived = input.is_archived;
    feature.tags = input.tags;
    Ok(Json(feature.clone()))
}

async fn delete_feature(State(db): State<Db>, Path((project, id)): Path<(i64, i64)>) -> StatusCode {
    let mut store = db.write().await;
    if store.features.get(&id).is_none_or(|f| f.project != project) {
        return StatusCode::NOT_FOUND;
    }
    store.features.remove(&id);
    store.feature_states.retain(|_, s| s.feature != id);
    StatusCode::NO_CONTENT
}

async fn get_feature_by_uuid(State(db): State<Db>, Path(uuid): Path<Uuid>) -> Result<Json<Feature>, StatusCode> {
    let store = db.read().await;
    let feature = store.features.values().find(|f| f.uuid == uuid);
    feature.cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_environment(
    State(db): State<Db>,
    Json(input): Json<CreateEnvironment>,
) -> Result<(StatusCode, Json<Environment>), StatusCode> {
    let mut store = db.write().await;
    if !store.projects.contains_key(&input.project) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let id = store.allocate_id();
    let environment = Environment {
        id,
        name: input.name,
        api_key: format!("env_{}", Uuid::new_v4().simple()),
        description: input.description,
        project: input.project,
    };
    let features: Vec<Feature> = store
        .features
        .values()
        .filter(|f| f.project == input.project)
        .cloned()
        .collect();
    for feature in &features {
        store.add_default_state(feature, id);
    }
    store.environments.insert(environment.api_key.clone(), environment.clone());
    Ok((StatusCode::CREATED, Json(environment)))
}

async fn get_environment(State(db): State<Db>, Path(key): Path<String>) -> Result<Json<Environment>, StatusCode> {
    let store = db.read().await;
    store.environments.get(&key).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_environment(State(db): State<Db>, Path(key): Path<String>) -> StatusCode {
    let mut store = db.write().await;
    match store.environments.remove(&key) {
        Some(environment) => {
            store.feature_states.retain(|_, s| s.environment != environment.id);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

/// Environment-default states, reported with raw scalar values.
async fn list_environment_feature_states(
    State(db): State<Db>,
    Path(key): Path<String>,
    Query(filter): Query<FeatureFilter>,
) -> Result<Json<Value>, StatusCode> {
    let store = db.read().await;
    let environment = store.environments.get(&key).ok_or(StatusCode::NOT_FOUND)?;
    let results: Vec<Value> = store
        .feature_states
        .values()
        .filter(|s| s.environment == environment.id && s.feature_segment.is_none())
        .filter(|s| filter.feature.is_none_or(|f| s.feature == f))
        .map(FeatureState::raw)
        .collect();
    Ok(Json(json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results,
    })))
}

async fn create_feature_state(
    State(db): State<Db>,
    Json(input): Json<FeatureStateInput>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let mut store = db.write().await;
    let environment = input.environment.ok_or(StatusCode::BAD_REQUEST)?;
    if !store.features.contains_key(&input.feature) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let state = FeatureState {
        id: store.allocate_id(),
        uuid: Uuid::new_v4(),
        enabled: input.enabled,
        feature: input.feature,
        environment,
        feature_segment: input.feature_segment,
        value: input.feature_state_value,
    };
    store.feature_states.insert(state.id, state.clone());
    Ok((StatusCode::CREATED, Json(state.structured())))
}

async fn update_feature_state(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<FeatureStateInput>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = db.write().await;
    let state = store.feature_states.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    state.enabled = input.enabled;
    state.value = input.feature_state_value;
    Ok(Json(state.structured()))
}

async fn get_feature_state_by_uuid(State(db): State<Db>, Path(uuid): Path<Uuid>) -> Result<Json<Value>, StatusCode> {
    let store = db.read().await;
    let state = store.feature_states.values().find(|s| s.uuid == uuid);
    state.map(|s| Json(s.structured())).ok_or(StatusCode::NOT_FOUND)
}

async fn create_segment(
    State(db): State<Db>,
    Path(project): Path<i64>,
    Json(input): Json<SegmentInput>,
) -> Result<(StatusCode, Json<Segment>), StatusCode> {
    let mut store = db.write().await;
    if !store.projects.contains_key(&project) {
        return Err(StatusCode::NOT_FOUND);
    }
    let segment = Segment {
        id: store.allocate_id(),
        uuid: Uuid::new_v4(),
        name: input.name,
        description: input.description,
        project,
        feature: input.feature,
        rules: input.rules,
    };
    store.segments.insert(segment.id, segment.clone());
    Ok((StatusCode::CREATED, Json(segment)))
}

async fn get_segment_by_uuid(State(db): State<Db>, Path(uuid): Path<Uuid>) -> Result<Json<Segment>, StatusCode> {
    let store = db.read().await;
    let segment = store.segments.values().find(|s| s.uuid == uuid);
    segment.cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_feature_segment(
    State(db): State<Db>,
    Json(input): Json<FeatureSegmentInput>,
) -> Result<(StatusCode, Json<FeatureSegment>), StatusCode> {
    let mut store = db.write().await;
    if !store.segments.contains_key(&input.segment) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let feature_segment = FeatureSegment {
        id: store.allocate_id(),
        uuid: Uuid::new_v4(),
        feature: input.feature,
        segment: input.segment,
        environment: input.environment,
        priority: input.priority.unwrap_or_default(),
    };
    store.feature_segments.insert(feature_segment.id, feature_segment.clone());
    Ok((StatusCode::CREATED, Json(feature_segment)))
}

/// The real endpoint omits `feature` from this response.
async fn get_feature_segment(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Value>, StatusCode> {
    let store = db.read().await;
    let fs = store.feature_segments.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(json!({
        "id": fs.id,
        "uuid": fs.uuid,
        "segment": fs.segment,
        "environment": fs.environment,
        "priority": fs.priority,
    })))
}

async fn update_priorities(
    State(db): State<Db>,
    Json(input): Json<Vec<PriorityInput>>,
) -> Result<Json<Vec<FeatureSegment>>, StatusCode> {
    let mut store = db.write().await;
    let mut updated = Vec::with_capacity(input.len());
    for change in input {
        let fs = store
            .feature_segments
            .get_mut(&change.id)
            .ok_or(StatusCode::BAD_REQUEST)?;
        fs.priority = change.priority;
        updated.push(fs.clone());
    }
    Ok(Json(updated))
}

//! Domain DTOs for the Flagsmith admin API.
//!
//! # Design
//! Optional fields are omitted from outgoing JSON so that create and update
//! payloads only carry what the caller set. Fields marked `#[serde(skip)]`
//! never travel over the wire: they hold the UUID-side of a reference so the
//! client can resolve the numeric id it needs for path construction, and are
//! re-attached to the server's response after each call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::value::{self, FeatureStateValue, TraitValue};

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    pub name: String,
    pub organisation: i64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hide_disabled_flags: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub prevent_flag_defaults: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub only_allow_lower_case_feature_names: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_name_regex: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organisation {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    Standard,
    Multivariate,
}

/// A feature flag definition, owned by a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub feature_type: Option<FeatureType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub default_enabled: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_archived: bool,
    /// User ids. Managed through `add_feature_owners` / `remove_feature_owners`.
    #[serde(default, skip_serializing, deserialize_with = "owner_ids")]
    pub owners: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub multivariate_options: Vec<FeatureMultivariateOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<i64>,

    #[serde(skip)]
    pub project_uuid: Option<Uuid>,
}

/// Owners arrive as user objects (`{"id": 1, "email": ...}`); only the ids
/// are kept.
fn owner_ids<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Owner {
        Id(i64),
        User { id: i64 },
    }

    let owners: Option<Vec<Owner>> = Option::deserialize(deserializer)?;
    Ok(owners
        .unwrap_or_default()
        .into_iter()
        .map(|owner| match owner {
            Owner::Id(id) | Owner::User { id } => id,
        })
        .collect())
}

/// One weighted alternative value of a multivariate feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureMultivariateOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integer_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<bool>,
    pub default_percentage_allocation: f64,

    #[serde(skip)]
    pub feature_uuid: Option<Uuid>,
    #[serde(skip)]
    pub project: Option<i64>,
}

impl FeatureMultivariateOption {
    pub fn with_value(value: FeatureStateValue, default_percentage_allocation: f64) -> Self {
        let mut option = Self {
            default_percentage_allocation,
            ..Self::default()
        };
        option.set_value(value);
        option
    }

    pub fn value(&self) -> FeatureStateValue {
        match self.value_type.as_str() {
            value::TYPE_UNICODE => self
                .string_value
                .clone()
                .map_or(FeatureStateValue::Absent, FeatureStateValue::Unicode),
            value::TYPE_INT => self
                .integer_value
                .map_or(FeatureStateValue::Absent, FeatureStateValue::Int),
            value::TYPE_BOOL => self
                .boolean_value
                .map_or(FeatureStateValue::Absent, FeatureStateValue::Bool),
            _ => FeatureStateValue::Absent,
        }
    }

    /// Replace the option's value, keeping the type tag and the three value
    /// fields consistent.
    pub fn set_value(&mut self, value: FeatureStateValue) {
        self.value_type = value.type_tag().unwrap_or(value::TYPE_UNICODE).to_string();
        self.string_value = value.as_str().map(str::to_string);
        self.integer_value = value.as_int();
        self.boolean_value = value.as_bool();
    }
}

/// The enabled/value pair of a feature in an environment, or of a segment
/// override when `feature_segment` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    #[serde(default)]
    pub feature_state_value: FeatureStateValue,
    #[serde(default)]
    pub enabled: bool,
    pub feature: i64,
    #[serde(default)]
    pub environment: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_segment: Option<i64>,
}

impl FeatureState {
    pub fn is_segment_override(&self) -> bool {
        self.feature_segment.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleType {
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "ANY")]
    Any,
    #[serde(rename = "NONE")]
    NoneOf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub operator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub project: Option<i64>,
    /// Set when the segment is scoped to a single feature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<i64>,
    #[serde(default)]
    pub rules: Vec<Rule>,

    #[serde(skip)]
    pub project_uuid: Option<Uuid>,
}

/// Links a feature, a segment and an environment with an evaluation priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSegment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<i64>,
    pub segment: i64,
    pub environment: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSegmentPriority {
    pub id: i64,
    pub priority: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub project: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trait {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub trait_key: String,
    #[serde(default, deserialize_with = "value::deserialize_trait_value")]
    pub trait_value: Option<TraitValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    #[serde(rename = "label")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "color")]
    pub colour: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<i64>,

    #[serde(skip)]
    pub project_uuid: Option<Uuid>,
}

/// A server-side SDK key scoped to an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSideEnvKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// One page of a paginated list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

//! Feature and trait value codec.
//!
//! The API reports a feature state's value in one of two shapes depending on
//! the endpoint:
//!
//! * structured: `{"type": "unicode", "string_value": "x", "integer_value": null, "boolean_value": null}`
//!   (the `/features/featurestates/` family)
//! * raw scalar: `"x"`, `42`, `true` or `null` (the `/environments/{key}/featurestates/` family)
//!
//! Decoding accepts both without knowing which endpoint produced the payload:
//! the structured shape is tried first, then the scalar is classified.
//! Numbers are truncated toward zero. An unrecognised shape is logged and
//! decoded as `Absent`; it never fails the enclosing response.
//!
//! Encoding always produces the structured shape, and `Absent` encodes as
//! `null`.

use log::warn;
use serde::de::Deserializer;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TYPE_UNICODE: &str = "unicode";
pub const TYPE_INT: &str = "int";
pub const TYPE_BOOL: &str = "bool";
pub const TYPE_FLOAT: &str = "float";

/// The value carried by a feature state or multivariate option.
///
/// A structured payload whose selected field is null decodes to `Absent`, so
/// its `type` tag is dropped and it re-encodes as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FeatureStateValue {
    Unicode(String),
    Int(i64),
    Bool(bool),
    #[default]
    Absent,
}

/// The structured wire shape, as emitted by the feature-instance endpoints.
#[derive(Deserialize)]
struct StructuredValue {
    #[serde(rename = "type")]
    value_type: String,
    #[serde(default)]
    string_value: Option<String>,
    #[serde(default)]
    integer_value: Option<i64>,
    #[serde(default)]
    boolean_value: Option<bool>,
}

impl FeatureStateValue {
    /// Decode a value from either wire shape.
    pub fn from_json(raw: Value) -> Self {
        if raw.is_object() {
            match serde_json::from_value::<StructuredValue>(raw.clone()) {
                Ok(structured) => return Self::from_structured(structured),
                Err(e) => warn!("flagsmithapi: value is not in the structured shape: {e}"),
            }
        }
        Self::from_scalar(raw)
    }

    fn from_structured(value: StructuredValue) -> Self {
        let StructuredValue {
            value_type,
            string_value,
            integer_value,
            boolean_value,
        } = value;
        match value_type.as_str() {
            TYPE_UNICODE => string_value.map_or(Self::Absent, Self::Unicode),
            TYPE_INT => integer_value.map_or(Self::Absent, Self::Int),
            TYPE_BOOL => boolean_value.map_or(Self::Absent, Self::Bool),
            other => {
                warn!("flagsmithapi: unknown feature state value type '{other}'");
                if let Some(s) = string_value {
                    Self::Unicode(s)
                } else if let Some(i) = integer_value {
                    Self::Int(i)
                } else {
                    boolean_value.map_or(Self::Absent, Self::Bool)
                }
            }
        }
    }

    fn from_scalar(raw: Value) -> Self {
        match raw {
            Value::String(s) => Self::Unicode(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                // `as` truncates toward zero and saturates at the i64 bounds.
                None => n.as_f64().map_or(Self::Absent, |f| Self::Int(f as i64)),
            },
            Value::Bool(b) => Self::Bool(b),
            Value::Null => Self::Absent,
            other => {
                warn!("flagsmithapi: unrecognised feature state value {other}");
                Self::Absent
            }
        }
    }

    /// The wire `type` tag, or `None` when no value is set.
    pub fn type_tag(&self) -> Option<&'static str> {
        match self {
            Self::Unicode(_) => Some(TYPE_UNICODE),
            Self::Int(_) => Some(TYPE_INT),
            Self::Bool(_) => Some(TYPE_BOOL),
            Self::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Unicode(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for FeatureStateValue {
    fn from(s: &str) -> Self {
        Self::Unicode(s.to_string())
    }
}

impl From<String> for FeatureStateValue {
    fn from(s: String) -> Self {
        Self::Unicode(s)
    }
}

impl From<i64> for FeatureStateValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for FeatureStateValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl Serialize for FeatureStateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(value_type) = self.type_tag() else {
            return serializer.serialize_none();
        };
        let mut state = serializer.serialize_struct("FeatureStateValue", 4)?;
        state.serialize_field("type", value_type)?;
        state.serialize_field("string_value", &self.as_str())?;
        state.serialize_field("integer_value", &self.as_int())?;
        state.serialize_field("boolean_value", &self.as_bool())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for FeatureStateValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::from_json(raw))
    }
}

/// An identity trait's value. Encoded on the wire as a bare scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum TraitValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

#[derive(Deserialize)]
struct StructuredTraitValue {
    #[serde(rename = "type")]
    value_type: String,
    #[serde(default)]
    string_value: Option<String>,
    #[serde(default)]
    integer_value: Option<i64>,
    #[serde(default)]
    boolean_value: Option<bool>,
    #[serde(default)]
    float_value: Option<f64>,
}

impl TraitValue {
    /// Decode a trait value from either wire shape. Unlike feature values,
    /// fractional numbers keep their precision.
    pub fn from_json(raw: Value) -> Option<Self> {
        if raw.is_object() {
            match serde_json::from_value::<StructuredTraitValue>(raw.clone()) {
                Ok(v) => {
                    return match v.value_type.as_str() {
                        TYPE_UNICODE => v.string_value.map(Self::String),
                        TYPE_INT => v.integer_value.map(Self::Integer),
                        TYPE_BOOL => v.boolean_value.map(Self::Boolean),
                        TYPE_FLOAT => v.float_value.map(Self::Float),
                        other => {
                            warn!("flagsmithapi: unknown trait value type '{other}'");
                            None
                        }
                    }
                }
                Err(e) => warn!("flagsmithapi: trait value is not in the structured shape: {e}"),
            }
        }
        match raw {
            Value::String(s) => Some(Self::String(s)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Self::Integer(i)),
                None => n.as_f64().map(Self::Float),
            },
            Value::Bool(b) => Some(Self::Boolean(b)),
            Value::Null => None,
            other => {
                warn!("flagsmithapi: unrecognised trait value {other}");
                None
            }
        }
    }
}

impl Serialize for TraitValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<&str> for TraitValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i64> for TraitValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for TraitValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for TraitValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

pub(crate) fn deserialize_trait_value<'de, D>(deserializer: D) -> Result<Option<TraitValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(TraitValue::from_json(raw))
}

//! Context value model.
//!
//! Every leaf a template can see is a [`Scalar`]; structure is expressed by
//! [`Value::Seq`] and [`Value::Map`]. Values serialize untagged, so a
//! [`Mapping`] hands the templating engine a plain nested map.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Nested string-keyed mapping. Ordered so context dumps are deterministic.
pub type Mapping = BTreeMap<String, Value>;

/// A concretely typed leaf value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => b.fmt(f),
            Scalar::Int(i) => i.fmt(f),
            // `{:?}` keeps the fractional part (`1.0`), so the text types back as a float.
            Scalar::Float(x) => write!(f, "{x:?}"),
            Scalar::String(s) => s.fmt(f),
        }
    }
}

/// Any value reachable from the global context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Scalar(Scalar),
    Seq(Vec<Value>),
    Map(Mapping),
}

impl Value {
    /// Shorthand for a string leaf.
    pub fn string(s: impl Into<String>) -> Self {
        Value::Scalar(Scalar::String(s.into()))
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Short shape name used in merge diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Scalar(_) => "scalar",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "mapping",
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Map(m)
    }
}

impl From<serde_yaml::Value> for Value {
    /// Integers land in `i64`, the single canonical width. Unsigned values
    /// beyond `i64::MAX` fall back to `f64`. YAML tags are dropped.
    fn from(v: serde_yaml::Value) -> Self {
        match v {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Scalar::Bool(b).into(),
            serde_yaml::Value::Number(n) => match n.as_i64() {
                Some(i) => Scalar::Int(i).into(),
                None => n.as_f64().map_or(Value::Null, |x| Scalar::Float(x).into()),
            },
            serde_yaml::Value::String(s) => Scalar::String(s).into(),
            serde_yaml::Value::Sequence(seq) => {
                Value::Seq(seq.into_iter().map(Value::from).collect())
            }
            serde_yaml::Value::Mapping(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (key_to_string(k), Value::from(v)))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

/// YAML allows non-string keys; the context does not.
fn key_to_string(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

//! Output value tree
//!
//! Input data arrives as `serde_json::Value`. Transformed output is a [`Mapped`]
//! tree: the same shapes as JSON plus [`Mapped::Instance`] for values a model
//! constructed.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::model::{Instance, Model};

/// Key under which an instance's model name is written when serializing
pub const DEFAULT_MODEL_TAG: &str = "$model";

/// Fields of a transformed object
pub type Fields = BTreeMap<String, Mapped>;

/// A transformed value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Mapped {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Mapped>),
    Object(Fields),
    Instance(Instance),
}

impl Mapped {
    pub fn is_null(&self) -> bool {
        matches!(self, Mapped::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Mapped::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Mapped::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Mapped::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Mapped]> {
        match self {
            Mapped::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Fields> {
        match self {
            Mapped::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Mapped::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// Whether this value was constructed by `model`
    pub fn is_instance_of(&self, model: &Model) -> bool {
        self.as_instance().is_some_and(|i| i.is_instance_of(model))
    }

    /// Look up a field on an object or on an instance that exposes fields
    pub fn get(&self, key: &str) -> Option<&Mapped> {
        match self {
            Mapped::Object(fields) => fields.get(key),
            Mapped::Instance(instance) => instance.field(key),
            _ => None,
        }
    }

    /// Look up an array element
    pub fn at(&self, index: usize) -> Option<&Mapped> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// Convert back to plain JSON, tagging instances with `model_tag`
    pub fn to_json(&self, model_tag: &str) -> Value {
        match self {
            Mapped::Null => Value::Null,
            Mapped::Bool(b) => Value::Bool(*b),
            Mapped::Number(n) => Value::Number(n.clone()),
            Mapped::String(s) => Value::String(s.clone()),
            Mapped::Array(items) => {
                Value::Array(items.iter().map(|item| item.to_json(model_tag)).collect())
            }
            Mapped::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json(model_tag)))
                    .collect(),
            ),
            Mapped::Instance(instance) => {
                let mut object = Map::new();
                object.insert(
                    model_tag.to_string(),
                    Value::String(instance.model().name().to_string()),
                );
                match instance.to_mapped().to_json(model_tag) {
                    Value::Object(fields) => object.extend(fields),
                    Value::Null => {}
                    other => {
                        object.insert("value".to_string(), other);
                    }
                }
                Value::Object(object)
            }
        }
    }
}

/// Loosely-typed truthiness: `null`, `false`, zero and `""` are falsy
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Copy the own fields of a JSON object
pub(crate) fn spread(object: &Map<String, Value>) -> Fields {
    object.iter().map(|(k, v)| (k.clone(), Mapped::from(v))).collect()
}

impl From<&Value> for Mapped {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Mapped::Null,
            Value::Bool(b) => Mapped::Bool(*b),
            Value::Number(n) => Mapped::Number(n.clone()),
            Value::String(s) => Mapped::String(s.clone()),
            Value::Array(items) => Mapped::Array(items.iter().map(Mapped::from).collect()),
            Value::Object(object) => Mapped::Object(spread(object)),
        }
    }
}

impl From<Value> for Mapped {
    fn from(value: Value) -> Self {
        Mapped::from(&value)
    }
}

impl From<&str> for Mapped {
    fn from(s: &str) -> Self {
        Mapped::String(s.to_string())
    }
}

impl From<String> for Mapped {
    fn from(s: String) -> Self {
        Mapped::String(s)
    }
}

impl From<i64> for Mapped {
    fn from(n: i64) -> Self {
        Mapped::Number(n.into())
    }
}

impl From<bool> for Mapped {
    fn from(b: bool) -> Self {
        Mapped::Bool(b)
    }
}

impl From<Fields> for Mapped {
    fn from(fields: Fields) -> Self {
        Mapped::Object(fields)
    }
}

impl From<Instance> for Mapped {
    fn from(instance: Instance) -> Self {
        Mapped::Instance(instance)
    }
}

impl Serialize for Mapped {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json(DEFAULT_MODEL_TAG).serialize(serializer)
    }
}

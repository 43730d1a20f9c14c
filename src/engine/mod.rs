//! Recursive transform engine
//!
//! The caller's value is wrapped under [`ROOT_KEY`] and the caller's schema is
//! applied to that key, so the top level goes through the same path
//! resolution, guard and instantiation policy as every nested node.

pub mod guard;
pub mod path;
mod policy;
mod walker;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::schema::SchemaNode;
use crate::value::Mapped;

/// Synthetic key the root value is wrapped under
pub const ROOT_KEY: &str = "key";

/// Default bound on include recursion
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Tunables for a single transform call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Deepest include level evaluated before the call is aborted
    pub max_depth: usize,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Per-call state shared by every recursion step
pub(crate) struct Traversal<'a> {
    pub(crate) root: &'a Value,
    pub(crate) max_depth: usize,
}

/// Transform `value` according to `schema` with default options.
///
/// ```
/// use object_model_transform::{transform, Model, SchemaNode};
/// use serde_json::json;
///
/// let person = Model::record("Person");
/// let out = transform(&json!({"name": "Doms"}), &SchemaNode::new().with_model(person.clone())).unwrap();
/// assert!(out.is_instance_of(&person));
/// ```
pub fn transform(value: &Value, schema: &SchemaNode) -> Result<Mapped> {
    transform_with(value, schema, &TransformOptions::default())
}

/// Transform `value` according to `schema`.
///
/// The schema's own `field` is ignored at the top level.
pub fn transform_with(value: &Value, schema: &SchemaNode, options: &TransformOptions) -> Result<Mapped> {
    let mut wrapper = Map::new();
    wrapper.insert(ROOT_KEY.to_string(), value.clone());
    let wrapper = Value::Object(wrapper);

    let cx = Traversal {
        root: value,
        max_depth: options.max_depth,
    };
    let mut out = walker::walk_path(&wrapper, schema, &[ROOT_KEY], &cx, 0)?;
    Ok(out.remove(ROOT_KEY).unwrap_or_default())
}

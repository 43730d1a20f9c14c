//! Recursive descent over schema nodes
//!
//! Two kinds of fan-out live here and stay separate: a list of sibling schema
//! nodes merges into one object ([`walk`]), while a sequence of data elements
//! maps one node over each element (handled by the policy at a leaf).

use serde_json::Value;
use tracing::debug;

use super::path::{self, Resolution};
use super::{guard, policy, Traversal};
use crate::error::{Result, TransformError};
use crate::schema::{Include, SchemaNode};
use crate::value::{is_falsy, spread, Fields, Mapped};

/// Apply `include` to `source`, producing the fields to merge over it.
///
/// A missing schema or an empty source yields no fields.
pub(crate) fn walk(
    source: &Value,
    include: Option<&Include>,
    cx: &Traversal<'_>,
    depth: usize,
) -> Result<Fields> {
    let Some(include) = include else {
        return Ok(Fields::new());
    };
    if is_falsy(source) {
        return Ok(Fields::new());
    }
    if depth > cx.max_depth {
        return Err(TransformError::DepthExceeded {
            depth,
            limit: cx.max_depth,
        });
    }

    match include {
        Include::One(node) => walk_node(source, node, cx, depth),
        Include::Many(nodes) => {
            // Later siblings win on key collisions.
            let mut merged = Fields::new();
            for node in nodes {
                merged.extend(walk_node(source, node, cx, depth)?);
            }
            Ok(merged)
        }
    }
}

fn walk_node(source: &Value, node: &SchemaNode, cx: &Traversal<'_>, depth: usize) -> Result<Fields> {
    let field = node
        .field
        .as_deref()
        .ok_or(TransformError::MissingField { depth })?;
    let segments = path::segments(field);
    walk_path(source, node, &segments, cx, depth)
}

/// Resolve `segments` under `source` and transform what they point at.
///
/// The result has at most one key: the first segment. An absent segment
/// yields no fields at all.
pub(crate) fn walk_path(
    source: &Value,
    node: &SchemaNode,
    segments: &[&str],
    cx: &Traversal<'_>,
    depth: usize,
) -> Result<Fields> {
    let (key, value) = match path::resolve(source, segments) {
        Resolution::Absent => {
            debug!(field = node.field_name(), depth, "field absent, skipping");
            return Ok(Fields::new());
        }
        Resolution::Branch { key, value, rest } => {
            let wrapped = match value {
                Value::Object(object) => {
                    let mut fields = spread(object);
                    fields.extend(walk_path(value, node, rest, cx, depth)?);
                    Mapped::Object(fields)
                }
                Value::Array(items) => overlay(items, walk_path(value, node, rest, cx, depth)?),
                other => Mapped::from(other),
            };
            (key, wrapped)
        }
        Resolution::Leaf { key, value } => {
            guard::validate(node)?;
            (key, policy::evaluate(value, node, source, cx, depth)?)
        }
    };
    Ok(Fields::from([(key.to_string(), value)]))
}

/// Copy `items`, replacing the elements named by index keys in `fields`.
fn overlay(items: &[Value], fields: Fields) -> Mapped {
    let mut elements: Vec<Mapped> = items.iter().map(Mapped::from).collect();
    for (key, value) in fields {
        if let Some(slot) = path::index(&key).and_then(|index| elements.get_mut(index)) {
            *slot = value;
        }
    }
    Mapped::Array(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use serde_json::json;

    fn traversal(root: &Value) -> Traversal<'_> {
        Traversal {
            root,
            max_depth: 8,
        }
    }

    #[test]
    fn test_missing_include_yields_nothing() {
        let data = json!({"a": 1});
        assert!(walk(&data, None, &traversal(&data), 0).unwrap().is_empty());
    }

    #[test]
    fn test_null_source_yields_nothing() {
        let include = Include::from(SchemaNode::field("a"));
        let data = Value::Null;
        assert!(walk(&data, Some(&include), &traversal(&data), 0).unwrap().is_empty());
    }

    #[test]
    fn test_siblings_merge_last_write_wins() {
        let first = Model::record("First");
        let second = Model::record("Second");
        let include = Include::from(vec![
            SchemaNode::field("pet").with_model(first),
            SchemaNode::field("pet").with_model(second.clone()),
            SchemaNode::field("missing"),
        ]);
        let data = json!({"pet": {"name": "Li"}});
        let fields = walk(&data, Some(&include), &traversal(&data), 1).unwrap();
        assert_eq!(fields.len(), 1);
        assert!(fields["pet"].is_instance_of(&second));
    }

    #[test]
    fn test_branch_keeps_intermediate_fields() {
        let node = SchemaNode::field("a.b").with_model(Model::record("B"));
        let data = json!({"a": {"b": {"x": 1}, "other": true}});
        let fields = walk(&data, Some(&Include::from(node)), &traversal(&data), 1).unwrap();
        let a = &fields["a"];
        assert_eq!(a.get("other"), Some(&Mapped::Bool(true)));
        assert!(a.get("b").unwrap().as_instance().is_some());
    }

    #[test]
    fn test_index_branch_rebuilds_array() {
        let node = SchemaNode::field("items.1.tag").with_model(Model::record("Tag"));
        let data = json!({"items": [{"tag": {}}, {"tag": {"v": 2}, "n": 1}, 3]});
        let fields = walk(&data, Some(&Include::from(node)), &traversal(&data), 1).unwrap();
        let items = fields["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert!(items[0].get("tag").unwrap().as_instance().is_none());
        assert!(items[1].get("tag").unwrap().as_instance().is_some());
        assert_eq!(items[1].get("n"), Some(&Mapped::from(1_i64)));
        assert_eq!(items[2], Mapped::from(3_i64));
    }

    #[test]
    fn test_depth_limit() {
        let include = Include::from(SchemaNode::field("a"));
        let data = json!({"a": 1});
        let cx = Traversal {
            root: &data,
            max_depth: 2,
        };
        assert!(matches!(
            walk(&data, Some(&include), &cx, 3),
            Err(TransformError::DepthExceeded { depth: 3, limit: 2 })
        ));
    }
}
